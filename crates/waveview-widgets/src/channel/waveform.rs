//! Waveform sub-view
//!
//! Draws each clip as min/max column strokes (discrete markers once single
//! samples are distinguishable) and claims presses on clip bodies and clip
//! edges. All pixel positions come from [`ClipGeometry`], the same
//! projection hit-testing uses.

use std::any::Any;

use iced::widget::canvas::{Frame, Path, Stroke};
use iced::{Point, Rectangle, Size};
use waveview_core::DisplayKind;

use super::geometry::{self, ClipGeometry};
use super::handles::{ClipEdge, Handle, SubViewId};
use super::subview::{
    draw_bold_boundaries, MouseState, SubView, SubViewType, Tool, ViewContext,
};
use crate::theme;

const WAVEFORM_TYPE: SubViewType = SubViewType {
    kind: DisplayKind::Waveform,
    name: "Waveform",
};

/// The classic amplitude display
pub struct WaveformSubView {
    /// Vertical magnification of the rendered amplitude
    vertical_zoom: f32,
}

impl WaveformSubView {
    pub fn new() -> Self {
        Self { vertical_zoom: 1.0 }
    }

    pub fn vertical_zoom(&self) -> f32 {
        self.vertical_zoom
    }

    pub fn set_vertical_zoom(&mut self, zoom: f32) {
        self.vertical_zoom = zoom.clamp(0.25, 8.0);
    }
}

impl Default for WaveformSubView {
    fn default() -> Self {
        Self::new()
    }
}

impl SubView for WaveformSubView {
    fn subview_type(&self) -> SubViewType {
        WAVEFORM_TYPE
    }

    fn draw(&self, frame: &mut Frame, env: &ViewContext<'_>, rect: Rectangle) {
        frame.fill_rectangle(
            Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
            theme::CHANNEL_BACKGROUND,
        );

        for clip in env.clips {
            let geometry = ClipGeometry::new(clip, rect, env.selection, &env.viewport);
            if !geometry.is_visible() {
                continue;
            }
            let mid = geometry.mid;

            let body = clip
                .color
                .map(|(r, g, b)| iced::Color::from_rgb8(r, g, b))
                .unwrap_or(theme::CLIP_BACKGROUND);
            frame.fill_rectangle(
                Point::new(mid.x, mid.y),
                Size::new(mid.width, mid.height),
                body,
            );

            if !geometry::details_visible(clip, &env.viewport, rect) {
                continue;
            }

            if geometry.has_selection() {
                let sx0 = (env.viewport.time_to_position(geometry.t0, rect.x) as f32)
                    .clamp(mid.x, mid.x + mid.width);
                let sx1 = (env.viewport.time_to_position(geometry.t1, rect.x) as f32)
                    .clamp(mid.x, mid.x + mid.width);
                frame.fill_rectangle(
                    Point::new(sx0, mid.y),
                    Size::new(sx1 - sx0, mid.height),
                    theme::SELECTION_TINT,
                );
            }

            self.draw_peaks(frame, clip, &geometry, env);
        }

        draw_bold_boundaries(frame, env, rect);
    }

    fn detailed_hit_test(
        &self,
        id: SubViewId,
        state: &MouseState,
        env: &ViewContext<'_>,
        rect: Rectangle,
    ) -> (bool, Vec<Handle>) {
        if !rect.contains(state.position) {
            return (false, Vec::new());
        }
        for clip in env.clips {
            if !geometry::hit_test(clip, &env.viewport, rect, state.position) {
                continue;
            }
            let area = geometry::hit_test_area(clip, &env.viewport, rect);
            let mut handles = Vec::new();

            // Edge trimming only makes sense with a selection-capable tool
            // and a clip that is not folded to a sliver
            let trims = matches!(state.tool, Tool::Selection | Tool::Multi)
                && geometry::details_visible(clip, &env.viewport, rect);
            if trims {
                if (state.position.x - area.x).abs() <= theme::CLIP_BOUNDARY_THRESHOLD {
                    handles.push(Handle::ClipBoundary {
                        subview: id,
                        clip: clip.id,
                        edge: ClipEdge::Left,
                    });
                } else if (area.x + area.width - state.position.x).abs()
                    <= theme::CLIP_BOUNDARY_THRESHOLD
                {
                    handles.push(Handle::ClipBoundary {
                        subview: id,
                        clip: clip.id,
                        edge: ClipEdge::Right,
                    });
                }
            }
            handles.push(Handle::ClipBody {
                subview: id,
                clip: clip.id,
            });
            // The press landed on this clip; nothing below needs asking
            return (true, handles);
        }
        (false, Vec::new())
    }

    fn copy_state_to(&self, dest: &mut dyn SubView) {
        if let Some(dest) = dest.as_any_mut().downcast_mut::<WaveformSubView>() {
            dest.vertical_zoom = self.vertical_zoom;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl WaveformSubView {
    /// Column strokes over the visible span of one clip
    fn draw_peaks(
        &self,
        frame: &mut Frame,
        clip: &waveview_core::Clip,
        geometry: &ClipGeometry,
        env: &ViewContext<'_>,
    ) {
        let mid = geometry.mid;
        let center_y = mid.y + mid.height / 2.0;
        let half = mid.height / 2.0 * 0.85 * self.vertical_zoom;
        let color = theme::display_color(DisplayKind::Waveform);

        let columns = mid.width as usize;
        let visible_start = geometry.h.max(clip.start());
        let visible_end = geometry.h1.min(clip.end());
        let s0 = clip.to_sample(visible_start);
        let s1 = clip.to_sample(visible_end);

        let peaks = env
            .peaks
            .and_then(|source| source.peaks(clip.id, s0, s1, columns));
        let Some(peaks) = peaks else {
            // No amplitude data available: baseline only
            frame.stroke(
                &Path::line(
                    Point::new(mid.x, center_y),
                    Point::new(mid.x + mid.width, center_y),
                ),
                Stroke::default().with_color(color).with_width(1.0),
            );
            return;
        };

        for (col, &(min, max)) in peaks.iter().enumerate().take(columns) {
            let x = mid.x + col as f32;
            let y1 = center_y - max * half;
            let y2 = center_y - min * half;
            frame.stroke(
                &Path::line(Point::new(x, y1), Point::new(x, y2)),
                Stroke::default().with_color(color).with_width(1.0),
            );
            if geometry.show_individual_samples {
                // Samples are far enough apart to mark each one distinctly
                frame.fill_rectangle(
                    Point::new(x - 1.5, y1 - 1.5),
                    Size::new(3.0, 3.0),
                    color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::viewport::Viewport;
    use waveview_core::{Clip, SelectedRegion};

    fn view() -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 100.0,
        }
    }

    fn context(clips: &[Clip]) -> ViewContext<'_> {
        ViewContext::new(Viewport::new(0.0, 100.0), SelectedRegion::default(), clips)
    }

    #[test]
    fn test_press_on_clip_body_finishes_with_body_handle() {
        let clips = [Clip::new(5, 1.0, 1000.0, 4000)]; // [1s, 5s) => px 100..500
        let sub_view = WaveformSubView::new();
        let state = MouseState::new(Point::new(300.0, 50.0));
        let (finished, handles) =
            sub_view.detailed_hit_test(SubViewId(0), &state, &context(&clips), view());
        assert!(finished);
        assert_eq!(
            handles,
            vec![Handle::ClipBody {
                subview: SubViewId(0),
                clip: 5
            }]
        );
    }

    #[test]
    fn test_press_near_edge_yields_boundary_then_body() {
        let clips = [Clip::new(5, 1.0, 1000.0, 4000)];
        let sub_view = WaveformSubView::new();
        let state = MouseState::new(Point::new(102.0, 50.0));
        let (finished, handles) =
            sub_view.detailed_hit_test(SubViewId(0), &state, &context(&clips), view());
        assert!(finished);
        assert_eq!(handles.len(), 2, "boundary handle wins, body is fallback");
        assert!(matches!(
            handles[0],
            Handle::ClipBoundary {
                edge: ClipEdge::Left,
                clip: 5,
                ..
            }
        ));
        let state = MouseState::new(Point::new(498.0, 50.0));
        let (_, handles) =
            sub_view.detailed_hit_test(SubViewId(0), &state, &context(&clips), view());
        assert!(matches!(
            handles[0],
            Handle::ClipBoundary {
                edge: ClipEdge::Right,
                ..
            }
        ));
    }

    #[test]
    fn test_envelope_tool_never_offers_trim_handles() {
        let clips = [Clip::new(5, 1.0, 1000.0, 4000)];
        let sub_view = WaveformSubView::new();
        let state = MouseState {
            tool: Tool::Envelope,
            ..MouseState::new(Point::new(102.0, 50.0))
        };
        let (_, handles) =
            sub_view.detailed_hit_test(SubViewId(0), &state, &context(&clips), view());
        assert_eq!(handles.len(), 1);
        assert!(matches!(handles[0], Handle::ClipBody { .. }));
    }

    #[test]
    fn test_miss_does_not_finish() {
        let clips = [Clip::new(5, 1.0, 1000.0, 4000)];
        let sub_view = WaveformSubView::new();
        let state = MouseState::new(Point::new(900.0, 50.0));
        let (finished, handles) =
            sub_view.detailed_hit_test(SubViewId(0), &state, &context(&clips), view());
        assert!(!finished);
        assert!(handles.is_empty());
    }

    #[test]
    fn test_absent_channel_means_nothing_to_hit() {
        let sub_view = WaveformSubView::new();
        let state = MouseState::new(Point::new(300.0, 50.0));
        let (finished, handles) =
            sub_view.detailed_hit_test(SubViewId(0), &state, &context(&[]), view());
        assert!(!finished);
        assert!(handles.is_empty());
    }

    #[test]
    fn test_copy_hook_preserves_vertical_zoom() {
        let mut source = WaveformSubView::new();
        source.set_vertical_zoom(2.5);
        let mut dest = WaveformSubView::new();
        source.copy_state_to(&mut dest);
        assert_eq!(dest.vertical_zoom(), 2.5);
    }

    #[test]
    fn test_vertical_zoom_is_clamped() {
        let mut sub_view = WaveformSubView::new();
        sub_view.set_vertical_zoom(100.0);
        assert_eq!(sub_view.vertical_zoom(), 8.0);
    }
}
