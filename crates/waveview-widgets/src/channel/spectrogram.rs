//! Spectrogram sub-view
//!
//! Renders each clip as per-column intensity tiles and carries the display
//! range the user has dialed in. That range survives undo through the copy
//! hook; the actual spectral analysis belongs to the rendering collaborator
//! behind [`PeakSource`](super::subview::PeakSource).

use std::any::Any;

use iced::keyboard;
use iced::widget::canvas::Frame;
use iced::{Color, Point, Rectangle, Size};
use waveview_core::DisplayKind;

use super::geometry::{self, ClipGeometry};
use super::handles::{Handle, SubViewId};
use super::subview::{draw_bold_boundaries, MouseState, SubView, SubViewType, ViewContext};
use crate::theme;

const SPECTROGRAM_TYPE: SubViewType = SubViewType {
    kind: DisplayKind::Spectrogram,
    name: "Spectrogram",
};

/// Frequency-content display with a user-adjustable level range
pub struct SpectrogramSubView {
    /// Rendered dynamic range, dB
    range_db: f32,
    /// Gain applied before mapping level to color, dB
    gain_db: f32,
}

impl SpectrogramSubView {
    pub fn new() -> Self {
        Self {
            range_db: 80.0,
            gain_db: 20.0,
        }
    }

    pub fn range_db(&self) -> f32 {
        self.range_db
    }

    pub fn gain_db(&self) -> f32 {
        self.gain_db
    }

    pub fn set_gain_db(&mut self, gain: f32) {
        self.gain_db = gain.clamp(-20.0, 60.0);
    }

    /// Map a linear amplitude to display brightness through the gain/range
    fn brightness(&self, amplitude: f32) -> f32 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        let db = 20.0 * amplitude.log10() + self.gain_db;
        ((db + self.range_db) / self.range_db).clamp(0.0, 1.0)
    }
}

impl Default for SpectrogramSubView {
    fn default() -> Self {
        Self::new()
    }
}

impl SubView for SpectrogramSubView {
    fn subview_type(&self) -> SubViewType {
        SPECTROGRAM_TYPE
    }

    fn draw(&self, frame: &mut Frame, env: &ViewContext<'_>, rect: Rectangle) {
        frame.fill_rectangle(
            Point::new(rect.x, rect.y),
            Size::new(rect.width, rect.height),
            theme::CHANNEL_BACKGROUND,
        );

        let accent = theme::display_color(DisplayKind::Spectrogram);
        for clip in env.clips {
            let geometry = ClipGeometry::new(clip, rect, env.selection, &env.viewport);
            if !geometry.is_visible() {
                continue;
            }
            let mid = geometry.mid;
            frame.fill_rectangle(
                Point::new(mid.x, mid.y),
                Size::new(mid.width, mid.height),
                theme::CLIP_BACKGROUND,
            );
            if !geometry::details_visible(clip, &env.viewport, rect) {
                continue;
            }

            let columns = mid.width as usize;
            let s0 = clip.to_sample(geometry.h.max(clip.start()));
            let s1 = clip.to_sample(geometry.h1.min(clip.end()));
            if let Some(peaks) = env
                .peaks
                .and_then(|source| source.peaks(clip.id, s0, s1, columns))
            {
                for (col, &(min, max)) in peaks.iter().enumerate().take(columns) {
                    let level = self.brightness((max - min) / 2.0);
                    if level <= 0.0 {
                        continue;
                    }
                    frame.fill_rectangle(
                        Point::new(mid.x + col as f32, mid.y),
                        Size::new(1.0, mid.height),
                        Color {
                            a: level,
                            ..accent
                        },
                    );
                }
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
            if geometry::hit_test(clip, &env.viewport, rect, state.position) {
                return (
                    true,
                    vec![Handle::ClipBody {
                        subview: id,
                        clip: clip.id,
                    }],
                );
            }
        }
        (false, Vec::new())
    }

    fn copy_state_to(&self, dest: &mut dyn SubView) {
        if let Some(dest) = dest.as_any_mut().downcast_mut::<SpectrogramSubView>() {
            dest.range_db = self.range_db;
            dest.gain_db = self.gain_db;
        }
    }

    fn on_key(&mut self, event: &keyboard::Event) -> bool {
        match event {
            keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::ArrowUp),
                ..
            } => {
                self.set_gain_db(self.gain_db + 1.0);
                true
            }
            keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::ArrowDown),
                ..
            } => {
                self.set_gain_db(self.gain_db - 1.0);
                true
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::viewport::Viewport;
    use waveview_core::{Clip, SelectedRegion};

    #[test]
    fn test_copy_hook_preserves_display_range() {
        let mut source = SpectrogramSubView::new();
        source.set_gain_db(35.0);
        source.range_db = 60.0;
        let mut dest = SpectrogramSubView::new();
        source.copy_state_to(&mut dest);
        assert_eq!(dest.gain_db(), 35.0);
        assert_eq!(dest.range_db(), 60.0);
    }

    #[test]
    fn test_copy_hook_ignores_foreign_dest() {
        // Copying into a different sub-view kind must be a quiet no-op
        let source = SpectrogramSubView::new();
        let mut dest = super::super::waveform::WaveformSubView::new();
        source.copy_state_to(&mut dest);
        assert_eq!(dest.vertical_zoom(), 1.0);
    }

    #[test]
    fn test_gain_is_clamped() {
        let mut sub_view = SpectrogramSubView::new();
        sub_view.set_gain_db(500.0);
        assert_eq!(sub_view.gain_db(), 60.0);
        sub_view.set_gain_db(-500.0);
        assert_eq!(sub_view.gain_db(), -20.0);
    }

    #[test]
    fn test_brightness_maps_silence_to_zero() {
        let sub_view = SpectrogramSubView::new();
        assert_eq!(sub_view.brightness(0.0), 0.0);
        assert!(sub_view.brightness(1.0) > sub_view.brightness(0.001));
    }

    #[test]
    fn test_unhandled_keys_are_reported_unhandled() {
        let mut sub_view = SpectrogramSubView::new();
        let event = keyboard::Event::ModifiersChanged(keyboard::Modifiers::empty());
        assert!(!sub_view.on_key(&event));
    }

    #[test]
    fn test_hit_test_claims_clip_body_only() {
        let clips = [Clip::new(2, 0.0, 1000.0, 5000)];
        let env = ViewContext::new(Viewport::new(0.0, 100.0), SelectedRegion::default(), &clips);
        let rect = Rectangle {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 100.0,
        };
        let sub_view = SpectrogramSubView::new();
        let state = MouseState::new(Point::new(100.0, 50.0));
        let (finished, handles) = sub_view.detailed_hit_test(SubViewId(1), &state, &env, rect);
        assert!(finished);
        assert_eq!(
            handles,
            vec![Handle::ClipBody {
                subview: SubViewId(1),
                clip: 2
            }]
        );
    }
}
