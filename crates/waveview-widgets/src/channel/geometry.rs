//! Clip geometry projection
//!
//! [`ClipGeometry`] does the calculations common to waveform and spectrogram
//! drawing once per pass: the visible time window, the selection clamped to
//! the clip, sample indices, and the clip's pixel rectangles. Hit-testing
//! uses the same values through the static helpers, so the two paths cannot
//! disagree about where a clip is on screen.

use iced::{Point, Rectangle};
use waveview_core::{Clip, SampleCount, SelectedRegion};

use super::viewport::Viewport;

/// Pixels per sample above which individual samples are drawn distinctly
pub const SAMPLE_DISPLAY_THRESHOLD: f64 = 0.5;

/// On-screen width below which a clip is folded to an outline
pub const CLIP_DETAILS_MIN_WIDTH: f32 = 3.0;

/// Minimum clickable width of a clip that is narrower on screen
const CLIP_HIT_MIN_WIDTH: f32 = 4.0;

/// Per-pass projection of one clip into pixel space
///
/// Constructed fresh for each drawing or hit-testing operation and never
/// stored. All times are in seconds; `tpre`/`tpost` are clip-relative.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipGeometry {
    /// Clip start on the timeline
    pub t_offset: f64,
    /// Clip sample rate, Hz
    pub rate: f64,
    /// Absolute time of the left edge of the view
    pub h: f64,
    /// Offset-corrected time of the left edge of the view
    pub tpre: f64,
    /// Absolute time of the right edge of the view
    pub h1: f64,
    /// Offset-corrected time of the right edge of the view
    pub tpost: f64,
    /// Selection start clamped so that `t0 >= clip start`
    pub t0: f64,
    /// Selection end clamped so that `t1 <= clip end`
    pub t1: f64,
    /// Average pixels per sample at the current zoom
    pub avg_pixels_per_sample: f64,
    /// Whether samples are far enough apart to render distinctly
    pub show_individual_samples: bool,
    /// Selection start as a clip-relative sample index
    pub ssel0: SampleCount,
    /// Selection end as a clip-relative sample index
    pub ssel1: SampleCount,
    /// The clip's full horizontal extent in pixels, not clamped to the view
    ///
    /// May extend outside the view rectangle; scroll-consistent math (what
    /// is just offscreen) reasons about this one.
    pub hidden_mid: Rectangle,
    /// `hidden_mid.x` relative to the view rectangle's origin (may be < 0)
    pub hidden_left_offset: f32,
    /// `hidden_mid` intersected with the view rectangle
    pub mid: Rectangle,
    /// `mid.x` relative to the view rectangle's origin (>= 0)
    pub left_offset: f32,
}

impl ClipGeometry {
    /// Project `clip` through `viewport` into `rect`
    pub fn new(
        clip: &Clip,
        rect: Rectangle,
        selection: SelectedRegion,
        viewport: &Viewport,
    ) -> Self {
        let h = viewport.start_time;
        let h1 = h + viewport.time_span(rect.width);
        let t_offset = clip.offset;

        // Selection is normalized, clip start <= end, so clamping both
        // endpoints preserves t0 <= t1; a selection that misses the clip
        // collapses to a zero-width span at the nearer clip edge.
        let t0 = selection.start().clamp(clip.start(), clip.end());
        let t1 = selection.end().clamp(clip.start(), clip.end());

        let window = h1 - h;
        let avg_pixels_per_sample = if window > 0.0 && clip.rate > 0.0 {
            rect.width as f64 / (window * clip.rate)
        } else {
            0.0
        };

        let (hidden_mid, mid) = clip_extent(clip, viewport, rect);
        if mid.width <= 0.0 {
            log::debug!(
                "clip {} projects to an empty rectangle (window {}..{})",
                clip.id,
                h,
                h1
            );
        }

        Self {
            t_offset,
            rate: clip.rate,
            h,
            tpre: h - t_offset,
            h1,
            tpost: h1 - t_offset,
            t0,
            t1,
            avg_pixels_per_sample,
            show_individual_samples: avg_pixels_per_sample > SAMPLE_DISPLAY_THRESHOLD,
            ssel0: clip.to_sample(t0),
            ssel1: clip.to_sample(t1),
            hidden_left_offset: hidden_mid.x - rect.x,
            hidden_mid,
            left_offset: mid.x - rect.x,
            mid,
        }
    }

    /// Whether any part of the clip is on screen
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.mid.width > 0.0
    }

    /// Whether the clamped selection has nonzero width
    #[inline]
    pub fn has_selection(&self) -> bool {
        self.t1 > self.t0
    }
}

/// Unclipped and view-clamped pixel extents of a clip
fn clip_extent(clip: &Clip, viewport: &Viewport, view_rect: Rectangle) -> (Rectangle, Rectangle) {
    let x0 = viewport.time_to_position(clip.start(), view_rect.x);
    let x1 = viewport.time_to_position(clip.end(), view_rect.x);

    let hidden = Rectangle {
        x: x0 as f32,
        y: view_rect.y,
        width: (x1 - x0).max(0.0) as f32,
        height: view_rect.height,
    };

    let mid = hidden.intersection(&view_rect).unwrap_or(Rectangle {
        // Zero-width marker at whichever view edge the clip is beyond
        x: (hidden.x).clamp(view_rect.x, view_rect.x + view_rect.width),
        y: view_rect.y,
        width: 0.0,
        height: view_rect.height,
    });

    (hidden, mid)
}

/// The clip's rectangle clamped to `view_rect`, plus whether individual
/// samples are distinguishable at the current zoom
///
/// The simplified variant for callers that only need "is this point inside
/// the clip's rendered area" without the full per-pass breakdown.
pub fn clip_rect(clip: &Clip, viewport: &Viewport, view_rect: Rectangle) -> (Rectangle, bool) {
    let (_, mid) = clip_extent(clip, viewport, view_rect);
    let shows_samples = if clip.rate > 0.0 {
        viewport.pixels_per_second / clip.rate > SAMPLE_DISPLAY_THRESHOLD
    } else {
        false
    };
    (mid, shows_samples)
}

/// Whether the clip is wide enough on screen to draw its contents
///
/// Never folds a clip to an outline at sample zoom levels, or a clip
/// trimmed to a single sample could not be unfolded again.
pub fn details_visible(clip: &Clip, viewport: &Viewport, view_rect: Rectangle) -> bool {
    let (rect, shows_samples) = clip_rect(clip, viewport, view_rect);
    shows_samples || rect.width >= CLIP_DETAILS_MIN_WIDTH
}

/// The clickable area of a clip within `view_rect`
///
/// A clip narrower on screen than a few pixels is widened around its center
/// so it can still be grabbed.
pub fn hit_test_area(clip: &Clip, viewport: &Viewport, view_rect: Rectangle) -> Rectangle {
    let (mut rect, _) = clip_rect(clip, viewport, view_rect);
    if rect.width < CLIP_HIT_MIN_WIDTH {
        rect.x -= (CLIP_HIT_MIN_WIDTH - rect.width) / 2.0;
        rect.width = CLIP_HIT_MIN_WIDTH;
    }
    rect
}

/// Whether `pos` falls inside the clip's clickable area
pub fn hit_test(clip: &Clip, viewport: &Viewport, view_rect: Rectangle, pos: Point) -> bool {
    hit_test_area(clip, viewport, view_rect).contains(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_second_clip() -> Clip {
        // [0s, 10s) at 1kHz
        Clip::new(1, 0.0, 1000.0, 10_000)
    }

    fn view() -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 100.0,
        }
    }

    #[test]
    fn test_selection_clamps_to_clip() {
        let clip = ten_second_clip();
        let geometry = ClipGeometry::new(
            &clip,
            view(),
            SelectedRegion::new(-5.0, 20.0),
            &Viewport::new(0.0, 100.0),
        );
        assert_eq!(geometry.t0, 0.0);
        assert_eq!(geometry.t1, 10.0);
        assert_eq!(geometry.ssel0, 0);
        assert_eq!(geometry.ssel1, 10_000);
    }

    #[test]
    fn test_selection_missing_clip_is_empty_not_fatal() {
        let clip = ten_second_clip();
        let geometry = ClipGeometry::new(
            &clip,
            view(),
            SelectedRegion::new(20.0, 30.0),
            &Viewport::new(0.0, 100.0),
        );
        assert_eq!(geometry.t0, geometry.t1, "non-intersecting selection collapses");
        assert_eq!(geometry.ssel0, geometry.ssel1);
        assert!(!geometry.has_selection());
    }

    #[test]
    fn test_window_and_offset_correction() {
        let clip = Clip::new(1, 3.0, 1000.0, 2000);
        let geometry = ClipGeometry::new(
            &clip,
            view(),
            SelectedRegion::default(),
            &Viewport::new(2.0, 100.0),
        );
        assert_eq!(geometry.h, 2.0);
        assert_eq!(geometry.h1, 12.0);
        assert_eq!(geometry.tpre, -1.0);
        assert_eq!(geometry.tpost, 9.0);
    }

    #[test]
    fn test_hidden_extends_past_view_while_mid_is_clamped() {
        // Scrolled 2s into a clip that starts at 0s
        let clip = ten_second_clip();
        let geometry = ClipGeometry::new(
            &clip,
            view(),
            SelectedRegion::default(),
            &Viewport::new(2.0, 100.0),
        );
        assert_eq!(geometry.hidden_left_offset, -200.0);
        assert_eq!(geometry.hidden_mid.width, 1000.0);
        assert_eq!(geometry.left_offset, 0.0);
        assert_eq!(geometry.mid.x, 0.0);
        assert_eq!(geometry.mid.width, 800.0);
    }

    #[test]
    fn test_clip_outside_window_is_empty() {
        let clip = ten_second_clip();
        let geometry = ClipGeometry::new(
            &clip,
            view(),
            SelectedRegion::default(),
            &Viewport::new(100.0, 100.0),
        );
        assert!(!geometry.is_visible());
        assert_eq!(geometry.mid.width, 0.0);
    }

    #[test]
    fn test_zero_width_rect_is_degenerate_not_fatal() {
        let clip = ten_second_clip();
        let rect = Rectangle {
            width: 0.0,
            ..view()
        };
        let geometry = ClipGeometry::new(
            &clip,
            rect,
            SelectedRegion::default(),
            &Viewport::new(0.0, 100.0),
        );
        assert_eq!(geometry.avg_pixels_per_sample, 0.0);
        assert!(!geometry.is_visible());
    }

    #[test]
    fn test_projection_is_monotonic_across_clips() {
        let viewport = Viewport::new(0.0, 100.0);
        let mut last_x = f32::NEG_INFINITY;
        for i in 0..20 {
            let clip = Clip::new(i, i as f64 * 0.5, 1000.0, 100);
            let geometry =
                ClipGeometry::new(&clip, view(), SelectedRegion::default(), &viewport);
            assert!(geometry.hidden_mid.x >= last_x);
            last_x = geometry.hidden_mid.x;
        }
    }

    #[test]
    fn test_sample_visibility_switches_with_zoom() {
        let clip = ten_second_clip();
        // 100 px/s over 1kHz audio = 0.1 px/sample: continuous
        let (_, coarse) = clip_rect(&clip, &Viewport::new(0.0, 100.0), view());
        assert!(!coarse);
        // 10000 px/s = 10 px/sample: discrete samples
        let (_, fine) = clip_rect(&clip, &Viewport::new(0.0, 10_000.0), view());
        assert!(fine);
    }

    #[test]
    fn test_narrow_clip_keeps_clickable_area() {
        // 10 samples at 1kHz = 10ms; at 100 px/s that's 1px wide
        let clip = Clip::new(1, 5.0, 1000.0, 10);
        let viewport = Viewport::new(0.0, 100.0);
        let area = hit_test_area(&clip, &viewport, view());
        assert!(area.width >= CLIP_HIT_MIN_WIDTH);
        assert!(hit_test(&clip, &viewport, view(), Point::new(500.0, 50.0)));
    }

    #[test]
    fn test_details_hidden_for_sliver_clips() {
        let clip = Clip::new(1, 5.0, 1000.0, 10);
        let zoomed_out = Viewport::new(0.0, 100.0);
        assert!(!details_visible(&clip, &zoomed_out, view()));
        // At sample zoom the same clip must never fold
        let zoomed_in = Viewport::new(5.0, 10_000.0);
        assert!(details_visible(&clip, &zoomed_in, view()));
    }
}
