//! Shared theme constants for the channel display
//!
//! Color schemes and layout constants used by the sub-views, the separator
//! affordances, and the canvas program.

use iced::Color;
use waveview_core::DisplayKind;

/// Sub-view accent colors (Waveform, Spectrogram)
pub const SUBVIEW_COLORS: [Color; 2] = [
    Color::from_rgb(0.2, 0.8, 0.4), // Waveform - Green
    Color::from_rgb(0.9, 0.55, 0.2), // Spectrogram - Amber
];

/// Accent color for a display kind
pub fn display_color(kind: DisplayKind) -> Color {
    SUBVIEW_COLORS[kind as usize % SUBVIEW_COLORS.len()]
}

/// Channel background behind all sub-views
pub const CHANNEL_BACKGROUND: Color = Color::from_rgb(0.08, 0.08, 0.1);

/// Clip body fill when the clip has no tint of its own
pub const CLIP_BACKGROUND: Color = Color::from_rgb(0.13, 0.15, 0.2);

/// Semi-transparent overlay for the selected time region
pub const SELECTION_TINT: Color = Color::from_rgba(0.35, 0.55, 1.0, 0.25);

/// Emphasized clip boundary lines
pub const BOUNDARY_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.7);

/// Separator strip between stacked sub-views
pub const SEPARATOR_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.15);

/// Height of the drag strip between adjacent sub-views, in pixels
pub const SUBVIEW_SEPARATOR_THICKNESS: f32 = 8.0;

/// Side of the square close button in a sub-view corner, in pixels
pub const CLOSE_BUTTON_SIZE: f32 = 12.0;

/// Width of the rearrange grab strip on a sub-view's left edge, in pixels
pub const REARRANGE_STRIP_WIDTH: f32 = 8.0;

/// Horizontal distance within which a press counts as a clip edge, in pixels
pub const CLIP_BOUNDARY_THRESHOLD: f32 = 5.0;

/// Channel display configuration
///
/// Mirrors the constants above so applications can expose them as settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelViewConfig {
    /// Height of the drag strip between adjacent sub-views
    pub separator_thickness: f32,
    /// Side of the square sub-view close button
    pub close_button_size: f32,
    /// Width of the rearrange grab strip
    pub rearrange_strip_width: f32,
    /// Pixel distance within which a press counts as a clip edge
    pub clip_boundary_threshold: f32,
}

impl Default for ChannelViewConfig {
    fn default() -> Self {
        Self {
            separator_thickness: SUBVIEW_SEPARATOR_THICKNESS,
            close_button_size: CLOSE_BUTTON_SIZE,
            rearrange_strip_width: REARRANGE_STRIP_WIDTH,
            clip_boundary_threshold: CLIP_BOUNDARY_THRESHOLD,
        }
    }
}
