//! Channel display widgets for waveview
//!
//! This crate composes one audio channel's display out of stacked,
//! toggleable sub-views (waveform, spectrogram) and provides the clip
//! geometry shared by drawing and hit-testing.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! Following the same split used across the workspace:
//!
//! - **State structs** ([`ChannelView`], placements, [`Viewport`]): pure data
//!   mutated in the application's update loop
//! - **View function** ([`channel_view`]): takes state + callbacks, returns
//!   an `Element<Message>`
//! - **Canvas Program** ([`ChannelCanvas`]): custom rendering and
//!   event-to-callback translation
//!
//! ## Usage
//!
//! ```ignore
//! // In your application's view function:
//! let channel = channel_view(
//!     &self.channel_view,
//!     ViewContext::new(self.viewport, self.selection, &self.clips),
//!     240.0,
//!     |handle| Message::ChannelHandle(handle),
//! );
//! ```

pub mod channel;
pub mod theme;

pub use channel::{
    clip_rect, details_visible, hit_test, hit_test_area, ChannelCanvas, ChannelView,
    ClipEdge, ClipGeometry, ExtensionTable, Handle, MenuAction, MenuItem, MouseState,
    PeakSource, PlacementError, PlacementSnapshot, SubView, SubViewId, SubViewPlacement,
    SubViewRegistry, SubViewType, Tool, ViewContext, Viewport,
};
pub use channel::{channel_view, SpectrogramSubView, WaveformSubView};
pub use theme::{display_color, ChannelViewConfig, SELECTION_TINT, SUBVIEW_COLORS};
