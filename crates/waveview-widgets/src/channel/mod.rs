//! Per-channel display composition
//!
//! One audio channel is displayed as a stack of toggleable sub-views sharing
//! a single vertical region. This module owns that composition:
//!
//! - **[`ChannelView`]** (`layout.rs`): the sub-view registry and layout
//!   manager - relative placements, multi-view state, hit-test and keyboard
//!   dispatch, undo snapshots
//! - **[`ClipGeometry`]** (`geometry.rs`): projects a clip through the view
//!   transform into pixel space, once, for both drawing and hit-testing
//! - **[`Viewport`]** (`viewport.rs`): the single time<->pixel formula
//! - **[`SubView`]** (`subview.rs`): the capability trait concrete display
//!   kinds implement, plus the kind->constructor registry
//! - **[`Handle`]** (`handles.rs`): what a hit test yields; carries sub-view
//!   ids, never references
//! - **[`ChannelCanvas`]** / [`channel_view`] (`canvas.rs`, `view.rs`):
//!   iced integration following the canvas Program + callback pattern

mod canvas;
mod extensions;
mod geometry;
mod handles;
mod layout;
mod spectrogram;
mod subview;
mod view;
mod viewport;
mod waveform;

pub use canvas::{ChannelCanvas, ChannelInteraction};
pub use extensions::ExtensionTable;
pub use geometry::{
    clip_rect, details_visible, hit_test, hit_test_area, ClipGeometry,
    CLIP_DETAILS_MIN_WIDTH, SAMPLE_DISPLAY_THRESHOLD,
};
pub use handles::{ClipEdge, Handle, SubViewId};
pub use layout::{
    ChannelView, PlacementError, PlacementSnapshot, SubViewPlacement, FRACTION_EPSILON,
    MIN_SUBVIEW_FRACTION,
};
pub use spectrogram::SpectrogramSubView;
pub use subview::{
    draw_bold_boundaries, MenuAction, MenuItem, MouseState, PeakSource, SubView,
    SubViewFactory, SubViewRegistry, SubViewType, Tool, ViewContext,
};
pub use view::channel_view;
pub use viewport::Viewport;
pub use waveform::WaveformSubView;
