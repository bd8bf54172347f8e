//! Hit-test handles
//!
//! A hit test yields [`Handle`] values describing what the press would grab.
//! Handles never hold references into the channel view; they carry a
//! [`SubViewId`] which the owner resolves later, and a stale id simply
//! resolves to absent.

use iced::mouse;
use waveview_core::ClipId;

/// Index of a sub-view within its owning channel view
///
/// Sub-views are created once per kind and never removed (only
/// deactivated), so the index stays valid for the life of the view. Resolve
/// through [`ChannelView::sub_view`](super::ChannelView::sub_view), which
/// returns `None` for an id from another or rebuilt view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubViewId(pub(crate) usize);

impl SubViewId {
    /// Arena position, for diagnostics
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Which edge of a clip a press grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipEdge {
    Left,
    Right,
}

/// What a successful hit test grabbed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handle {
    /// Body of a clip: select or drag it
    ClipBody { subview: SubViewId, clip: ClipId },
    /// Boundary of a clip: trim it
    ClipBoundary {
        subview: SubViewId,
        clip: ClipId,
        edge: ClipEdge,
    },
    /// Separator strip between two adjacent sub-views: drag their fractions
    Adjust { above: SubViewId, below: SubViewId },
    /// Grab strip for reordering a sub-view within the stack
    Rearrange { subview: SubViewId },
    /// Button that deactivates a sub-view
    Close { subview: SubViewId },
}

impl Handle {
    /// The sub-view this handle belongs to (the lower one for separators)
    pub fn subview(&self) -> SubViewId {
        match self {
            Handle::ClipBody { subview, .. }
            | Handle::ClipBoundary { subview, .. }
            | Handle::Rearrange { subview }
            | Handle::Close { subview } => *subview,
            Handle::Adjust { below, .. } => *below,
        }
    }

    /// Cursor shape to show while hovering this handle
    pub fn cursor(&self) -> mouse::Interaction {
        match self {
            Handle::ClipBody { .. } => mouse::Interaction::Pointer,
            Handle::ClipBoundary { .. } => mouse::Interaction::ResizingHorizontally,
            Handle::Adjust { .. } => mouse::Interaction::ResizingVertically,
            Handle::Rearrange { .. } => mouse::Interaction::Grab,
            Handle::Close { .. } => mouse::Interaction::Pointer,
        }
    }
}
