//! The sub-view capability trait and kind registry
//!
//! A sub-view is one display mode of a channel (waveform, spectrogram, ...).
//! The layout manager treats them uniformly through [`SubView`]; new display
//! kinds register a constructor in [`SubViewRegistry`] instead of modifying
//! the layout code.

use std::any::Any;

use iced::keyboard;
use iced::widget::canvas::{Frame, Path, Stroke};
use iced::{Point, Rectangle};
use waveview_core::{Clip, ClipId, DisplayKind, SampleCount, SelectedRegion};

use super::handles::{Handle, SubViewId};
use super::viewport::Viewport;
use crate::theme;

/// Static descriptor of a sub-view kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubViewType {
    /// Stable tag, also the registry key
    pub kind: DisplayKind,
    /// Menu label
    pub name: &'static str,
}

/// Active tool reported with mouse input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Selection,
    Envelope,
    Multi,
}

/// Mouse input descriptor for hit-testing
#[derive(Debug, Clone, Copy)]
pub struct MouseState {
    /// Pointer position in the same coordinates as the layout rectangle
    pub position: Point,
    pub modifiers: keyboard::Modifiers,
    pub tool: Tool,
}

impl MouseState {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            modifiers: keyboard::Modifiers::empty(),
            tool: Tool::default(),
        }
    }
}

/// Amplitude summaries for drawing, supplied by the surrounding application
///
/// The display core never stores sample data. A sub-view that wants to draw
/// real audio asks this collaborator for min/max pairs, one per pixel
/// column, over a clip-relative sample range. Returning `None` means the
/// data is not (yet) available and the sub-view falls back to an outline.
pub trait PeakSource {
    /// Min/max amplitude per column for `columns` columns spanning the
    /// clip-relative samples `[s0, s1)`
    fn peaks(
        &self,
        clip: ClipId,
        s0: SampleCount,
        s1: SampleCount,
        columns: usize,
    ) -> Option<Vec<(f32, f32)>>;
}

/// Everything a sub-view needs for one draw or hit-test pass
///
/// Clips are borrowed from the project model per call; an empty slice (the
/// referenced channel went away) simply means nothing to draw or hit.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub viewport: Viewport,
    pub selection: SelectedRegion,
    pub clips: &'a [Clip],
    pub peaks: Option<&'a dyn PeakSource>,
}

impl<'a> ViewContext<'a> {
    pub fn new(viewport: Viewport, selection: SelectedRegion, clips: &'a [Clip]) -> Self {
        Self {
            viewport,
            selection,
            clips,
            peaks: None,
        }
    }

    pub fn with_peaks(mut self, peaks: &'a dyn PeakSource) -> Self {
        self.peaks = Some(peaks);
        self
    }
}

/// A menu entry contributed by the channel view or one of its sub-views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub checked: bool,
}

/// What choosing a menu entry should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Activate a kind exclusively
    SetDisplay(DisplayKind),
    /// Flip a kind on or off alongside the others
    ToggleDisplay(DisplayKind),
    ToggleMultiView,
}

/// One display mode of a channel
///
/// Implementations draw into their sub-rectangle, answer detailed hit tests
/// confined to it, and may carry state worth preserving across undo (copied
/// through [`SubView::copy_state_to`], so the layout manager never needs to
/// know what that state is).
pub trait SubView {
    fn subview_type(&self) -> SubViewType;

    /// Stable tag of this sub-view's display kind
    fn kind(&self) -> DisplayKind {
        self.subview_type().kind
    }

    /// Render into `rect`; the frame is the opaque drawing context
    fn draw(&self, frame: &mut Frame, env: &ViewContext<'_>, rect: Rectangle);

    /// Detailed hit test confined to `rect`
    ///
    /// Returns whether hit-testing is finished (short-circuits the dispatch
    /// walk) and the handles found so far.
    fn detailed_hit_test(
        &self,
        id: SubViewId,
        state: &MouseState,
        env: &ViewContext<'_>,
        rect: Rectangle,
    ) -> (bool, Vec<Handle>);

    /// Menu entries this sub-view contributes
    fn menu_items(&self) -> Vec<MenuItem> {
        Vec::new()
    }

    /// Copy per-sub-view state into `dest` for undo snapshots
    fn copy_state_to(&self, _dest: &mut dyn SubView) {}

    /// Handle a key event while this sub-view owns keyboard focus
    fn on_key(&mut self, _event: &keyboard::Event) -> bool {
        false
    }

    /// Keyboard focus moved elsewhere
    fn on_focus_lost(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Constructor for a sub-view kind
pub type SubViewFactory = fn() -> Box<dyn SubView>;

/// Maps display kinds to sub-view constructors
///
/// The layout manager instantiates sub-views exclusively through this, so
/// registering a new kind is enough to make it toggleable.
#[derive(Clone)]
pub struct SubViewRegistry {
    entries: Vec<(DisplayKind, SubViewFactory)>,
}

impl SubViewRegistry {
    /// Registry with the built-in kinds
    pub fn builtin() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
        };
        registry.register(DisplayKind::Waveform, || {
            Box::new(super::waveform::WaveformSubView::new())
        });
        registry.register(DisplayKind::Spectrogram, || {
            Box::new(super::spectrogram::SpectrogramSubView::new())
        });
        registry
    }

    /// Register a constructor, replacing any previous one for the kind
    pub fn register(&mut self, kind: DisplayKind, factory: SubViewFactory) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = factory;
        } else {
            self.entries.push((kind, factory));
        }
    }

    /// Instantiate a sub-view of the given kind
    pub fn create(&self, kind: DisplayKind) -> Option<Box<dyn SubView>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, factory)| factory())
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = DisplayKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }
}

impl Default for SubViewRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for SubViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubViewRegistry")
            .field("kinds", &self.entries.iter().map(|(k, _)| *k).collect::<Vec<_>>())
            .finish()
    }
}

/// Draw emphasized vertical lines at every clip boundary inside `rect`
///
/// Shared by all sub-view kinds so clip edges line up exactly between
/// stacked displays.
pub fn draw_bold_boundaries(frame: &mut Frame, env: &ViewContext<'_>, rect: Rectangle) {
    for clip in env.clips {
        for t in [clip.start(), clip.end()] {
            let x = env.viewport.time_to_position(t, rect.x) as f32;
            if x < rect.x || x > rect.x + rect.width {
                continue;
            }
            frame.stroke(
                &Path::line(
                    Point::new(x, rect.y),
                    Point::new(x, rect.y + rect.height),
                ),
                Stroke::default()
                    .with_color(theme::BOUNDARY_COLOR)
                    .with_width(1.5),
            );
        }
    }
}
