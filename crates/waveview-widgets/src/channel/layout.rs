//! Sub-view registry and layout manager
//!
//! [`ChannelView`] owns the sub-views of one audio channel and decides how
//! they share the channel's vertical screen region. Placements (display
//! order + fractional height) are kept in a parallel sequence whose visible
//! fractions always sum to 1.0; they are saved and restored atomically for
//! undo. All mutation happens through `&mut self` on the UI thread; drawing
//! and hit-testing are read-only passes over the already-built state.

use std::cell::Cell;

use iced::keyboard;
use iced::Rectangle;
use thiserror::Error;
use waveview_core::config::DisplayConfig;
use waveview_core::{ChannelId, DisplayKind};

use super::extensions::ExtensionTable;
use super::handles::{Handle, SubViewId};
use super::subview::{MenuAction, MenuItem, MouseState, SubView, SubViewRegistry, ViewContext};
use crate::theme::{CLOSE_BUTTON_SIZE, REARRANGE_STRIP_WIDTH, SUBVIEW_SEPARATOR_THICKNESS};

/// Tolerance for the visible-fraction sum invariant
pub const FRACTION_EPSILON: f32 = 1e-4;

/// Smallest fraction a visible sub-view can be resized down to
pub const MIN_SUBVIEW_FRACTION: f32 = 0.05;

/// Display order and share of the channel height for one sub-view
///
/// `fraction > 0` means visible; `index` is the position in the stack from
/// top to bottom and is `-1` while hidden. The placement sequence is in
/// one-to-one correspondence with the owned sub-views, not in display
/// order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubViewPlacement {
    pub index: i32,
    pub fraction: f32,
}

impl SubViewPlacement {
    const HIDDEN: SubViewPlacement = SubViewPlacement {
        index: -1,
        fraction: 0.0,
    };

    #[inline]
    pub fn visible(&self) -> bool {
        self.fraction > 0.0
    }
}

/// Atomic unit of placement state for undo/redo
///
/// Opaque to callers; produced by [`ChannelView::save_placements`] and only
/// meaningful to a view whose sub-view set still matches.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSnapshot {
    placements: Vec<SubViewPlacement>,
}

/// Errors restoring a placement snapshot
#[derive(Error, Debug, PartialEq)]
pub enum PlacementError {
    /// The snapshot was taken from a view with a different sub-view set
    #[error("placement snapshot holds {snapshot} entries but the view has {actual} sub-views")]
    CardinalityMismatch { snapshot: usize, actual: usize },
}

/// The sub-view composition of one displayed audio channel
///
/// Attached to exactly one channel by id (a back-reference, never
/// ownership). The sub-view set is built lazily from the display
/// configuration the first time it is queried.
pub struct ChannelView {
    channel: ChannelId,
    registry: SubViewRegistry,
    config: DisplayConfig,
    sub_views: Vec<Box<dyn SubView>>,
    placements: Vec<SubViewPlacement>,
    multi_view: bool,
    built: bool,
    last_height: Cell<f32>,
    key_delegate: Option<SubViewId>,
    extensions: ExtensionTable,
}

impl ChannelView {
    /// Create a view for `channel` with the built-in sub-view kinds
    pub fn new(channel: ChannelId, config: DisplayConfig) -> Self {
        Self::with_registry(channel, config, SubViewRegistry::builtin())
    }

    /// Create a view with a custom sub-view registry
    pub fn with_registry(
        channel: ChannelId,
        config: DisplayConfig,
        registry: SubViewRegistry,
    ) -> Self {
        let multi_view = config.multi_view;
        Self {
            channel,
            registry,
            config,
            sub_views: Vec::new(),
            placements: Vec::new(),
            multi_view,
            built: false,
            last_height: Cell::new(0.0),
            key_delegate: None,
            extensions: ExtensionTable::new(),
        }
    }

    /// The channel this view is attached to
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// Height of the rectangle passed to the most recent layout query
    pub fn last_height(&self) -> f32 {
        self.last_height.get()
    }

    pub fn multi_view(&self) -> bool {
        self.multi_view
    }

    pub fn set_multi_view(&mut self, value: bool) {
        self.multi_view = value;
    }

    pub fn extensions(&self) -> &ExtensionTable {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionTable {
        &mut self.extensions
    }

    /// Build the sub-view set from the display configuration on first query
    fn ensure_built(&mut self) {
        if self.built {
            return;
        }
        self.built = true;
        for kind in self.config.effective_displays() {
            match self.registry.create(kind) {
                Some(sub_view) => {
                    let index = self.placements.len() as i32;
                    self.sub_views.push(sub_view);
                    self.placements.push(SubViewPlacement {
                        index,
                        fraction: 0.0,
                    });
                }
                None => log::warn!("no sub-view registered for {:?}", kind),
            }
        }
        let count = self.placements.len();
        if count == 0 {
            log::warn!("channel {} has no displayable sub-views", self.channel);
            return;
        }
        let share = 1.0 / count as f32;
        for placement in &mut self.placements {
            placement.fraction = share;
        }
    }

    fn visible_count(&self) -> usize {
        self.placements.iter().filter(|p| p.visible()).count()
    }

    fn find_or_create(&mut self, kind: DisplayKind) -> Option<usize> {
        if let Some(pos) = self.sub_views.iter().position(|sv| sv.kind() == kind) {
            return Some(pos);
        }
        match self.registry.create(kind) {
            Some(sub_view) => {
                self.sub_views.push(sub_view);
                self.placements.push(SubViewPlacement::HIDDEN);
                Some(self.sub_views.len() - 1)
            }
            None => {
                log::warn!("cannot activate unregistered display kind {:?}", kind);
                None
            }
        }
    }

    /// Make the sub-view at `pos` visible; idempotent
    ///
    /// The newcomer takes `1/N` of the height and the others shrink by
    /// `(N-1)/N`, which keeps the visible fractions summing to 1.0 without
    /// depending on the order activations happen in.
    fn activate(&mut self, pos: usize) {
        if self.placements[pos].visible() {
            return;
        }
        let visible = self.visible_count();
        let next_index = self
            .placements
            .iter()
            .filter(|p| p.visible())
            .map(|p| p.index)
            .max()
            .unwrap_or(-1)
            + 1;
        let scale = visible as f32 / (visible + 1) as f32;
        for placement in &mut self.placements {
            if placement.visible() {
                placement.fraction *= scale;
            }
        }
        self.placements[pos] = SubViewPlacement {
            index: next_index,
            fraction: 1.0 / (visible + 1) as f32,
        };
    }

    /// Hide the sub-view at `pos`, handing its height to the rest
    /// proportionally
    fn deactivate(&mut self, pos: usize) {
        self.placements[pos] = SubViewPlacement::HIDDEN;
        let remaining: f32 = self
            .placements
            .iter()
            .filter(|p| p.visible())
            .map(|p| p.fraction)
            .sum();
        let visible = self.visible_count();
        if visible == 0 {
            return;
        }
        if remaining > FRACTION_EPSILON {
            for placement in &mut self.placements {
                if placement.visible() {
                    placement.fraction /= remaining;
                }
            }
        } else {
            let share = 1.0 / visible as f32;
            for placement in &mut self.placements {
                if placement.visible() {
                    placement.fraction = share;
                }
            }
        }
    }

    /// Activate `kind`; when `exclusive`, collapse to it alone
    pub fn set_display(&mut self, kind: DisplayKind, exclusive: bool) {
        self.ensure_built();
        let Some(pos) = self.find_or_create(kind) else {
            return;
        };
        if exclusive {
            for (i, placement) in self.placements.iter_mut().enumerate() {
                *placement = if i == pos {
                    SubViewPlacement {
                        index: 0,
                        fraction: 1.0,
                    }
                } else {
                    SubViewPlacement::HIDDEN
                };
            }
        } else {
            self.activate(pos);
        }
    }

    /// Flip `kind` between visible and hidden
    ///
    /// Returns false and changes nothing when `kind` is the only visible
    /// sub-view: at least one must remain on screen.
    pub fn toggle_sub_view(&mut self, kind: DisplayKind) -> bool {
        self.ensure_built();
        match self.sub_views.iter().position(|sv| sv.kind() == kind) {
            Some(pos) if self.placements[pos].visible() => {
                if self.visible_count() <= 1 {
                    log::debug!("refusing to hide the only visible sub-view");
                    return false;
                }
                self.deactivate(pos);
                true
            }
            Some(pos) => {
                self.activate(pos);
                true
            }
            None => match self.find_or_create(kind) {
                Some(pos) => {
                    self.activate(pos);
                    true
                }
                None => false,
            },
        }
    }

    /// Active display kinds, top of the stack first
    pub fn displays(&mut self) -> Vec<DisplayKind> {
        self.ensure_built();
        let mut visible: Vec<(i32, DisplayKind)> = self
            .placements
            .iter()
            .zip(&self.sub_views)
            .filter(|(p, _)| p.visible())
            .map(|(p, sv)| (p.index, sv.kind()))
            .collect();
        visible.sort_by_key(|&(index, _)| index);
        visible.into_iter().map(|(_, kind)| kind).collect()
    }

    /// Ids of all owned sub-views, visible or not, in arena order
    ///
    /// The sequence is unspecified but in correspondence with
    /// [`save_placements`](Self::save_placements).
    pub fn all_sub_views(&mut self) -> Vec<SubViewId> {
        self.ensure_built();
        (0..self.sub_views.len()).map(SubViewId).collect()
    }

    /// Resolve a sub-view id; stale ids are absent, not errors
    pub fn sub_view(&self, id: SubViewId) -> Option<&dyn SubView> {
        self.sub_views.get(id.0).map(|b| b.as_ref())
    }

    pub fn sub_view_mut(&mut self, id: SubViewId) -> Option<&mut (dyn SubView + 'static)> {
        self.sub_views.get_mut(id.0).map(|b| b.as_mut())
    }

    /// Snapshot the placement sequence for undo/redo
    pub fn save_placements(&mut self) -> PlacementSnapshot {
        self.ensure_built();
        PlacementSnapshot {
            placements: self.placements.clone(),
        }
    }

    /// Replace the whole placement sequence from a snapshot
    ///
    /// Only valid for a snapshot taken from a matching sub-view set; a
    /// cardinality mismatch leaves the view unchanged. Callers restoring
    /// across display changes must rebuild the sub-view set first.
    pub fn restore_placements(
        &mut self,
        snapshot: &PlacementSnapshot,
    ) -> Result<(), PlacementError> {
        self.ensure_built();
        if snapshot.placements.len() != self.placements.len() {
            return Err(PlacementError::CardinalityMismatch {
                snapshot: snapshot.placements.len(),
                actual: self.placements.len(),
            });
        }
        self.placements = snapshot.placements.clone();
        Ok(())
    }

    /// Visible sub-views with their pixel sub-rectangles, stacked
    /// top-to-bottom within `rect`
    ///
    /// Each sub-view gets `round(fraction * rect.height)` pixels with the
    /// rounding remainder absorbed by the last one, so the stack fills
    /// `rect` exactly and repeated calls yield identical boundaries.
    pub fn sub_views(&mut self, rect: Rectangle) -> Vec<(SubViewId, Rectangle)> {
        self.ensure_built();
        self.layout_regions(rect)
    }

    /// Read-only variant of [`sub_views`](Self::sub_views) for draw and
    /// hit-test passes
    ///
    /// An unbuilt view lays out nothing; it becomes built through any of
    /// the mutating queries.
    pub fn layout_regions(&self, rect: Rectangle) -> Vec<(SubViewId, Rectangle)> {
        if !self.built {
            log::debug!("layout queried before the sub-view set was built");
            return Vec::new();
        }
        self.last_height.set(rect.height);

        let mut visible: Vec<(usize, i32, f32)> = self
            .placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.visible())
            .map(|(arena, p)| (arena, p.index, p.fraction))
            .collect();
        visible.sort_by_key(|&(_, index, _)| index);

        let mut regions = Vec::with_capacity(visible.len());
        let mut y = rect.y;
        let last = visible.len().saturating_sub(1);
        for (slot, &(arena, _, fraction)) in visible.iter().enumerate() {
            let height = if slot == last {
                rect.y + rect.height - y
            } else {
                (fraction * rect.height).round()
            };
            regions.push((
                SubViewId(arena),
                Rectangle {
                    x: rect.x,
                    y,
                    width: rect.width,
                    height,
                },
            ));
            y += height;
        }
        regions
    }

    /// Resize the boundary between two adjacent visible sub-views
    ///
    /// `delta` is a fraction of the channel height moved from `below` to
    /// `above` (negative to move the other way). Both stay at or above the
    /// minimum fraction; the visible sum is untouched.
    pub fn adjust_fractions(&mut self, above: SubViewId, below: SubViewId, delta: f32) {
        let (Some(&pa), Some(&pb)) = (self.placements.get(above.0), self.placements.get(below.0))
        else {
            return;
        };
        if !pa.visible() || !pb.visible() {
            return;
        }
        let delta = delta
            .min(pb.fraction - MIN_SUBVIEW_FRACTION)
            .max(MIN_SUBVIEW_FRACTION - pa.fraction);
        self.placements[above.0].fraction += delta;
        self.placements[below.0].fraction -= delta;
    }

    /// Move a visible sub-view to another slot in the stack, renumbering
    /// the display order
    pub fn move_sub_view(&mut self, id: SubViewId, to_slot: usize) {
        let mut order: Vec<usize> = {
            let mut visible: Vec<(usize, i32)> = self
                .placements
                .iter()
                .enumerate()
                .filter(|(_, p)| p.visible())
                .map(|(arena, p)| (arena, p.index))
                .collect();
            visible.sort_by_key(|&(_, index)| index);
            visible.into_iter().map(|(arena, _)| arena).collect()
        };
        let Some(from) = order.iter().position(|&arena| arena == id.0) else {
            return;
        };
        let arena = order.remove(from);
        order.insert(to_slot.min(order.len()), arena);
        for (slot, &arena) in order.iter().enumerate() {
            self.placements[arena].index = slot as i32;
        }
    }

    /// Walk the visible sub-views top to bottom, collecting handles
    ///
    /// Common affordances (close, rearrange, the separator strip) are
    /// offered first for each sub-view, then its own detailed hit test,
    /// confined to its sub-rectangle. Stops as soon as a sub-view reports
    /// it finished; ties between overlapping affordances go to the topmost
    /// sub-view because of the walk order.
    pub fn detailed_hit_test(
        &self,
        state: &MouseState,
        env: &ViewContext<'_>,
        rect: Rectangle,
    ) -> (bool, Vec<Handle>) {
        let regions = self.layout_regions(rect);
        let closable = regions.len() > 1;
        let mut handles = Vec::new();
        let mut above: Option<SubViewId> = None;
        for &(id, sub_rect) in &regions {
            if self.multi_view {
                self.affordance_hits(state, above, id, sub_rect, closable, &mut handles);
            }
            let (finished, mut found) =
                self.sub_views[id.0].detailed_hit_test(id, state, env, sub_rect);
            handles.append(&mut found);
            if finished {
                return (true, handles);
            }
            above = Some(id);
        }
        (false, handles)
    }

    /// Hits on the shared affordances of one sub-view
    fn affordance_hits(
        &self,
        state: &MouseState,
        above: Option<SubViewId>,
        id: SubViewId,
        rect: Rectangle,
        closable: bool,
        out: &mut Vec<Handle>,
    ) {
        let pos = state.position;
        if let Some(above) = above {
            let strip = Rectangle {
                x: rect.x,
                y: rect.y - SUBVIEW_SEPARATOR_THICKNESS / 2.0,
                width: rect.width,
                height: SUBVIEW_SEPARATOR_THICKNESS,
            };
            if strip.contains(pos) {
                out.push(Handle::Adjust { above, below: id });
            }
        }
        if closable {
            let close = Rectangle {
                x: rect.x,
                y: rect.y,
                width: CLOSE_BUTTON_SIZE,
                height: CLOSE_BUTTON_SIZE,
            };
            if close.contains(pos) {
                out.push(Handle::Close { subview: id });
            }
            let grab = Rectangle {
                x: rect.x,
                y: rect.y + CLOSE_BUTTON_SIZE,
                width: REARRANGE_STRIP_WIDTH,
                height: (rect.height - CLOSE_BUTTON_SIZE).max(0.0),
            };
            if grab.contains(pos) {
                out.push(Handle::Rearrange { subview: id });
            }
        }
    }

    /// Whether a key event would find a live delegate
    pub fn capture_key(&self, _event: &keyboard::Event) -> bool {
        self.key_delegate
            .map(|id| self.sub_view(id).is_some())
            .unwrap_or(false)
    }

    /// Forward a key event to the focused sub-view
    ///
    /// Unhandled when no delegate is set or the delegate went stale.
    pub fn key_down(&mut self, event: &keyboard::Event) -> bool {
        let Some(id) = self.key_delegate else {
            return false;
        };
        match self.sub_view_mut(id) {
            Some(sub_view) => sub_view.on_key(event),
            None => {
                log::debug!("key delegate {:?} is stale", id);
                false
            }
        }
    }

    pub fn set_key_delegate(&mut self, delegate: Option<SubViewId>) {
        self.key_delegate = delegate;
    }

    pub fn key_delegate(&self) -> Option<SubViewId> {
        self.key_delegate
    }

    /// Drop keyboard focus, notifying the delegate
    pub fn lose_focus(&mut self) {
        if let Some(id) = self.key_delegate.take() {
            if let Some(sub_view) = self.sub_view_mut(id) {
                sub_view.on_focus_lost();
            }
        }
    }

    /// Menu entries: one toggle per registered kind, the multi-view flag,
    /// then whatever the visible sub-views contribute
    pub fn menu_items(&mut self) -> Vec<MenuItem> {
        self.ensure_built();
        let displays = self.displays();
        let mut items: Vec<MenuItem> = self
            .registry
            .kinds()
            .map(|kind| MenuItem {
                label: kind.name(),
                action: MenuAction::ToggleDisplay(kind),
                checked: displays.contains(&kind),
            })
            .collect();
        items.push(MenuItem {
            label: "Multi-view",
            action: MenuAction::ToggleMultiView,
            checked: self.multi_view,
        });
        for (placement, sub_view) in self.placements.iter().zip(&self.sub_views) {
            if placement.visible() {
                items.extend(sub_view.menu_items());
            }
        }
        items
    }

    /// Copy display state into a new view attached to `channel`
    ///
    /// Used by undo snapshotting. Display selection, multi-view flag and
    /// placements are copied here; whatever a sub-view itself needs to
    /// preserve goes through its own copy hook.
    pub fn copy_to(&self, channel: ChannelId) -> ChannelView {
        let mut dest = ChannelView::with_registry(channel, self.config.clone(), self.registry.clone());
        dest.multi_view = self.multi_view;
        if !self.built {
            return dest;
        }
        dest.built = true;
        for (sub_view, placement) in self.sub_views.iter().zip(&self.placements) {
            match self.registry.create(sub_view.kind()) {
                Some(mut copy) => {
                    sub_view.copy_state_to(copy.as_mut());
                    dest.sub_views.push(copy);
                    dest.placements.push(*placement);
                }
                None => log::warn!(
                    "sub-view kind {:?} vanished from the registry during copy",
                    sub_view.kind()
                ),
            }
        }
        dest
    }
}

impl std::fmt::Debug for ChannelView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelView")
            .field("channel", &self.channel)
            .field("built", &self.built)
            .field("multi_view", &self.multi_view)
            .field("placements", &self.placements)
            .finish()
    }
}
