//! Canvas Program for the channel display
//!
//! Implements the iced canvas `Program` trait over a [`ChannelView`]: draw
//! composes the visible sub-views into the canvas bounds, mouse-down runs
//! the detailed hit test and publishes the topmost handle through a
//! callback closure.

use iced::widget::canvas::{self, Event, Frame, Geometry, Program};
use iced::{keyboard, mouse, Point, Rectangle, Size, Theme};

use super::handles::Handle;
use super::layout::ChannelView;
use super::subview::{MouseState, Tool, ViewContext};
use crate::theme;

/// Canvas state tracking keyboard modifiers between events
#[derive(Debug, Clone, Copy)]
pub struct ChannelInteraction {
    pub modifiers: keyboard::Modifiers,
}

impl Default for ChannelInteraction {
    fn default() -> Self {
        Self {
            modifiers: keyboard::Modifiers::empty(),
        }
    }
}

/// Canvas program rendering one channel's sub-view stack
///
/// Takes a callback closure `on_handle` that's called with the topmost
/// [`Handle`] when the user presses inside the canvas.
pub struct ChannelCanvas<'a, Message, F>
where
    F: Fn(Handle) -> Message,
{
    pub view: &'a ChannelView,
    pub env: ViewContext<'a>,
    pub tool: Tool,
    pub on_handle: F,
}

impl<'a, Message, F> ChannelCanvas<'a, Message, F>
where
    F: Fn(Handle) -> Message,
{
    /// Hit test at a canvas-relative position
    fn hit_at(&self, position: Point, modifiers: keyboard::Modifiers, bounds: Rectangle) -> Vec<Handle> {
        let state = MouseState {
            position,
            modifiers,
            tool: self.tool,
        };
        let layout = Rectangle::with_size(bounds.size());
        self.view.detailed_hit_test(&state, &self.env, layout).1
    }
}

impl<'a, Message, F> Program<Message> for ChannelCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(Handle) -> Message,
{
    type State = ChannelInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                interaction.modifiers = *modifiers;
                None
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                let handles = self.hit_at(position, interaction.modifiers, bounds);
                handles
                    .into_iter()
                    .next()
                    .map(|handle| canvas::Action::publish((self.on_handle)(handle)))
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if let Some(position) = cursor.position_in(bounds) {
            self.hit_at(position, interaction.modifiers, bounds)
                .first()
                .map(Handle::cursor)
                .unwrap_or_default()
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), theme::CHANNEL_BACKGROUND);

        let layout = Rectangle::with_size(bounds.size());
        let regions = self.view.layout_regions(layout);
        for &(id, sub_rect) in &regions {
            if let Some(sub_view) = self.view.sub_view(id) {
                sub_view.draw(&mut frame, &self.env, sub_rect);
            }
        }

        // Separator lines between stacked sub-views
        if self.view.multi_view() {
            for &(_, sub_rect) in regions.iter().skip(1) {
                frame.fill_rectangle(
                    Point::new(sub_rect.x, sub_rect.y - 0.5),
                    Size::new(sub_rect.width, 1.0),
                    theme::SEPARATOR_COLOR,
                );
            }
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::viewport::Viewport;
    use waveview_core::config::DisplayConfig;
    use waveview_core::{Clip, DisplayKind, SelectedRegion};

    #[derive(Debug, Clone, PartialEq)]
    enum Message {
        Grabbed(Handle),
    }

    fn bounds() -> Rectangle {
        Rectangle {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 100.0,
        }
    }

    fn built_view() -> ChannelView {
        let mut view = ChannelView::new(
            0,
            DisplayConfig {
                displays: vec![DisplayKind::Waveform],
                multi_view: false,
            },
        );
        view.all_sub_views();
        view
    }

    #[test]
    fn test_press_on_clip_publishes_a_handle() {
        let clips = [Clip::new(4, 0.0, 1000.0, 5000)];
        let view = built_view();
        let canvas = ChannelCanvas {
            view: &view,
            env: ViewContext::new(Viewport::new(0.0, 100.0), SelectedRegion::default(), &clips),
            tool: Tool::Selection,
            on_handle: Message::Grabbed,
        };
        let mut interaction = ChannelInteraction::default();
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let cursor = mouse::Cursor::Available(Point::new(200.0, 50.0));
        let action = canvas.update(&mut interaction, &event, bounds(), cursor);
        assert!(action.is_some(), "a press on a clip must publish its handle");
    }

    #[test]
    fn test_press_on_empty_space_publishes_nothing() {
        let view = built_view();
        let canvas = ChannelCanvas {
            view: &view,
            env: ViewContext::new(Viewport::new(0.0, 100.0), SelectedRegion::default(), &[]),
            tool: Tool::Selection,
            on_handle: Message::Grabbed,
        };
        let mut interaction = ChannelInteraction::default();
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let cursor = mouse::Cursor::Available(Point::new(200.0, 50.0));
        assert!(canvas
            .update(&mut interaction, &event, bounds(), cursor)
            .is_none());
    }

    #[test]
    fn test_cursor_outside_bounds_is_ignored() {
        let clips = [Clip::new(4, 0.0, 1000.0, 5000)];
        let view = built_view();
        let canvas = ChannelCanvas {
            view: &view,
            env: ViewContext::new(Viewport::new(0.0, 100.0), SelectedRegion::default(), &clips),
            tool: Tool::Selection,
            on_handle: Message::Grabbed,
        };
        let mut interaction = ChannelInteraction::default();
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        let cursor = mouse::Cursor::Available(Point::new(2000.0, 50.0));
        assert!(canvas
            .update(&mut interaction, &event, bounds(), cursor)
            .is_none());
    }

    #[test]
    fn test_hover_over_clip_edge_requests_resize_cursor() {
        let clips = [Clip::new(4, 1.0, 1000.0, 4000)]; // left edge at x=100
        let view = built_view();
        let canvas = ChannelCanvas {
            view: &view,
            env: ViewContext::new(Viewport::new(0.0, 100.0), SelectedRegion::default(), &clips),
            tool: Tool::Selection,
            on_handle: Message::Grabbed,
        };
        let interaction = ChannelInteraction::default();
        let cursor = mouse::Cursor::Available(Point::new(101.0, 50.0));
        assert_eq!(
            canvas.mouse_interaction(&interaction, bounds(), cursor),
            mouse::Interaction::ResizingHorizontally
        );
    }
}
