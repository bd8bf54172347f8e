//! Channel view function
//!
//! Creates the channel display element using the iced 0.14 pattern: a plain
//! function taking state references and callback closures, returning an
//! `Element`.

use iced::widget::Canvas;
use iced::{Element, Length};

use super::canvas::ChannelCanvas;
use super::handles::Handle;
use super::layout::ChannelView;
use super::subview::{Tool, ViewContext};

/// Create a channel display element
///
/// # Arguments
///
/// * `view` - The channel's sub-view composition (built in the update loop)
/// * `env` - Viewport, selection and clips for this frame
/// * `tool` - Active tool, consulted by hit-testing
/// * `height` - Channel height in pixels
/// * `on_handle` - Callback called with the topmost [`Handle`] on press
///
/// # Example
///
/// ```ignore
/// let channel = channel_view(
///     &self.channel_view,
///     ViewContext::new(self.viewport, self.selection, &self.clips),
///     self.tool,
///     240.0,
///     Message::ChannelHandle,
/// );
/// ```
pub fn channel_view<'a, Message>(
    view: &'a ChannelView,
    env: ViewContext<'a>,
    tool: Tool,
    height: f32,
    on_handle: impl Fn(Handle) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(ChannelCanvas {
        view,
        env,
        tool,
        on_handle,
    })
    .width(Length::Fill)
    .height(Length::Fixed(height))
    .into()
}
