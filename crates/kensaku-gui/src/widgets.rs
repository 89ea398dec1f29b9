pub mod empty_state;
pub mod media_card;
pub mod rounded_cover;

pub use empty_state::empty_state;
pub use media_card::media_card;
pub use rounded_cover::rounded_cover;

use iced::widget::scrollable;
use iced::Element;

use crate::theme::{self, ColorScheme};

/// A vertical scrollable with the overlay scrollbar style.
pub fn styled_scrollable<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    cs: &ColorScheme,
) -> scrollable::Scrollable<'a, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new()
                .width(6)
                .scroller_width(4)
                .margin(2),
        ))
        .style(theme::overlay_scrollbar(cs))
}
