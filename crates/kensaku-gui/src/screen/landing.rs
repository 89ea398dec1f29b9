use iced::widget::{button, center, column, container, row, text};
use iced::{Alignment, Element, Length};

use kensaku_api::MediaKind;

use crate::screen::{Action, Page};
use crate::style;
use crate::theme::{self, ColorScheme};

#[derive(Debug, Clone)]
pub enum Message {
    Choose(MediaKind),
}

/// Entry page: one large button per media kind.
#[derive(Debug, Default)]
pub struct Landing;

impl Landing {
    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::Choose(kind) => Action::NavigateTo(Page::Lookup(kind)),
        }
    }

    pub fn view(&self, cs: &ColorScheme) -> Element<'_, Message> {
        let heading = text("What are you looking for?")
            .size(style::TEXT_2XL)
            .font(style::FONT_HEADING)
            .line_height(style::LINE_HEIGHT_TIGHT);

        let choices = row(MediaKind::ALL.iter().map(|&kind| kind_button(cs, kind)))
            .spacing(style::SPACE_2XL)
            .align_y(Alignment::Center);

        center(
            column![heading, choices]
                .spacing(style::SPACE_3XL)
                .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }
}

fn kind_button<'a>(cs: &ColorScheme, kind: MediaKind) -> Element<'a, Message> {
    let icon = match kind {
        MediaKind::Anime => lucide_icons::iced::icon_tv(),
        MediaKind::Manga => lucide_icons::iced::icon_book_open(),
    };

    let label = column![
        icon.size(style::KIND_ICON_SIZE).color(cs.primary),
        text(kind.to_string().to_uppercase())
            .size(style::TEXT_3XL)
            .font(style::FONT_HEADING)
            .line_height(style::LINE_HEIGHT_TIGHT),
    ]
    .spacing(style::SPACE_MD)
    .align_x(Alignment::Center);

    button(
        container(label)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .on_press(Message::Choose(kind))
    .width(Length::Fixed(style::KIND_BUTTON_WIDTH))
    .height(Length::Fixed(style::KIND_BUTTON_HEIGHT))
    .style(theme::kind_button(cs))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choosing_navigates_to_lookup() {
        let mut landing = Landing;
        for &kind in MediaKind::ALL {
            let action = landing.update(Message::Choose(kind));
            assert!(matches!(action, Action::NavigateTo(Page::Lookup(k)) if k == kind));
        }
    }
}
