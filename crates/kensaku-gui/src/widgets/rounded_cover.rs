use iced::widget::{container, image};
use iced::{ContentFit, Element, Length};

use crate::cover::CoverState;
use crate::style;
use crate::theme::{self, ColorScheme};

/// Cover image with rounded corners, or a framed placeholder icon.
pub fn rounded_cover<'a, Message: 'static>(
    cs: &ColorScheme,
    state: Option<&CoverState>,
) -> Element<'a, Message> {
    let (width, height) = (style::COVER_WIDTH, style::COVER_HEIGHT);
    let frame = |content: Element<'a, Message>| {
        container(content)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(height))
            .style(theme::cover_placeholder(cs, style::RADIUS_LG))
    };

    match state {
        Some(CoverState::Loaded(handle)) => frame(
            image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .border_radius(style::RADIUS_LG)
                .into(),
        )
        .into(),
        Some(CoverState::Loading) => frame(
            lucide_icons::iced::icon_loader()
                .size(style::TEXT_XL)
                .color(cs.outline)
                .into(),
        )
        .into(),
        _ => frame(
            lucide_icons::iced::icon_image_off()
                .size(style::TEXT_3XL)
                .color(cs.outline)
                .into(),
        )
        .into(),
    }
}
