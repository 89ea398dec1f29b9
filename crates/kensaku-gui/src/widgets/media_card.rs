use iced::widget::{column, container, row, text};
use iced::{Alignment, Element, Length};

use kensaku_api::MediaRecord;

use crate::cover::CoverState;
use crate::format;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets::rounded_cover;

/// The looked-up record: cover, title, field rows, then the synopsis.
pub fn media_card<'a, Message: 'static>(
    cs: &ColorScheme,
    record: &'a MediaRecord,
    cover: Option<&CoverState>,
) -> Element<'a, Message> {
    let title = text(record.title.as_str())
        .size(style::TEXT_XL)
        .font(style::FONT_HEADING)
        .line_height(style::LINE_HEIGHT_TIGHT);

    let id_line = text(format!("{} #{}", record.kind, record.id))
        .size(style::TEXT_XS)
        .color(cs.outline)
        .line_height(style::LINE_HEIGHT_LOOSE);

    let fields = column(
        format::fields(record)
            .into_iter()
            .map(|(label, value)| field(cs, label, value)),
    )
    .spacing(style::SPACE_XS);

    let header = row![
        rounded_cover(cs, cover),
        column![title, id_line, fields]
            .spacing(style::SPACE_SM)
            .width(Length::Fill),
    ]
    .spacing(style::SPACE_LG)
    .align_y(Alignment::Start);

    let synopsis = column![
        text("Synopsis")
            .size(style::TEXT_SM)
            .font(style::FONT_HEADING)
            .color(cs.on_surface_variant),
        text(format::synopsis(record.synopsis.as_deref()))
            .size(style::TEXT_BASE)
            .line_height(style::LINE_HEIGHT_NORMAL),
    ]
    .spacing(style::SPACE_XS);

    container(column![header, synopsis].spacing(style::SPACE_LG))
        .style(theme::card(cs))
        .padding(style::SPACE_LG)
        .width(Length::Fill)
        .into()
}

fn field<'a, Message: 'static>(
    cs: &ColorScheme,
    label: &'static str,
    value: String,
) -> Element<'a, Message> {
    container(
        row![
            text(label)
                .size(style::TEXT_SM)
                .color(cs.on_surface_variant)
                .width(Length::Fixed(style::FIELD_LABEL_WIDTH)),
            text(value)
                .size(style::TEXT_BASE)
                .line_height(style::LINE_HEIGHT_NORMAL),
        ]
        .spacing(style::SPACE_SM)
        .align_y(Alignment::Center),
    )
    .style(theme::field_row(cs))
    .padding([style::SPACE_XS, style::SPACE_MD])
    .width(Length::Fill)
    .into()
}
