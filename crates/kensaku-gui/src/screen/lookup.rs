//! Debounced ID lookup page for one media kind.
//!
//! All decisions live in [`LookupState`]; this screen only turns its
//! commands into iced tasks. The quiescence timer is an abortable task
//! whose handle is dropped (and so aborted) on every new keystroke and
//! when the screen itself goes away.

use iced::task;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length, Task};

use kensaku_api::{JikanClient, MediaKind, MediaLookup, MediaRecord};
use kensaku_core::{
    Command, Event, FetchError, LookupSettings, LookupState, Outcome, RequestId, TimerToken,
};

use crate::app;
use crate::cover::{Cover, CoverState};
use crate::screen::{Action, Page};
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    ClearQuery,
    TimerElapsed {
        token: TimerToken,
        query: String,
    },
    Resolved {
        request: RequestId,
        id: u64,
        result: Result<MediaRecord, FetchError>,
    },
    Back,
}

pub struct Lookup {
    /// Distinguishes this page instance from earlier visits, so replies
    /// addressed to a torn-down page are dropped by the router.
    session: u64,
    state: LookupState,
    timer: Option<task::Handle>,
    cover: Cover,
}

impl Lookup {
    pub fn new(session: u64, kind: MediaKind, settings: LookupSettings) -> Self {
        Self {
            session,
            state: LookupState::new(kind, settings),
            timer: None,
            cover: Cover::default(),
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn update(&mut self, msg: Message, client: Option<&JikanClient>) -> Action {
        match msg {
            Message::QueryChanged(query) => self.run(Event::InputChanged(query), client),
            Message::ClearQuery => self.run(Event::InputChanged(String::new()), client),
            Message::TimerElapsed { token, query } => {
                let action = self.run(Event::TimerFired { token, query }, client);
                if !self.state.has_pending_timer() {
                    self.timer = None;
                }
                action
            }
            Message::Resolved {
                request,
                id,
                result,
            } => {
                let arrived = result.as_ref().ok().cloned();
                self.run(
                    Event::Resolved {
                        request,
                        id,
                        result,
                    },
                    client,
                );
                match arrived {
                    Some(record) if self.state.outcome().record() == Some(&record) => {
                        self.show_cover(request, record.image_url)
                    }
                    _ => Action::None,
                }
            }
            Message::Back => {
                self.timer = None;
                Action::NavigateTo(Page::Landing)
            }
        }
    }

    /// A cover download for `request` finished, or was refused.
    pub fn cover_loaded(
        &mut self,
        request: RequestId,
        result: Result<iced::widget::image::Handle, String>,
    ) {
        self.cover.finish(request, result);
    }

    fn show_cover(&mut self, request: RequestId, url: Option<String>) -> Action {
        match url {
            Some(url) => {
                self.cover.begin(request, CoverState::Loading);
                Action::RequestCover { request, url }
            }
            None => {
                self.cover.begin(request, CoverState::Unavailable);
                Action::None
            }
        }
    }

    fn run(&mut self, event: Event, client: Option<&JikanClient>) -> Action {
        let command = self.state.apply(event);
        if self.state.outcome().record().is_none() {
            self.cover.clear();
        }

        let task = match command {
            Command::None => return Action::None,
            Command::Schedule {
                token,
                delay,
                query,
            } => {
                let (task, handle) = Task::perform(
                    async move { tokio::time::sleep(delay).await },
                    move |()| Message::TimerElapsed { token, query },
                )
                .abortable();
                // Replacing the handle aborts the previous timer.
                self.timer = Some(handle.abort_on_drop());
                task
            }
            Command::Fetch { request, kind, id } => fetch(client, request, kind, id),
        };

        let session = self.session;
        Action::RunTask(task.map(move |msg| app::Message::Lookup(session, msg)))
    }

    pub fn view(&self, cs: &ColorScheme) -> Element<'_, Message> {
        let kind = self.state.kind();

        let back = button(
            row![
                lucide_icons::iced::icon_arrow_left().size(style::TEXT_BASE),
                text("Back").size(style::TEXT_SM),
            ]
            .spacing(style::SPACE_XS)
            .align_y(Alignment::Center),
        )
        .on_press(Message::Back)
        .padding([style::SPACE_XS, style::SPACE_MD])
        .style(theme::ghost_button(cs));

        let title = text(format!("Search {kind} ID"))
            .size(style::TEXT_2XL)
            .font(style::FONT_HEADING)
            .line_height(style::LINE_HEIGHT_TIGHT);

        let header = row![back, title]
            .spacing(style::SPACE_LG)
            .align_y(Alignment::Center);

        let body: Element<'_, Message> = match self.state.outcome() {
            Outcome::Idle => widgets::empty_state(
                cs,
                lucide_icons::iced::icon_search()
                    .size(style::TEXT_3XL)
                    .color(cs.outline)
                    .into(),
                format!("Look up {} by ID", kind.noun()),
                Some(format!(
                    "Type a MyAnimeList {} ID, e.g. {}",
                    kind.noun(),
                    example_ids(kind)
                )),
            ),
            Outcome::Pending { id } => widgets::empty_state(
                cs,
                lucide_icons::iced::icon_loader()
                    .size(style::TEXT_3XL)
                    .color(cs.primary)
                    .into(),
                format!("Looking up {kind} #{id}..."),
                None,
            ),
            Outcome::Found(record) => widgets::styled_scrollable(
                widgets::media_card(cs, record, self.cover.state()),
                cs,
            )
            .height(Length::Fill)
            .into(),
            Outcome::Failed(failure) => container(
                row![
                    lucide_icons::iced::icon_circle_alert()
                        .size(style::TEXT_LG)
                        .color(cs.error),
                    text(failure.to_string())
                        .size(style::TEXT_BASE)
                        .color(cs.error)
                        .line_height(style::LINE_HEIGHT_NORMAL),
                ]
                .spacing(style::SPACE_SM)
                .align_y(Alignment::Center),
            )
            .center_x(Length::Fill)
            .padding(style::SPACE_XL)
            .into(),
        };

        let page = column![header, self.search_bar(cs), body]
            .spacing(style::SPACE_LG)
            .max_width(style::CONTENT_MAX_WIDTH);

        container(page)
            .center_x(Length::Fill)
            .height(Length::Fill)
            .padding(style::SPACE_XL)
            .into()
    }

    fn search_bar(&self, cs: &ColorScheme) -> Element<'_, Message> {
        let kind = self.state.kind();
        let query = self.state.query();

        let search_icon = lucide_icons::iced::icon_search()
            .size(style::TEXT_BASE)
            .color(cs.on_surface_variant);

        let input = text_input(
            &format!("Enter {kind} ID (e.g., {})...", example_ids(kind)),
            query,
        )
        .on_input(Message::QueryChanged)
        .size(style::TEXT_BASE)
        .padding([style::SPACE_XS, style::SPACE_SM])
        .width(Length::Fill)
        .style(theme::text_input_borderless(cs));

        let mut search_row = row![search_icon, input]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center);

        if !query.is_empty() {
            let clear_size = style::TEXT_SM + style::SPACE_XS * 2.0;
            search_row = search_row.push(
                button(
                    container(
                        lucide_icons::iced::icon_x()
                            .size(style::TEXT_SM)
                            .color(cs.on_surface_variant),
                    )
                    .center_x(Length::Fill)
                    .center_y(Length::Fill),
                )
                .on_press(Message::ClearQuery)
                .padding(0)
                .width(Length::Fixed(clear_size))
                .height(Length::Fixed(clear_size))
                .style(theme::icon_button(cs)),
            );
        }

        container(search_row)
            .style(theme::search_bar(cs))
            .padding([style::SPACE_SM, style::SPACE_MD])
            .width(Length::Fill)
            .into()
    }
}

fn example_ids(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Anime => "1, 21, 5114",
        MediaKind::Manga => "1, 2, 13",
    }
}

fn fetch(
    client: Option<&JikanClient>,
    request: RequestId,
    kind: MediaKind,
    id: u64,
) -> Task<Message> {
    let Some(client) = client.cloned() else {
        return Task::done(Message::Resolved {
            request,
            id,
            result: Err(FetchError::Transport("HTTP client unavailable".into())),
        });
    };
    Task::perform(
        async move { client.lookup(kind, id).await.map_err(FetchError::from) },
        move |result| Message::Resolved {
            request,
            id,
            result,
        },
    )
}
