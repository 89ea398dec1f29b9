use std::time::Duration;

use iced::widget::{container, image};
use iced::{Element, Length, Subscription, Task, Theme};

use kensaku_api::JikanClient;
use kensaku_core::config::{AppConfig, ThemeMode};
use kensaku_core::images::ImagePolicy;
use kensaku_core::{LookupSettings, RequestId};

use crate::cover;
use crate::keyboard::{self, Shortcut};
use crate::screen::{landing, lookup, Action, Page};
use crate::theme::{self, KensakuTheme};

/// How often the OS appearance is re-read while following the system theme.
const SYSTEM_THEME_POLL: Duration = Duration::from_secs(5);

/// Startup inputs resolved from the command line and config file.
#[derive(Debug, Clone)]
pub struct Boot {
    pub config: AppConfig,
    pub start: Page,
}

/// Application state: slim router that delegates to screens.
pub struct Kensaku {
    page: Page,
    config: AppConfig,
    client: Option<JikanClient>,
    http: Option<reqwest::Client>,
    images: ImagePolicy,
    // Theme
    current_theme: KensakuTheme,
    active_mode: ThemeMode,
    // Screens
    landing: landing::Landing,
    lookup: Option<lookup::Lookup>,
    sessions: u64,
}

#[derive(Debug, Clone)]
pub enum Message {
    Landing(landing::Message),
    /// A lookup-page message, tagged with the page session it belongs to.
    Lookup(u64, lookup::Message),
    CoverLoaded {
        session: u64,
        request: RequestId,
        result: Result<image::Handle, String>,
    },
    Shortcut(Shortcut),
    SystemThemeTick,
}

impl Kensaku {
    pub fn new(boot: Boot) -> (Self, Task<Message>) {
        let Boot { config, start } = boot;

        let client = match JikanClient::new(&config.api.base_url, config.api.timeout()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(error = %e, "failed to build API client");
                None
            }
        };
        let http = match reqwest::Client::builder()
            .timeout(config.api.timeout())
            .build()
        {
            Ok(http) => Some(http),
            Err(e) => {
                tracing::error!(error = %e, "failed to build image client");
                None
            }
        };

        let mut app = Self {
            page: Page::Landing,
            images: ImagePolicy::from_config(&config.images),
            current_theme: KensakuTheme::default_theme(),
            active_mode: theme::resolve_mode(config.appearance.mode),
            config,
            client,
            http,
            landing: landing::Landing,
            lookup: None,
            sessions: 0,
        };
        app.navigate(start);
        (app, Task::none())
    }

    pub fn title(&self) -> String {
        match self.page {
            Page::Landing => String::from("Kensaku"),
            Page::Lookup(kind) => format!("Kensaku - {kind} lookup"),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Landing(msg) => {
                let action = self.landing.update(msg);
                self.handle_action(action)
            }
            Message::Lookup(session, msg) => match live(&mut self.lookup, session) {
                Some(screen) => {
                    let action = screen.update(msg, self.client.as_ref());
                    self.handle_action(action)
                }
                None => {
                    tracing::debug!(session, "dropping message for closed lookup page");
                    Task::none()
                }
            },
            Message::CoverLoaded {
                session,
                request,
                result,
            } => {
                if let Some(screen) = live(&mut self.lookup, session) {
                    screen.cover_loaded(request, result);
                }
                Task::none()
            }
            Message::Shortcut(Shortcut::Back) => {
                self.navigate(Page::Landing);
                Task::none()
            }
            Message::Shortcut(Shortcut::Open(kind)) => {
                self.navigate(Page::Lookup(kind));
                Task::none()
            }
            Message::SystemThemeTick => {
                self.active_mode = theme::resolve_mode(self.config.appearance.mode);
                Task::none()
            }
        }
    }

    /// Switch pages. Entering a lookup page always starts a fresh session;
    /// leaving one drops it, which aborts its pending timer.
    fn navigate(&mut self, page: Page) {
        if page == self.page && self.lookup.is_some() {
            return;
        }
        self.lookup = match page {
            Page::Landing => None,
            Page::Lookup(kind) => {
                self.sessions += 1;
                Some(lookup::Lookup::new(
                    self.sessions,
                    kind,
                    LookupSettings::from(&self.config.search),
                ))
            }
        };
        tracing::debug!(?page, session = self.sessions, "navigate");
        self.page = page;
    }

    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::NavigateTo(page) => {
                self.navigate(page);
                Task::none()
            }
            Action::RunTask(task) => task,
            Action::RequestCover { request, url } => self.request_cover(request, url),
        }
    }

    /// Download a cover into memory if its host is on the allow-list.
    fn request_cover(&mut self, request: RequestId, url: String) -> Task<Message> {
        let Some(screen) = self.lookup.as_mut() else {
            return Task::none();
        };
        let session = screen.session();

        let http = match &self.http {
            Some(http) if self.images.permits(&url) => http.clone(),
            Some(_) => {
                tracing::warn!(%url, "cover host not allowed");
                screen.cover_loaded(request, Err("host not allowed".into()));
                return Task::none();
            }
            None => {
                screen.cover_loaded(request, Err("no HTTP client".into()));
                return Task::none();
            }
        };

        Task::perform(cover::fetch_cover(http, url), move |result| {
            Message::CoverLoaded {
                session,
                request,
                result,
            }
        })
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = self.current_theme.colors(self.active_mode);

        let content: Element<'_, Message> = match (&self.page, &self.lookup) {
            (Page::Lookup(_), Some(screen)) => {
                let session = screen.session();
                screen
                    .view(cs)
                    .map(move |msg| Message::Lookup(session, msg))
            }
            _ => self.landing.view(cs).map(Message::Landing),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::keyboard_subscription();
        if self.config.appearance.mode == ThemeMode::System {
            Subscription::batch([
                keys,
                iced::time::every(SYSTEM_THEME_POLL).map(|_| Message::SystemThemeTick),
            ])
        } else {
            keys
        }
    }

    pub fn theme(&self) -> Theme {
        self.current_theme.iced_theme(self.active_mode)
    }
}

/// The open lookup page, if `session` is still the one on screen.
fn live(lookup: &mut Option<lookup::Lookup>, session: u64) -> Option<&mut lookup::Lookup> {
    lookup.as_mut().filter(|screen| screen.session() == session)
}
