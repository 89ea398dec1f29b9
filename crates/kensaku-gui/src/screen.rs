pub mod landing;
pub mod lookup;

use iced::Task;

use kensaku_api::MediaKind;
use kensaku_core::RequestId;

use crate::app;

/// Which page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Landing,
    Lookup(MediaKind),
}

/// Actions that a screen can request from the app router.
///
/// Screens return these from `update()` instead of directly mutating
/// shared state. The app interprets them in one place.
pub enum Action {
    None,
    NavigateTo(Page),
    /// Run an async Iced task that eventually produces an app::Message.
    RunTask(Task<app::Message>),
    /// Download the cover for the record produced by `request`.
    RequestCover { request: RequestId, url: String },
}
