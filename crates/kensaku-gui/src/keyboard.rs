//! Global keyboard shortcuts.

use iced::keyboard;
use iced::Subscription;

use kensaku_api::MediaKind;

use crate::app::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Escape: back to the landing page.
    Back,
    /// Ctrl+1 / Ctrl+2: open the anime or manga lookup.
    Open(MediaKind),
}

pub fn keyboard_subscription() -> Subscription<Message> {
    iced::event::listen_with(|event, _status, _id| match event {
        iced::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            map_shortcut(key, modifiers).map(Message::Shortcut)
        }
        _ => None,
    })
}

fn map_shortcut(key: keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Shortcut> {
    use keyboard::key::Named;
    use keyboard::Key;

    match key {
        Key::Named(Named::Escape) => Some(Shortcut::Back),
        Key::Character(ref c) if modifiers.control() => match c.as_str() {
            "1" => Some(Shortcut::Open(MediaKind::Anime)),
            "2" => Some(Shortcut::Open(MediaKind::Manga)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use iced::keyboard::key::Named;
    use iced::keyboard::{Key, Modifiers};

    #[test]
    fn test_escape_goes_back() {
        assert_eq!(
            map_shortcut(Key::Named(Named::Escape), Modifiers::empty()),
            Some(Shortcut::Back)
        );
    }

    #[test]
    fn test_ctrl_digits_open_kinds() {
        assert_eq!(
            map_shortcut(Key::Character("2".into()), Modifiers::CTRL),
            Some(Shortcut::Open(MediaKind::Manga))
        );
        assert_eq!(map_shortcut(Key::Character("2".into()), Modifiers::empty()), None);
        assert_eq!(map_shortcut(Key::Character("3".into()), Modifiers::CTRL), None);
    }
}
