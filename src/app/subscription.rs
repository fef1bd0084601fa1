// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Window, mouse and touch events are always routed; the pointer ones feed
//! the `PointerTracker` with window coordinates. Keyboard input is only
//! subscribed to while the lightbox is open, so arrow keys and Escape are
//! left alone the rest of the time.

use super::Message;
use crate::gallery::{InputEvent, Key};
use crate::ui::gallery;
use iced::keyboard::{self, key::Named};
use iced::{event, mouse, touch, window, Subscription};

/// Window lifecycle and pointer tracking.
///
/// Pointer events are routed even when a widget captured them: the
/// `mouse_area` that handled the press only knows the surface, not where.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size)),
        event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::CursorMoved(position))
        }
        event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(Message::MousePressed)
        }
        event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::MouseReleased)
        }
        event::Event::Touch(touch::Event::FingerPressed { id, position }) => {
            Some(Message::FingerPressed(id, position))
        }
        event::Event::Touch(touch::Event::FingerMoved { id, position }) => {
            Some(Message::FingerMoved(id, position))
        }
        event::Event::Touch(
            touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. },
        ) => Some(Message::FingerLifted(id)),
        _ => None,
    })
}

/// Global keyboard listener, active only while `listening`.
pub fn create_keyboard_subscription(listening: bool) -> Subscription<Message> {
    if !listening {
        return Subscription::none();
    }

    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }
        let event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event else {
            return None;
        };
        let key = map_key(&key)?;
        Some(Message::Gallery(gallery::Message::Input(
            InputEvent::KeyPressed(key),
        )))
    })
}

fn map_key(key: &keyboard::Key) -> Option<Key> {
    match key {
        keyboard::Key::Named(Named::ArrowLeft) => Some(Key::ArrowLeft),
        keyboard::Key::Named(Named::ArrowRight) => Some(Key::ArrowRight),
        keyboard::Key::Named(Named::Escape) => Some(Key::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_gallery_keys_are_mapped() {
        assert_eq!(
            map_key(&keyboard::Key::Named(Named::ArrowRight)),
            Some(Key::ArrowRight)
        );
        assert_eq!(
            map_key(&keyboard::Key::Named(Named::Escape)),
            Some(Key::Escape)
        );
        assert_eq!(map_key(&keyboard::Key::Named(Named::Enter)), None);
        assert_eq!(map_key(&keyboard::Key::Character("a".into())), None);
    }
}
