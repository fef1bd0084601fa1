// SPDX-License-Identifier: MPL-2.0
//! Turns widget and window pointer events into gallery input events.
//!
//! A `mouse_area` knows which surface was pressed but not where, while the
//! window event stream (`CursorMoved`, `ButtonPressed`, `FingerPressed`,
//! `FingerMoved`) knows where but not what. The tracker pairs the two halves
//! of a press, in whichever order they arrive, and reports every position in
//! window coordinates.

use crate::gallery::{Contacts, InputEvent, Surface};
use iced::touch::Finger;
use iced::Point;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    position: Point,
    source: Source,
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    cursor: Point,
    /// Surface reported by a widget, waiting for its window-level press.
    pending_surface: Option<Surface>,
    /// Window-level press, waiting for a widget to name its surface.
    pending_press: Option<Press>,
    active: Option<Source>,
    fingers: HashSet<Finger>,
}

impl PointerTracker {
    fn contacts(&self) -> Contacts {
        Contacts::new(u8::try_from(self.fingers.len().max(1)).unwrap_or(u8::MAX))
    }

    /// A widget saw a press on `surface`.
    pub fn surface_pressed(&mut self, surface: Surface) -> Option<InputEvent> {
        match self.pending_press.take() {
            Some(press) => Some(self.begin(surface, press)),
            None => {
                self.pending_surface = Some(surface);
                None
            }
        }
    }

    pub fn cursor_moved(&mut self, position: Point) -> Option<InputEvent> {
        self.cursor = position;
        self.active.map(|_| InputEvent::PointerMoved {
            position,
            contacts: self.contacts(),
        })
    }

    /// Left button went down at the last known cursor position.
    pub fn mouse_pressed(&mut self) -> Option<InputEvent> {
        self.locate(Press {
            position: self.cursor,
            source: Source::Mouse,
        })
    }

    pub fn mouse_released(&mut self) -> Option<InputEvent> {
        self.release()
    }

    /// A finger touched down; a second finger reports a pinch.
    pub fn finger_pressed(&mut self, finger: Finger, position: Point) -> Option<InputEvent> {
        self.fingers.insert(finger);
        self.cursor = position;
        if let Some(event) = self.locate(Press {
            position,
            source: Source::Touch,
        }) {
            return Some(event);
        }
        let contacts = self.contacts();
        contacts
            .is_multi_touch()
            .then_some(InputEvent::PointerMoved { position, contacts })
    }

    pub fn finger_moved(&mut self, _finger: Finger, position: Point) -> Option<InputEvent> {
        self.cursor_moved(position)
    }

    /// Ends the interaction once the last finger is up.
    pub fn finger_lifted(&mut self, finger: Finger) -> Option<InputEvent> {
        self.fingers.remove(&finger);
        if self.fingers.is_empty() {
            self.release()
        } else {
            None
        }
    }

    /// The cursor left a surface. Only mouse drags are cancelled; a finger
    /// sliding off the photo is still swiping.
    pub fn exited(&mut self) -> Option<InputEvent> {
        if self.active != Some(Source::Mouse) {
            return None;
        }
        self.active = None;
        Some(InputEvent::PointerLeft)
    }

    fn locate(&mut self, press: Press) -> Option<InputEvent> {
        match self.pending_surface.take() {
            Some(surface) => Some(self.begin(surface, press)),
            None => {
                self.pending_press = Some(press);
                None
            }
        }
    }

    fn begin(&mut self, surface: Surface, press: Press) -> InputEvent {
        self.cursor = press.position;
        self.active = Some(press.source);
        InputEvent::PointerDown {
            surface,
            position: press.position,
            contacts: self.contacts(),
        }
    }

    fn release(&mut self) -> Option<InputEvent> {
        self.pending_surface = None;
        self.pending_press = None;
        self.active.take().map(|_| InputEvent::PointerUp {
            position: self.cursor,
        })
    }
}
