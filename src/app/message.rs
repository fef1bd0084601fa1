// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::gallery;
use iced::touch::Finger;
use iced::{window, Point, Size};

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    /// Pointer events from the window, in window coordinates.
    CursorMoved(Point),
    MousePressed,
    MouseReleased,
    FingerPressed(Finger, Point),
    FingerMoved(Finger, Point),
    FingerLifted(Finger),
    WindowResized(Size),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `ko`, `en-US`).
    pub lang: Option<String>,
    /// A photo directory, or the photos themselves in display order.
    pub sources: Vec<String>,
}
