// SPDX-License-Identifier: MPL-2.0
//! Gallery screen: the thumbnail grid with the lightbox stacked on top.

pub mod grid;
pub mod lightbox;
pub mod pointer;

use crate::gallery::{GalleryViewer, GridLayout, InputEvent, Surface};
use crate::i18n::fluent::I18n;
use iced::widget::scrollable::Viewport;
use iced::widget::Stack;
use iced::Element;

pub use pointer::PointerTracker;

/// Spacing between grid cells and around the grid.
pub const GRID_SPACING: f32 = 6.0;
pub const GRID_PADDING: f32 = 12.0;

#[derive(Debug, Clone)]
pub enum Message {
    /// Already a gallery input; forwarded as is.
    Input(InputEvent),
    Pressed(Surface),
    Exited,
    RightPressed(Surface),
    Scrolled(Viewport),
}

pub struct ViewContext<'a> {
    pub viewer: &'a GalleryViewer,
    pub i18n: &'a I18n,
    pub layout: GridLayout,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let grid = grid::view(&ctx);
    match lightbox::view(&ctx) {
        Some(overlay) => Stack::new().push(grid).push(overlay).into(),
        None => grid,
    }
}
