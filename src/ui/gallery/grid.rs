// SPDX-License-Identifier: MPL-2.0
//! Thumbnail grid.
//!
//! Cells whose thumbnail has not loaded (or failed) render as a plain tile;
//! load failures are never surfaced to the guest.

use super::{Message, ViewContext, GRID_PADDING, GRID_SPACING};
use crate::gallery::Surface;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::scrollable::Viewport;
use iced::widget::{image, mouse_area, Column, Container, Row, Scrollable, Text};
use iced::{Background, Color, ContentFit, Element, Length, Theme};

const PLACEHOLDER_COLOR: Color = Color {
    r: 0.93,
    g: 0.91,
    b: 0.89,
    a: 1.0,
};

pub fn view<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let items = ctx.viewer.items();
    if items.is_empty() {
        return Container::new(Text::new(ctx.i18n.tr("gallery-empty")).size(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into();
    }

    let columns = usize::from(ctx.layout.columns.max(1));
    let mut rows = Column::new().spacing(GRID_SPACING);
    let mut cells = (0..items.len()).map(|index| cell(ctx, index)).peekable();
    while cells.peek().is_some() {
        let row = cells
            .by_ref()
            .take(columns)
            .fold(Row::new().spacing(GRID_SPACING), |row, cell| row.push(cell));
        rows = rows.push(row);
    }

    // Cell bounds are computed from the top-left of the padded grid, so the
    // title stays outside the scrollable.
    let grid = Scrollable::new(Container::new(rows).padding(GRID_PADDING))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| Message::Scrolled(viewport));

    Column::new()
        .push(
            Container::new(Text::new(ctx.i18n.tr("gallery-title")).size(22))
                .padding(GRID_PADDING),
        )
        .push(grid)
        .into()
}

fn cell<'a>(ctx: &ViewContext<'a>, index: usize) -> Element<'a, Message> {
    let size = Length::Fixed(ctx.layout.cell_size);
    let surface = Surface::Thumbnail(index);

    let content: Element<'a, Message> = match ctx.viewer.thumbnail(index) {
        Some(data) => image(data.handle)
            .width(size)
            .height(size)
            .content_fit(ContentFit::Cover)
            .into(),
        None => Container::new(Text::new(""))
            .width(size)
            .height(size)
            .style(|_theme: &Theme| iced::widget::container::Style {
                background: Some(Background::Color(PLACEHOLDER_COLOR)),
                ..Default::default()
            })
            .into(),
    };

    mouse_area(content)
        .on_press(Message::Pressed(surface))
        .on_exit(Message::Exited)
        .on_right_press(Message::RightPressed(surface))
        .into()
}
