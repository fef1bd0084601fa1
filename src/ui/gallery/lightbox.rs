// SPDX-License-Identifier: MPL-2.0
//! Lightbox overlay: the open photo, prev/next/close controls and the
//! position counter, over a dimmed backdrop.

use super::{Message, ViewContext};
use crate::gallery::{InputEvent, Surface};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    button, image, mouse_area, responsive, Column, Container, Row, Space, Stack, Text,
};
use iced::{Background, Color, ContentFit, Element, Length, Size, Theme};

const BACKDROP_ALPHA: f32 = 0.9;
const CONTROL_SPACING: f32 = 16.0;
const OVERLAY_PADDING: f32 = 24.0;

/// Returns `None` while the modal is closed.
pub fn view<'a>(ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    ctx.viewer.modal_item()?;

    let backdrop = mouse_area(
        Container::new(Text::new(""))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme: &Theme| iced::widget::container::Style {
                background: Some(Background::Color(Color {
                    a: BACKDROP_ALPHA,
                    ..Color::BLACK
                })),
                ..Default::default()
            }),
    )
    .on_press(Message::Input(InputEvent::BackdropClicked));

    // The hit area is the fitted photo itself; the letterbox around it
    // belongs to the backdrop, so tapping there dismisses.
    let photo: Element<'a, Message> = match ctx.viewer.image_for_modal() {
        Some(data) => {
            let aspect_ratio = data.aspect_ratio();
            responsive(move |available: Size| {
                let fitted = fitted_size(available, aspect_ratio);
                let photo = image(data.handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fixed(fitted.width))
                    .height(Length::Fixed(fitted.height));
                let centered: Element<'a, Message> = Container::new(photo_surface(photo))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center)
                    .into();
                centered
            })
            .into()
        }
        // Still loading or failed: a neutral label, never an error.
        None => photo_surface(
            Container::new(Text::new(ctx.i18n.tr("gallery-loading")).color(Color::WHITE))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
        ),
    };

    let content = Column::new()
        .spacing(CONTROL_SPACING)
        .padding(OVERLAY_PADDING)
        .push(top_bar(ctx))
        .push(photo)
        .push(bottom_bar(ctx));

    Some(Stack::new().push(backdrop).push(content).into())
}

fn photo_surface<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    mouse_area(content)
        .on_press(Message::Pressed(Surface::ModalImage))
        .on_exit(Message::Exited)
        .on_right_press(Message::RightPressed(Surface::ModalImage))
        .into()
}

/// Largest size with `aspect_ratio` that fits inside `available`.
fn fitted_size(available: Size, aspect_ratio: f32) -> Size {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return available;
    }
    let width = available.width.min(available.height * aspect_ratio);
    Size::new(width, width / aspect_ratio)
}

fn top_bar<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let close = button(Text::new(ctx.i18n.tr("gallery-close")))
        .on_press(Message::Input(InputEvent::ClosePressed));

    Row::new()
        .push(Space::new().width(Length::Fill))
        .push(close)
        .into()
}

/// Controls are only shown when there is a photo in that direction.
fn bottom_bar<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let previous: Element<'a, Message> = if ctx.viewer.has_previous() {
        button(Text::new(ctx.i18n.tr("gallery-previous")))
            .on_press(Message::Input(InputEvent::PreviousPressed))
            .into()
    } else {
        Space::new().width(Length::Shrink).into()
    };
    let next: Element<'a, Message> = if ctx.viewer.has_next() {
        button(Text::new(ctx.i18n.tr("gallery-next")))
            .on_press(Message::Input(InputEvent::NextPressed))
            .into()
    } else {
        Space::new().width(Length::Shrink).into()
    };
    let counter = Text::new(ctx.viewer.position_label().unwrap_or_default()).color(Color::WHITE);

    Row::new()
        .spacing(CONTROL_SPACING)
        .align_y(Vertical::Center)
        .push(Container::new(previous).width(Length::Fill).align_x(Horizontal::Left))
        .push(counter)
        .push(Container::new(next).width(Length::Fill).align_x(Horizontal::Right))
        .into()
}
