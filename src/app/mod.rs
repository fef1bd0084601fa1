// SPDX-License-Identifier: MPL-2.0
//! Application root state and the bridge between Iced and the gallery core.
//!
//! The `App` struct owns the [`GalleryViewer`] and translates widget and
//! window messages into gallery [`InputEvent`]s. Everything the viewer asks
//! to happen later ([`Effect`]s) becomes an Iced [`Task`]: image loads are
//! driven to completion and timers are `tokio` sleeps that report back.

mod message;
pub mod paths;
mod subscription;

pub use message::{Flags, Message};

use crate::config::{self, GallerySettings};
use crate::gallery::{Effect, GalleryItems, GalleryViewer, GridLayout, InputEvent};
use crate::i18n::fluent::I18n;
use crate::media::{AssetLoader, ImageCache};
use crate::ui::gallery::{self as gallery_view, PointerTracker, GRID_PADDING, GRID_SPACING};
use iced::{window, Element, Point, Rectangle, Size, Subscription, Task, Vector};
use std::fmt;
use std::path::Path;
use std::time::Instant;

pub const WINDOW_DEFAULT_HEIGHT: u32 = 820;
pub const WINDOW_DEFAULT_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 320;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    viewer: GalleryViewer,
    pointer: PointerTracker,
    layout: GridLayout,
    window_size: Size,
    scroll_offset: Vector,
    /// Localization key of a problem found while loading the config.
    config_warning: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("modal", &self.viewer.modal())
            .field("items", &self.viewer.items().len())
            .field("window_size", &self.window_size)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        // Close goes through `WindowCloseRequested` so timers are torn down first.
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot function; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Builds the photo list from CLI sources.
///
/// A single directory is scanned; anything else is taken as the list of
/// photos in display order.
pub fn gallery_items(sources: &[String]) -> GalleryItems {
    match sources {
        [single] if Path::new(single).is_dir() => {
            match GalleryItems::scan_directory(Path::new(single)) {
                Ok(items) => items,
                Err(err) => {
                    tracing::error!(directory = %single, "failed to scan photo directory: {err}");
                    GalleryItems::default()
                }
            }
        }
        ids => GalleryItems::from_ids(ids.iter().map(String::as_str)),
    }
}

impl App {
    /// Loads config and localization, builds the viewer and kicks off the
    /// thumbnail warm-up.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let settings = config.settings();

        let items = gallery_items(&flags.sources);
        tracing::info!(photos = items.len(), "gallery ready");

        let cache = ImageCache::new(AssetLoader::default());
        let window_size = Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32);
        let mut app = App {
            i18n,
            viewer: GalleryViewer::new(items, cache, settings),
            pointer: PointerTracker::default(),
            layout: grid_layout(window_size.width, &settings),
            window_size,
            scroll_offset: Vector::new(0.0, 0.0),
            config_warning,
        };
        app.viewer.layout_grid(&app.layout);

        let mut effects = app.viewer.warm_up();
        effects.extend(app.dispatch(InputEvent::ViewportChanged(app.visible_grid())));
        (app, run_effects(effects))
    }

    fn title(&self) -> String {
        match self.viewer.position_label() {
            Some(position) => format!("{} ({position})", self.i18n.tr("gallery-title")),
            None => self.i18n.tr("gallery-title"),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_keyboard_subscription(self.viewer.is_listening()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Gallery(message) => self.handle_gallery_message(message),
            Message::CursorMoved(position) => {
                let event = self.pointer.cursor_moved(position);
                self.forward(event)
            }
            Message::MousePressed => {
                let event = self.pointer.mouse_pressed();
                self.forward(event)
            }
            Message::MouseReleased => {
                let event = self.pointer.mouse_released();
                self.forward(event)
            }
            Message::FingerPressed(finger, position) => {
                let event = self.pointer.finger_pressed(finger, position);
                self.forward(event)
            }
            Message::FingerMoved(finger, position) => {
                let event = self.pointer.finger_moved(finger, position);
                self.forward(event)
            }
            Message::FingerLifted(finger) => {
                let event = self.pointer.finger_lifted(finger);
                self.forward(event)
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                self.layout = grid_layout(size.width, self.viewer.settings());
                self.viewer.layout_grid(&self.layout);
                run_effects(self.dispatch(InputEvent::ViewportChanged(self.visible_grid())))
            }
            Message::WindowCloseRequested(id) => {
                self.viewer.teardown();
                window::close(id)
            }
        }
    }

    fn handle_gallery_message(&mut self, message: gallery_view::Message) -> Task<Message> {
        let event = match message {
            gallery_view::Message::Input(event) => Some(event),
            gallery_view::Message::Pressed(surface) => self.pointer.surface_pressed(surface),
            gallery_view::Message::Exited => self.pointer.exited(),
            gallery_view::Message::RightPressed(surface) => Some(InputEvent::ContextMenu(surface)),
            gallery_view::Message::Scrolled(viewport) => {
                let offset = viewport.absolute_offset();
                self.scroll_offset = Vector::new(offset.x, offset.y);
                Some(InputEvent::ViewportChanged(self.visible_grid()))
            }
        };

        self.forward(event)
    }

    fn forward(&mut self, event: Option<InputEvent>) -> Task<Message> {
        match event {
            Some(event) => run_effects(self.dispatch(event)),
            None => Task::none(),
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> Vec<Effect> {
        let response = self.viewer.dispatch(event, Instant::now());
        response.effects
    }

    /// The visible part of the grid, in the grid's own coordinates.
    fn visible_grid(&self) -> Rectangle {
        Rectangle::new(
            Point::new(
                self.scroll_offset.x - GRID_PADDING,
                self.scroll_offset.y - GRID_PADDING,
            ),
            self.window_size,
        )
    }

    fn view(&self) -> Element<'_, Message> {
        let gallery = gallery_view::view(gallery_view::ViewContext {
            viewer: &self.viewer,
            i18n: &self.i18n,
            layout: self.layout,
        })
        .map(Message::Gallery);

        match &self.config_warning {
            Some(key) => iced::widget::Column::new()
                .push(iced::widget::Text::new(self.i18n.tr(key)).size(12))
                .push(gallery)
                .into(),
            None => gallery,
        }
    }
}

fn grid_layout(window_width: f32, settings: &GallerySettings) -> GridLayout {
    GridLayout::fit(
        window_width - 2.0 * GRID_PADDING,
        settings.columns,
        GRID_SPACING,
    )
}

/// Turns gallery effects into Iced tasks that report back as messages.
fn run_effects(effects: Vec<Effect>) -> Task<Message> {
    Task::batch(effects.into_iter().map(|effect| match effect {
        Effect::Load { id, pending } => Task::perform(pending, move |_result| {
            // Failures are already logged by the cache; the cell stays empty.
            Message::Gallery(gallery_view::Message::Input(InputEvent::LoadSettled(id)))
        }),
        Effect::ReleaseCooldown { token, after } => {
            Task::perform(tokio::time::sleep(after), move |()| {
                Message::Gallery(gallery_view::Message::Input(InputEvent::CooldownElapsed(
                    token,
                )))
            })
        }
        Effect::Warmup { index, after } => Task::perform(tokio::time::sleep(after), move |()| {
            Message::Gallery(gallery_view::Message::Input(InputEvent::WarmupDue(index)))
        }),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn single_directory_source_is_scanned() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join("b.webp"), b"x").expect("write");
        fs::write(temp_dir.path().join("a.jpg"), b"x").expect("write");

        let sources = vec![temp_dir.path().to_string_lossy().into_owned()];
        let items = gallery_items(&sources);
        assert_eq!(items.len(), 2);
        assert!(items.get(0).unwrap().original.as_str().ends_with("a.jpg"));
    }

    #[test]
    fn explicit_sources_keep_their_order() {
        let sources = vec!["c.jpg".to_string(), "a.jpg".to_string()];
        let items = gallery_items(&sources);
        assert_eq!(items.get(0).unwrap().original.as_str(), "c.jpg");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn grid_layout_leaves_room_for_padding() {
        let layout = grid_layout(480.0, &GallerySettings::default());
        assert_eq!(layout.columns, 3);
        let expected = (480.0 - 2.0 * GRID_PADDING - 2.0 * GRID_SPACING) / 3.0;
        assert!((layout.cell_size - expected).abs() < f32::EPSILON);
    }
}
