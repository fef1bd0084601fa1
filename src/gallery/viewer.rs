// SPDX-License-Identifier: MPL-2.0
//! The gallery viewer: grid, lightbox and the glue to the image cache.
//!
//! `GalleryViewer` owns the modal state, the navigation guard, the pointer
//! gesture in progress and the viewport observer. It asks the
//! [`ImageCache`] for images but never awaits them; loads and timers are
//! handed back to the caller as [`Effect`]s.

use super::gesture::{Gesture, GestureKind};
use super::input::{self, Effect, InputEvent, Response, Surface};
use super::items::{GalleryItem, GalleryItems};
use super::state::{CooldownToken, Direction, GalleryState, ModalState, NavigationGuard};
use super::visibility::{GridLayout, ViewportObserver};
use crate::config::GallerySettings;
use crate::media::{ImageCache, ImageData, ImageId, LoadState};
use iced::{Point, Rectangle};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct ActiveGesture {
    surface: Surface,
    gesture: Gesture,
}

#[derive(Debug)]
pub struct GalleryViewer {
    state: GalleryState,
    cache: ImageCache,
    settings: GallerySettings,
    guard: NavigationGuard,
    gesture: Option<ActiveGesture>,
    observer: ViewportObserver,
}

impl GalleryViewer {
    pub fn new(items: GalleryItems, cache: ImageCache, settings: GallerySettings) -> Self {
        Self {
            state: GalleryState::new(items),
            cache,
            guard: NavigationGuard::new(settings.cooldown),
            gesture: None,
            observer: ViewportObserver::new(settings.viewport_margin),
            settings,
        }
    }

    pub fn items(&self) -> &GalleryItems {
        self.state.items()
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn modal(&self) -> ModalState {
        self.state.modal()
    }

    pub fn settings(&self) -> &GallerySettings {
        &self.settings
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Global keyboard input is only wanted while the lightbox is up.
    pub fn is_listening(&self) -> bool {
        self.state.modal().is_open()
    }

    pub fn is_navigating(&self, now: Instant) -> bool {
        self.guard.is_engaged(now)
    }

    pub fn has_previous(&self) -> bool {
        self.state.has_previous()
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    pub fn position_label(&self) -> Option<String> {
        self.state.position_label()
    }

    /// Feeds one input event through the rule table.
    pub fn dispatch(&mut self, event: InputEvent, now: Instant) -> Response {
        input::dispatch(self, &event, now)
    }

    // -------------------------------------------------------------------------
    // Modal transitions
    // -------------------------------------------------------------------------

    /// Opens the lightbox at `index` and pre-loads it with its neighbours.
    ///
    /// Returns no effects for an out-of-range index.
    pub fn open_at(&mut self, index: usize) -> Vec<Effect> {
        if !self.state.open_at(index) {
            tracing::debug!(index, "open ignored: index out of range");
            return Vec::new();
        }
        tracing::debug!(index, "gallery modal opened");
        self.preload_around(index)
    }

    pub fn next(&mut self, now: Instant) -> Vec<Effect> {
        self.navigate(Direction::Next, now)
    }

    pub fn previous(&mut self, now: Instant) -> Vec<Effect> {
        self.navigate(Direction::Previous, now)
    }

    /// Steps the lightbox unless a navigation happened within the cooldown.
    ///
    /// An accepted trigger engages the guard even when it lands on a
    /// boundary and changes nothing.
    pub fn navigate(&mut self, direction: Direction, now: Instant) -> Vec<Effect> {
        if !self.state.modal().is_open() {
            return Vec::new();
        }
        if self.guard.is_engaged(now) {
            tracing::debug!(?direction, "navigation debounced");
            return Vec::new();
        }

        let token = self.guard.engage(now);
        let mut effects = vec![Effect::ReleaseCooldown {
            token,
            after: self.guard.cooldown(),
        }];

        match self.state.step(direction) {
            Some(index) => {
                tracing::debug!(index, ?direction, "gallery navigated");
                effects.extend(self.preload_around(index));
            }
            None => tracing::debug!(?direction, "navigation at boundary ignored"),
        }
        effects
    }

    /// Closes the lightbox. Returns `false` if it was not open.
    pub fn close(&mut self) -> bool {
        if matches!(
            self.gesture,
            Some(ActiveGesture {
                surface: Surface::ModalImage,
                ..
            })
        ) {
            self.gesture = None;
        }
        let closed = self.state.close();
        if closed {
            tracing::debug!("gallery modal closed");
        }
        closed
    }

    /// Detaches the viewer from every callback source.
    ///
    /// Pending cooldown and warm-up timers become no-ops and the observer
    /// stops reporting.
    pub fn teardown(&mut self) {
        self.observer.disconnect();
        self.guard.cancel();
        self.gesture = None;
        self.state.close();
        tracing::debug!("gallery viewer torn down");
    }

    pub(crate) fn release_cooldown(&mut self, token: CooldownToken) {
        self.guard.release(token);
    }

    fn preload_around(&self, index: usize) -> Vec<Effect> {
        let last = self.items().len().saturating_sub(1);
        let first = index.saturating_sub(1);
        (first..=(index + 1).min(last))
            .filter_map(|i| self.items().get(i))
            .filter_map(|item| self.request(&item.original))
            .collect()
    }

    fn request(&self, id: &ImageId) -> Option<Effect> {
        if self.cache.is_loaded(id) {
            return None;
        }
        Some(Effect::Load {
            id: id.clone(),
            pending: self.cache.request(id),
        })
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    pub(crate) fn gesture_surface(&self) -> Option<Surface> {
        self.gesture.map(|active| active.surface)
    }

    pub(crate) fn begin_gesture(&mut self, surface: Surface, position: Point, now: Instant) {
        self.gesture = Some(ActiveGesture {
            surface,
            gesture: Gesture::begin(position, now),
        });
    }

    /// Records a move; returns true if it is a horizontal drag of the photo.
    pub(crate) fn track_gesture(&mut self, position: Point) -> bool {
        let thresholds = self.settings.gestures;
        let Some(active) = self.gesture.as_mut() else {
            return false;
        };
        active.gesture.moved(position);

        let offset = active.gesture.displacement();
        active.surface == Surface::ModalImage
            && offset.x.abs() > offset.y.abs()
            && offset.x.abs() > thresholds.tap_slop.value()
    }

    pub(crate) fn finish_gesture(
        &mut self,
        position: Point,
        now: Instant,
    ) -> Option<(Surface, GestureKind)> {
        let mut active = self.gesture.take()?;
        active.gesture.moved(position);
        Some((
            active.surface,
            active.gesture.finish(now, &self.settings.gestures),
        ))
    }

    pub(crate) fn cancel_gesture(&mut self) {
        self.gesture = None;
    }

    // -------------------------------------------------------------------------
    // Thumbnails
    // -------------------------------------------------------------------------

    /// Observes every thumbnail not yet loaded at its place in `layout`.
    pub fn layout_grid(&mut self, layout: &GridLayout) {
        for (index, item) in self.state.items().iter().enumerate() {
            if self.cache.is_loaded(&item.thumbnail) {
                self.observer.unobserve(index);
            } else {
                self.observer.observe(index, layout.bounds(index));
            }
        }
    }

    pub(crate) fn viewport_changed(&mut self, viewport: Rectangle) -> Vec<Effect> {
        let entered = self.observer.update(viewport);
        let mut effects = Vec::with_capacity(entered.len());
        for index in entered {
            let Some(item) = self.state.items().get(index) else {
                continue;
            };
            match self.request(&item.thumbnail) {
                Some(effect) => effects.push(effect),
                None => self.observer.unobserve(index),
            }
        }
        effects
    }

    /// Requests the first thumbnails ahead of the viewport observer.
    ///
    /// Eager items are returned as loads; the rest as timed
    /// [`Effect::Warmup`]s that come back as [`InputEvent::WarmupDue`].
    pub fn warm_up(&mut self) -> Vec<Effect> {
        self.settings
            .warmup
            .schedule(self.items().len())
            .into_iter()
            .flat_map(|step| {
                if step.is_immediate() {
                    self.warmup_due(step.index)
                } else {
                    vec![Effect::Warmup {
                        index: step.index,
                        after: step.delay,
                    }]
                }
            })
            .collect()
    }

    /// Requests thumbnail `index` if nothing has happened to it yet.
    ///
    /// Thumbnails that loaded, failed or are in flight are skipped.
    pub(crate) fn warmup_due(&mut self, index: usize) -> Vec<Effect> {
        if !self.observer.is_connected() {
            return Vec::new();
        }
        let Some(item) = self.state.items().get(index) else {
            return Vec::new();
        };
        if self.cache.state(&item.thumbnail) != LoadState::NotRequested {
            return Vec::new();
        }
        self.request(&item.thumbnail).into_iter().collect()
    }

    /// Stops observing grid cells whose thumbnail is now loaded.
    ///
    /// Failed thumbnails stay observed so scrolling back retries them.
    pub(crate) fn load_settled(&mut self, id: &ImageId) {
        if !self.cache.is_loaded(id) {
            return;
        }
        let loaded: Vec<usize> = self
            .state
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| &item.thumbnail == id)
            .map(|(index, _)| index)
            .collect();
        for index in loaded {
            self.observer.unobserve(index);
        }
    }

    pub fn is_observing(&self, index: usize) -> bool {
        self.observer.is_observing(index)
    }

    // -------------------------------------------------------------------------
    // Rendering queries
    // -------------------------------------------------------------------------

    pub fn modal_item(&self) -> Option<&GalleryItem> {
        self.state.selected_item()
    }

    /// The decoded original for the lightbox, once it is loaded.
    pub fn image_for_modal(&self) -> Option<ImageData> {
        self.modal_item()
            .and_then(|item| self.cache.get(&item.original))
    }

    pub fn thumbnail(&self, index: usize) -> Option<ImageData> {
        self.items()
            .get(index)
            .and_then(|item| self.cache.get(&item.thumbnail))
    }

    pub fn thumbnail_state(&self, index: usize) -> LoadState {
        self.items()
            .get(index)
            .map_or(LoadState::NotRequested, |item| {
                self.cache.state(&item.thumbnail)
            })
    }
}
