// SPDX-License-Identifier: MPL-2.0
//! Modal state machine and the navigation debounce guard.

use super::items::{GalleryItem, GalleryItems};
use super::thresholds::NavigationCooldown;
use std::time::{Duration, Instant};

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Whether the lightbox is showing, and which photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(usize),
}

impl ModalState {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            ModalState::Open(index) => Some(index),
            ModalState::Closed => None,
        }
    }
}

/// The photo list plus the modal selection.
///
/// Every transition is a pure state change: out-of-range requests are
/// silently ignored and report that nothing changed.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    items: GalleryItems,
    modal: ModalState,
}

impl GalleryState {
    #[must_use]
    pub fn new(items: GalleryItems) -> Self {
        Self {
            items,
            modal: ModalState::Closed,
        }
    }

    #[must_use]
    pub fn items(&self) -> &GalleryItems {
        &self.items
    }

    #[must_use]
    pub fn modal(&self) -> ModalState {
        self.modal
    }

    /// Returns the item shown in the modal, if open.
    #[must_use]
    pub fn selected_item(&self) -> Option<&GalleryItem> {
        self.modal.index().and_then(|index| self.items.get(index))
    }

    /// Opens the modal at `index`. Returns `false` for an invalid index.
    pub fn open_at(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.modal = ModalState::Open(index);
        true
    }

    /// Moves one photo in `direction` without wrapping around.
    ///
    /// Returns the new index, or `None` when the modal is closed or already
    /// at the boundary.
    pub fn step(&mut self, direction: Direction) -> Option<usize> {
        let ModalState::Open(index) = self.modal else {
            return None;
        };
        let target = match direction {
            Direction::Previous => index.checked_sub(1)?,
            Direction::Next => index + 1,
        };
        if target >= self.items.len() {
            return None;
        }
        self.modal = ModalState::Open(target);
        Some(target)
    }

    /// Closes the modal. Returns `false` if it was already closed.
    pub fn close(&mut self) -> bool {
        let was_open = self.modal.is_open();
        self.modal = ModalState::Closed;
        was_open
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.modal.index().is_some_and(|index| index > 0)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.modal
            .index()
            .is_some_and(|index| index + 1 < self.items.len())
    }

    /// Human-readable position such as `"2 / 14"`.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        self.modal
            .index()
            .map(|index| format!("{} / {}", index + 1, self.items.len()))
    }
}

// =============================================================================
// NavigationGuard
// =============================================================================

/// Identifies one engagement of the [`NavigationGuard`].
///
/// The timer that ends a cooldown carries the token of the engagement that
/// scheduled it, so a late timer cannot cut a newer cooldown short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CooldownToken(u64);

#[derive(Debug, Clone, Copy)]
struct Engagement {
    token: CooldownToken,
    until: Instant,
}

/// Short-lived flag rejecting prev/next triggers right after a navigation.
///
/// Overlapping touch, pointer and keyboard events can fire the same
/// navigation twice; the guard keeps a minimum gap between accepted steps.
/// It expires either when its timer fires ([`release`](Self::release)) or
/// when the cooldown has elapsed by the clock, whichever comes first.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    cooldown: NavigationCooldown,
    active: Option<Engagement>,
    issued: u64,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(cooldown: NavigationCooldown) -> Self {
        Self {
            cooldown,
            active: None,
            issued: 0,
        }
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.cooldown.as_duration()
    }

    /// Returns whether a navigation at `now` must be dropped.
    #[must_use]
    pub fn is_engaged(&self, now: Instant) -> bool {
        self.active.is_some_and(|engagement| now < engagement.until)
    }

    /// Starts a new cooldown at `now`, replacing any previous one.
    pub fn engage(&mut self, now: Instant) -> CooldownToken {
        self.issued += 1;
        let token = CooldownToken(self.issued);
        self.active = Some(Engagement {
            token,
            until: now + self.cooldown.as_duration(),
        });
        token
    }

    /// Ends the cooldown started with `token`. Stale tokens are ignored.
    pub fn release(&mut self, token: CooldownToken) -> bool {
        match self.active {
            Some(engagement) if engagement.token == token => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the current cooldown; any pending timer becomes stale.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(NavigationCooldown::default())
    }
}
