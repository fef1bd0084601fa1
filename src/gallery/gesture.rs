// SPDX-License-Identifier: MPL-2.0
//! Classification of a single pointer interaction.
//!
//! A [`Gesture`] is created on press, fed every move, and consumed on
//! release. It never outlives the interaction it describes:
//!
//! ```text
//! Idle -> Pressing(origin, started_at) -> { Tap | LongPress | Scroll | Swipe }
//! ```

use super::state::Direction;
use super::thresholds::GestureThresholds;
use iced::{Point, Vector};
use std::time::Instant;

/// What a finished pointer interaction turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Short, stationary press: select or open.
    Tap,
    /// Stationary press held past the long-press delay: suppressed.
    LongPress,
    /// Movement past the tap slop that is not a swipe: left to the page.
    Scroll,
    /// Horizontal drag past the swipe distance.
    Swipe(Direction),
}

/// Number of simultaneous contact points of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contacts(u8);

impl Contacts {
    /// One finger, or a mouse.
    pub const SINGLE: Self = Self(1);

    #[must_use]
    pub fn new(count: u8) -> Self {
        Self(count)
    }

    #[must_use]
    pub fn count(self) -> u8 {
        self.0
    }

    /// Pinch-zoom starts with a second finger; such events are never honoured.
    #[must_use]
    pub fn is_multi_touch(self) -> bool {
        self.0 >= 2
    }
}

impl Default for Contacts {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// One pointer interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    origin: Point,
    started_at: Instant,
    last: Point,
    /// Largest distance travelled from the origin on each axis so far.
    max_travel: Vector,
}

impl Gesture {
    #[must_use]
    pub fn begin(origin: Point, at: Instant) -> Self {
        Self {
            origin,
            started_at: at,
            last: origin,
            max_travel: Vector::new(0.0, 0.0),
        }
    }

    /// Records a pointer move.
    pub fn moved(&mut self, position: Point) {
        self.last = position;
        let offset = self.displacement();
        self.max_travel = Vector::new(
            self.max_travel.x.max(offset.x.abs()),
            self.max_travel.y.max(offset.y.abs()),
        );
    }

    /// Offset from the press position to the last known position.
    #[must_use]
    pub fn displacement(&self) -> Vector {
        self.last - self.origin
    }

    /// Returns whether the pointer ever left the tap slop on either axis.
    #[must_use]
    pub fn has_scrolled(&self, thresholds: &GestureThresholds) -> bool {
        let slop = thresholds.tap_slop.value();
        self.max_travel.x > slop || self.max_travel.y > slop
    }

    /// Classifies the interaction released at `at`.
    ///
    /// A horizontal-dominant displacement beyond the swipe distance wins;
    /// otherwise any excursion past the tap slop makes it a scroll, even if
    /// the pointer came back. Only stationary presses are timed.
    #[must_use]
    pub fn finish(self, at: Instant, thresholds: &GestureThresholds) -> GestureKind {
        let offset = self.displacement();
        if offset.x.abs() > offset.y.abs() && offset.x.abs() > thresholds.swipe_distance.value() {
            // Dragging the photo right reveals the one before it.
            return GestureKind::Swipe(if offset.x > 0.0 {
                Direction::Previous
            } else {
                Direction::Next
            });
        }

        if self.has_scrolled(thresholds) {
            return GestureKind::Scroll;
        }

        if at.saturating_duration_since(self.started_at) > thresholds.long_press.as_duration() {
            GestureKind::LongPress
        } else {
            GestureKind::Tap
        }
    }
}
