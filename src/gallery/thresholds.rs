// SPDX-License-Identifier: MPL-2.0
//! Tunable interaction thresholds.
//!
//! The long-press delay, tap slop, swipe distance and navigation cooldown are
//! empirical UI constants. Each one is wrapped in a newtype that clamps to the
//! bounds declared in [`crate::config::defaults`], so the gesture and
//! navigation code never has to re-validate them.

use crate::config::{
    DEFAULT_LONG_PRESS_MS, DEFAULT_NAVIGATION_COOLDOWN_MS, DEFAULT_SWIPE_DISTANCE_PX,
    DEFAULT_TAP_SLOP_PX, DEFAULT_VIEWPORT_MARGIN_PX, MAX_LONG_PRESS_MS,
    MAX_NAVIGATION_COOLDOWN_MS, MAX_SWIPE_DISTANCE_PX, MAX_TAP_SLOP_PX, MAX_VIEWPORT_MARGIN_PX,
    MIN_LONG_PRESS_MS, MIN_NAVIGATION_COOLDOWN_MS, MIN_SWIPE_DISTANCE_PX, MIN_TAP_SLOP_PX,
    MIN_VIEWPORT_MARGIN_PX,
};
use std::time::Duration;

// =============================================================================
// LongPressDelay
// =============================================================================

/// Press duration beyond which a stationary press is a long-press.
///
/// # Example
///
/// ```
/// use wedding_gallery::gallery::thresholds::LongPressDelay;
/// use std::time::Duration;
///
/// let delay = LongPressDelay::from_millis(500);
/// assert_eq!(delay.as_duration(), Duration::from_millis(500));
///
/// // Values outside range are clamped
/// let too_short = LongPressDelay::from_millis(0);
/// assert_eq!(too_short.as_duration(), Duration::from_millis(150));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongPressDelay(u64);

impl LongPressDelay {
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(MIN_LONG_PRESS_MS, MAX_LONG_PRESS_MS))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for LongPressDelay {
    fn default() -> Self {
        Self(DEFAULT_LONG_PRESS_MS)
    }
}

// =============================================================================
// NavigationCooldown
// =============================================================================

/// Minimum gap between two accepted prev/next actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCooldown(u64);

impl NavigationCooldown {
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(MIN_NAVIGATION_COOLDOWN_MS, MAX_NAVIGATION_COOLDOWN_MS))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for NavigationCooldown {
    fn default() -> Self {
        Self(DEFAULT_NAVIGATION_COOLDOWN_MS)
    }
}

// =============================================================================
// Pixel distances
// =============================================================================

macro_rules! pixel_threshold {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name(f32);

        impl $name {
            /// Creates the threshold, clamping to the valid range.
            /// NaN falls back to the default.
            #[must_use]
            pub fn new(pixels: f32) -> Self {
                if pixels.is_nan() {
                    return Self::default();
                }
                Self(pixels.clamp($min, $max))
            }

            /// Returns the distance in logical pixels.
            #[must_use]
            pub fn value(self) -> f32 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }
    };
}

pixel_threshold!(
    /// Movement on either axis beyond which a press is treated as a scroll.
    TapSlop,
    MIN_TAP_SLOP_PX,
    MAX_TAP_SLOP_PX,
    DEFAULT_TAP_SLOP_PX
);

pixel_threshold!(
    /// Horizontal displacement a drag must exceed to navigate.
    SwipeDistance,
    MIN_SWIPE_DISTANCE_PX,
    MAX_SWIPE_DISTANCE_PX,
    DEFAULT_SWIPE_DISTANCE_PX
);

pixel_threshold!(
    /// Extra distance around the viewport inside which thumbnails load.
    ViewportMargin,
    MIN_VIEWPORT_MARGIN_PX,
    MAX_VIEWPORT_MARGIN_PX,
    DEFAULT_VIEWPORT_MARGIN_PX
);

// =============================================================================
// GestureThresholds
// =============================================================================

/// Everything the gesture classifier needs to label one pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureThresholds {
    pub long_press: LongPressDelay,
    pub tap_slop: TapSlop,
    pub swipe_distance: SwipeDistance,
}
