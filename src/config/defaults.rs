// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the gallery. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gestures**: Long-press delay, tap slop and swipe distance
//! - **Navigation**: Cooldown between accepted prev/next actions
//! - **Loading**: Viewport margin and start-up warm-up schedule
//! - **Display**: Thumbnail grid layout

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Press duration after which a stationary press counts as a long-press (ms).
pub const DEFAULT_LONG_PRESS_MS: u64 = 500;

/// Minimum long-press delay (ms).
pub const MIN_LONG_PRESS_MS: u64 = 150;

/// Maximum long-press delay (ms).
pub const MAX_LONG_PRESS_MS: u64 = 2_000;

/// Movement on either axis beyond which a press becomes a scroll (px).
pub const DEFAULT_TAP_SLOP_PX: f32 = 10.0;

/// Minimum tap slop (px).
pub const MIN_TAP_SLOP_PX: f32 = 2.0;

/// Maximum tap slop (px).
pub const MAX_TAP_SLOP_PX: f32 = 48.0;

/// Horizontal displacement a drag must exceed to count as a swipe (px).
pub const DEFAULT_SWIPE_DISTANCE_PX: f32 = 50.0;

/// Minimum swipe distance (px).
pub const MIN_SWIPE_DISTANCE_PX: f32 = 16.0;

/// Maximum swipe distance (px).
pub const MAX_SWIPE_DISTANCE_PX: f32 = 400.0;

// ==========================================================================
// Navigation Defaults
// ==========================================================================

/// Cooldown after an accepted navigation during which further prev/next
/// triggers are dropped (ms).
pub const DEFAULT_NAVIGATION_COOLDOWN_MS: u64 = 200;

/// Minimum navigation cooldown (ms).
pub const MIN_NAVIGATION_COOLDOWN_MS: u64 = 50;

/// Maximum navigation cooldown (ms).
pub const MAX_NAVIGATION_COOLDOWN_MS: u64 = 1_000;

// ==========================================================================
// Loading Defaults
// ==========================================================================

/// Extra distance around the visible viewport inside which thumbnails are
/// requested (px).
pub const DEFAULT_VIEWPORT_MARGIN_PX: f32 = 600.0;

/// Minimum viewport margin (px).
pub const MIN_VIEWPORT_MARGIN_PX: f32 = 0.0;

/// Maximum viewport margin (px).
pub const MAX_VIEWPORT_MARGIN_PX: f32 = 4_000.0;

/// Number of leading thumbnails requested at start-up.
pub const DEFAULT_WARMUP_COUNT: usize = 15;

/// Number of warm-up requests issued without delay.
pub const DEFAULT_WARMUP_EAGER: usize = 6;

/// Delay added per warm-up request after the eager ones (ms).
pub const DEFAULT_WARMUP_STAGGER_MS: u64 = 30;

/// Upper bound for the warm-up count.
pub const MAX_WARMUP_COUNT: usize = 64;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Number of thumbnail columns in the grid.
pub const DEFAULT_GRID_COLUMNS: u16 = 3;

/// Minimum grid columns.
pub const MIN_GRID_COLUMNS: u16 = 1;

/// Maximum grid columns.
pub const MAX_GRID_COLUMNS: u16 = 8;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_LONG_PRESS_MS > 0);
    assert!(DEFAULT_LONG_PRESS_MS >= MIN_LONG_PRESS_MS);
    assert!(DEFAULT_LONG_PRESS_MS <= MAX_LONG_PRESS_MS);

    assert!(MIN_TAP_SLOP_PX > 0.0);
    assert!(DEFAULT_TAP_SLOP_PX >= MIN_TAP_SLOP_PX);
    assert!(DEFAULT_TAP_SLOP_PX <= MAX_TAP_SLOP_PX);

    assert!(DEFAULT_SWIPE_DISTANCE_PX > DEFAULT_TAP_SLOP_PX);
    assert!(DEFAULT_SWIPE_DISTANCE_PX >= MIN_SWIPE_DISTANCE_PX);
    assert!(DEFAULT_SWIPE_DISTANCE_PX <= MAX_SWIPE_DISTANCE_PX);

    assert!(MIN_NAVIGATION_COOLDOWN_MS > 0);
    assert!(DEFAULT_NAVIGATION_COOLDOWN_MS >= MIN_NAVIGATION_COOLDOWN_MS);
    assert!(DEFAULT_NAVIGATION_COOLDOWN_MS <= MAX_NAVIGATION_COOLDOWN_MS);

    assert!(DEFAULT_VIEWPORT_MARGIN_PX >= MIN_VIEWPORT_MARGIN_PX);
    assert!(DEFAULT_VIEWPORT_MARGIN_PX <= MAX_VIEWPORT_MARGIN_PX);

    assert!(DEFAULT_WARMUP_EAGER <= DEFAULT_WARMUP_COUNT);
    assert!(DEFAULT_WARMUP_COUNT <= MAX_WARMUP_COUNT);

    assert!(MIN_GRID_COLUMNS > 0);
    assert!(DEFAULT_GRID_COLUMNS >= MIN_GRID_COLUMNS);
    assert!(DEFAULT_GRID_COLUMNS <= MAX_GRID_COLUMNS);
};
