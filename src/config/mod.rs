// SPDX-License-Identifier: MPL-2.0
//! This module handles the gallery configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[gestures]` - Long-press, tap slop and swipe thresholds
//! - `[navigation]` - Cooldown between accepted prev/next actions
//! - `[loading]` - Viewport margin and start-up warm-up schedule
//! - `[display]` - Thumbnail grid layout
//!
//! Every numeric value is optional; missing values fall back to the constants
//! in [`defaults`] and out-of-range values are clamped when converted into
//! [`GallerySettings`].
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `WEDDING_GALLERY_CONFIG_DIR` environment variable (or `--config-dir`)
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use wedding_gallery::config;
//!
//! let (mut config, _warning) = config::load();
//! config.navigation.cooldown_ms = Some(250);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::gallery::thresholds::{
    GestureThresholds, LongPressDelay, NavigationCooldown, SwipeDistance, TapSlop, ViewportMargin,
};
use crate::gallery::warmup::WarmupPlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning key reported when an existing config file cannot be parsed.
pub const CONFIG_LOAD_WARNING: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "ko").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Pointer-gesture classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    #[serde(default = "default_long_press_ms", skip_serializing_if = "Option::is_none")]
    pub long_press_ms: Option<u64>,

    #[serde(default = "default_tap_slop_px", skip_serializing_if = "Option::is_none")]
    pub tap_slop_px: Option<f32>,

    #[serde(
        default = "default_swipe_distance_px",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_distance_px: Option<f32>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_ms: default_long_press_ms(),
            tap_slop_px: default_tap_slop_px(),
            swipe_distance_px: default_swipe_distance_px(),
        }
    }
}

/// Modal navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationConfig {
    /// Cooldown after an accepted prev/next action (ms).
    #[serde(default = "default_cooldown_ms", skip_serializing_if = "Option::is_none")]
    pub cooldown_ms: Option<u64>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

/// Image loading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadingConfig {
    #[serde(
        default = "default_viewport_margin_px",
        skip_serializing_if = "Option::is_none"
    )]
    pub viewport_margin_px: Option<f32>,

    #[serde(default = "default_warmup_count", skip_serializing_if = "Option::is_none")]
    pub warmup_count: Option<usize>,

    #[serde(default = "default_warmup_eager", skip_serializing_if = "Option::is_none")]
    pub warmup_eager: Option<usize>,

    #[serde(
        default = "default_warmup_stagger_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub warmup_stagger_ms: Option<u64>,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            viewport_margin_px: default_viewport_margin_px(),
            warmup_count: default_warmup_count(),
            warmup_eager: default_warmup_eager(),
            warmup_stagger_ms: default_warmup_stagger_ms(),
        }
    }
}

/// Grid display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_columns", skip_serializing_if = "Option::is_none")]
    pub columns: Option<u16>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Gallery configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gestures: GestureConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub loading: LoadingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Resolves optional values into validated runtime settings.
    #[must_use]
    pub fn settings(&self) -> GallerySettings {
        let gestures = GestureThresholds {
            long_press: LongPressDelay::from_millis(
                self.gestures.long_press_ms.unwrap_or(DEFAULT_LONG_PRESS_MS),
            ),
            tap_slop: TapSlop::new(self.gestures.tap_slop_px.unwrap_or(DEFAULT_TAP_SLOP_PX)),
            swipe_distance: SwipeDistance::new(
                self.gestures
                    .swipe_distance_px
                    .unwrap_or(DEFAULT_SWIPE_DISTANCE_PX),
            ),
        };

        let warmup_count = self
            .loading
            .warmup_count
            .unwrap_or(DEFAULT_WARMUP_COUNT)
            .min(MAX_WARMUP_COUNT);

        GallerySettings {
            gestures,
            cooldown: NavigationCooldown::from_millis(
                self.navigation
                    .cooldown_ms
                    .unwrap_or(DEFAULT_NAVIGATION_COOLDOWN_MS),
            ),
            viewport_margin: ViewportMargin::new(
                self.loading
                    .viewport_margin_px
                    .unwrap_or(DEFAULT_VIEWPORT_MARGIN_PX),
            ),
            warmup: WarmupPlan::new(
                warmup_count,
                self.loading.warmup_eager.unwrap_or(DEFAULT_WARMUP_EAGER),
                Duration::from_millis(
                    self.loading
                        .warmup_stagger_ms
                        .unwrap_or(DEFAULT_WARMUP_STAGGER_MS),
                ),
            ),
            columns: self
                .display
                .columns
                .unwrap_or(DEFAULT_GRID_COLUMNS)
                .clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS),
        }
    }
}

/// Validated settings consumed by the gallery viewer and the grid view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GallerySettings {
    pub gestures: GestureThresholds,
    pub cooldown: NavigationCooldown,
    pub viewport_margin: ViewportMargin,
    pub warmup: WarmupPlan,
    pub columns: u16,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Config::default().settings()
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_long_press_ms() -> Option<u64> {
    Some(DEFAULT_LONG_PRESS_MS)
}

fn default_tap_slop_px() -> Option<f32> {
    Some(DEFAULT_TAP_SLOP_PX)
}

fn default_swipe_distance_px() -> Option<f32> {
    Some(DEFAULT_SWIPE_DISTANCE_PX)
}

fn default_cooldown_ms() -> Option<u64> {
    Some(DEFAULT_NAVIGATION_COOLDOWN_MS)
}

fn default_viewport_margin_px() -> Option<f32> {
    Some(DEFAULT_VIEWPORT_MARGIN_PX)
}

fn default_warmup_count() -> Option<usize> {
    Some(DEFAULT_WARMUP_COUNT)
}

fn default_warmup_eager() -> Option<usize> {
    Some(DEFAULT_WARMUP_EAGER)
}

fn default_warmup_stagger_ms() -> Option<u64> {
    Some(DEFAULT_WARMUP_STAGGER_MS)
}

fn default_columns() -> Option<u16> {
    Some(DEFAULT_GRID_COLUMNS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "falling back to default config: {err}");
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("ko".to_string()),
            },
            gestures: GestureConfig {
                long_press_ms: Some(650),
                tap_slop_px: Some(12.0),
                swipe_distance_px: Some(80.0),
            },
            navigation: NavigationConfig {
                cooldown_ms: Some(300),
            },
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_reports_warning_on_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[navigation\ncooldown_ms = ")
            .expect("failed to write broken toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(CONFIG_LOAD_WARNING));
    }

    #[test]
    fn load_with_override_missing_file_is_silent_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_sections() {
        let config: Config = toml::from_str("[navigation]\ncooldown_ms = 350\n").expect("parse");
        assert_eq!(config.navigation.cooldown_ms, Some(350));
        assert_eq!(config.gestures, GestureConfig::default());
        assert_eq!(config.display.columns, Some(DEFAULT_GRID_COLUMNS));
    }

    #[test]
    fn settings_clamp_out_of_range_values() {
        let config = Config {
            gestures: GestureConfig {
                long_press_ms: Some(1),
                tap_slop_px: Some(1_000.0),
                swipe_distance_px: Some(-5.0),
            },
            navigation: NavigationConfig {
                cooldown_ms: Some(60_000),
            },
            display: DisplayConfig { columns: Some(0) },
            ..Config::default()
        };

        let settings = config.settings();
        assert_eq!(
            settings.gestures.long_press.as_duration(),
            Duration::from_millis(MIN_LONG_PRESS_MS)
        );
        assert_eq!(settings.gestures.tap_slop.value(), MAX_TAP_SLOP_PX);
        assert_eq!(settings.gestures.swipe_distance.value(), MIN_SWIPE_DISTANCE_PX);
        assert_eq!(
            settings.cooldown.as_duration(),
            Duration::from_millis(MAX_NAVIGATION_COOLDOWN_MS)
        );
        assert_eq!(settings.columns, MIN_GRID_COLUMNS);
    }

    #[test]
    fn default_settings_match_documented_constants() {
        let settings = GallerySettings::default();
        assert_eq!(
            settings.gestures.long_press.as_duration(),
            Duration::from_millis(500)
        );
        assert_eq!(settings.cooldown.as_duration(), Duration::from_millis(200));
        assert_eq!(settings.viewport_margin.value(), 600.0);
        assert_eq!(settings.warmup.count(), 15);
    }
}
