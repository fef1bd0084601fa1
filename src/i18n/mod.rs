// SPDX-License-Identifier: MPL-2.0
//! Localization of the gallery's control labels.
//!
//! Translations are Fluent `.ftl` files embedded from `assets/i18n/`. The
//! active locale comes from the `--lang` argument, then `[general] language`
//! in the config, then the OS locale, falling back to `en-US`.

pub mod fluent;
