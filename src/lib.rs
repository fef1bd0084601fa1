// SPDX-License-Identifier: MPL-2.0
//! `wedding_gallery` is the photo gallery of a wedding invitation, built with
//! the Iced GUI framework.
//!
//! The guest scrolls a grid of thumbnails, taps one to open it in a lightbox,
//! and moves between photos with the keyboard, the on-screen controls or a
//! horizontal swipe. Images are fetched through a session-wide cache that
//! never loads the same photo twice at once, and thumbnails are only loaded
//! as they approach the viewport.
//!
//! The [`gallery`] and [`media`] modules hold the behavior and have no
//! dependency on a running window; [`app`] and [`ui`] put them on screen.

#![doc(html_root_url = "https://docs.rs/wedding_gallery/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod media;
pub mod ui;

#[cfg(test)]
mod test_utils;
