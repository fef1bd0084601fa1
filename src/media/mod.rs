// SPDX-License-Identifier: MPL-2.0
//! Image loading for the gallery.
//!
//! [`loader`] fetches and decodes one image, [`image_cache`] makes sure each
//! identifier is fetched at most once per session and answers "is it loaded?"
//! without blocking.

pub mod image;
pub mod image_cache;
pub mod loader;

pub use image::{decode, ImageData};
pub use image_cache::{CacheStats, ImageCache, ImageRecordInfo, LoadState, PendingLoad};
pub use loader::{AssetLoader, ImageId, ImageLoader};
