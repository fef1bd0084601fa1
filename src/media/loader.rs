// SPDX-License-Identifier: MPL-2.0
//! Image loading port and its asset adapter.
//!
//! The [`ImageCache`](super::image_cache::ImageCache) never touches the disk or
//! the network itself; it drives an [`ImageLoader`]. Production code uses
//! [`AssetLoader`], tests plug in loaders that complete on demand.

use super::image::{self, ImageData};
use crate::error::Result;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// ImageId
// =============================================================================

/// Opaque identifier of one image: a URL or an asset path.
///
/// Identifiers are compared verbatim; `"a.jpg"` and `"./a.jpg"` are two
/// different images as far as the cache is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(Arc<str>);

impl ImageId {
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for `http://` and `https://` identifiers.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        let lower = self.0.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ImageId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&Path> for ImageId {
    fn from(path: &Path) -> Self {
        Self::new(path.to_string_lossy())
    }
}

// =============================================================================
// ImageLoader
// =============================================================================

/// Fetches and decodes the image behind an identifier.
///
/// Implementations must be callable from any thread; the returned future is
/// polled on the GUI runtime's executor.
pub trait ImageLoader: Send + Sync {
    fn load(&self, id: &ImageId) -> BoxFuture<'static, Result<ImageData>>;
}

// =============================================================================
// AssetLoader
// =============================================================================

/// Loads remote identifiers over HTTP and everything else from disk.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: Option<PathBuf>,
    client: reqwest::Client,
}

impl AssetLoader {
    /// Creates a loader resolving relative identifiers against `root`.
    #[must_use]
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            client: reqwest::Client::new(),
        }
    }

    fn resolve(&self, id: &ImageId) -> PathBuf {
        let path = Path::new(id.as_str());
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ImageLoader for AssetLoader {
    fn load(&self, id: &ImageId) -> BoxFuture<'static, Result<ImageData>> {
        if id.is_remote() {
            let client = self.client.clone();
            let url = id.to_string();
            async move {
                let response = client.get(&url).send().await?.error_for_status()?;
                let bytes = response.bytes().await?;
                decode_off_thread(bytes.to_vec()).await
            }
            .boxed()
        } else {
            let path = self.resolve(id);
            async move {
                let bytes = tokio::fs::read(&path).await?;
                decode_off_thread(bytes).await
            }
            .boxed()
        }
    }
}

/// Decoding large photos is CPU-bound; keep it off the async workers.
async fn decode_off_thread(bytes: Vec<u8>) -> Result<ImageData> {
    tokio::task::spawn_blocking(move || image::decode(&bytes)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LoadError};
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn remote_detection_is_scheme_based() {
        assert!(ImageId::from("https://cdn.example.com/a.webp").is_remote());
        assert!(ImageId::from("HTTP://cdn.example.com/a.webp").is_remote());
        assert!(!ImageId::from("assets/a.webp").is_remote());
        assert!(!ImageId::from("/srv/photos/https.webp").is_remote());
    }

    #[test]
    fn relative_ids_resolve_against_root() {
        let loader = AssetLoader::new(Some(PathBuf::from("/srv/wedding")));
        assert_eq!(
            loader.resolve(&ImageId::from("thumbnails/a.webp")),
            PathBuf::from("/srv/wedding/thumbnails/a.webp")
        );
        assert_eq!(
            loader.resolve(&ImageId::from("/abs/a.webp")),
            PathBuf::from("/abs/a.webp")
        );
    }

    #[tokio::test]
    async fn loads_png_from_disk() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image = RgbaImage::from_pixel(3, 5, Rgba([10, 20, 30, 255]));
        image
            .save(temp_dir.path().join("photo.png"))
            .expect("failed to write png");

        let loader = AssetLoader::new(Some(temp_dir.path().to_path_buf()));
        let data = loader
            .load(&ImageId::from("photo.png"))
            .await
            .expect("load should succeed");
        assert_eq!((data.width, data.height), (3, 5));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let loader = AssetLoader::new(Some(temp_dir.path().to_path_buf()));

        let result = loader.load(&ImageId::from("missing.webp")).await;
        assert!(matches!(result, Err(Error::Load(LoadError::NotFound(_)))));
    }
}
