// SPDX-License-Identifier: MPL-2.0
//! The fixed, ordered list of photos shown by the gallery.
//!
//! Insertion order is display order is navigation order. The list is built
//! once by the embedding page and never mutated afterwards.

use crate::error::{Error, Result};
use crate::media::ImageId;
use std::path::Path;

/// File extensions picked up by [`GalleryItems::scan_directory`].
pub const IMAGE_EXTENSIONS: &[&str] = &["webp", "jpg", "jpeg", "png"];

/// Name of the sub-directory holding pre-rendered thumbnails.
pub const THUMBNAIL_DIR: &str = "thumbnails";

/// One photo: the full-size original and the grid thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub original: ImageId,
    pub thumbnail: ImageId,
}

impl GalleryItem {
    /// An item whose grid cell shows the original itself.
    #[must_use]
    pub fn single(id: ImageId) -> Self {
        Self {
            thumbnail: id.clone(),
            original: id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryItems {
    items: Vec<GalleryItem>,
}

impl GalleryItems {
    /// Builds a gallery where each identifier is its own thumbnail.
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageId>,
    {
        Self {
            items: ids
                .into_iter()
                .map(|id| GalleryItem::single(id.into()))
                .collect(),
        }
    }

    /// Builds a gallery from `(original, thumbnail)` pairs.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<ImageId>,
        B: Into<ImageId>,
    {
        Self {
            items: pairs
                .into_iter()
                .map(|(original, thumbnail)| GalleryItem {
                    original: original.into(),
                    thumbnail: thumbnail.into(),
                })
                .collect(),
        }
    }

    /// Scans `directory` for photos, sorted by file name.
    ///
    /// A file `thumbnails/<name>` next to a photo becomes its thumbnail.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn scan_directory(directory: &Path) -> Result<Self> {
        if !directory.is_dir() {
            return Err(Error::Io(format!(
                "{} is not a directory",
                directory.display()
            )));
        }

        let mut photos = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let path = entry?.path();
            if path.is_file() && is_supported_image(&path) {
                photos.push(path);
            }
        }
        photos.sort_by_key(|path| path.file_name().map(|name| name.to_ascii_lowercase()));

        let thumbnail_dir = directory.join(THUMBNAIL_DIR);
        let items = photos
            .into_iter()
            .map(|original| {
                let thumbnail = original
                    .file_name()
                    .map(|name| thumbnail_dir.join(name))
                    .filter(|candidate| candidate.is_file())
                    .unwrap_or_else(|| original.clone());
                GalleryItem {
                    original: ImageId::from(original.as_path()),
                    thumbnail: ImageId::from(thumbnail.as_path()),
                }
            })
            .collect();

        Ok(Self { items })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items.iter()
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn from_ids_keeps_order_and_uses_original_as_thumbnail() {
        let items = GalleryItems::from_ids(["b.jpg", "a.jpg", "c.jpg"]);
        assert_eq!(items.len(), 3);
        let first = items.get(0).expect("first item");
        assert_eq!(first.original, ImageId::from("b.jpg"));
        assert_eq!(first.thumbnail, first.original);
    }

    #[test]
    fn from_pairs_keeps_thumbnails() {
        let items = GalleryItems::from_pairs([("big/a.webp", "thumbs/a.webp")]);
        let item = items.get(0).expect("item");
        assert_eq!(item.thumbnail, ImageId::from("thumbs/a.webp"));
    }

    #[test]
    fn scan_directory_pairs_thumbnails_and_sorts() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let dir = temp_dir.path();
        fs::create_dir(dir.join(THUMBNAIL_DIR)).expect("mkdir thumbnails");
        for name in ["KJK_2158.webp", "KJK_0843.webp", "notes.txt", "KJK_1179.JPG"] {
            fs::write(dir.join(name), b"x").expect("write photo");
        }
        fs::write(dir.join(THUMBNAIL_DIR).join("KJK_0843.webp"), b"x").expect("write thumb");

        let items = GalleryItems::scan_directory(dir).expect("scan");
        let originals: Vec<String> = items
            .iter()
            .map(|item| {
                Path::new(item.original.as_str())
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(originals, ["KJK_0843.webp", "KJK_1179.JPG", "KJK_2158.webp"]);

        let first = items.get(0).unwrap();
        assert!(first.thumbnail.as_str().contains(THUMBNAIL_DIR));
        let second = items.get(1).unwrap();
        assert_eq!(second.thumbnail, second.original);
    }

    #[test]
    fn scan_missing_directory_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = GalleryItems::scan_directory(&temp_dir.path().join("absent"));
        assert!(result.is_err());
    }
}
