// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for integration tests.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use wedding_gallery::config::GallerySettings;
use wedding_gallery::error::{LoadError, Result};
use wedding_gallery::gallery::{GalleryItems, GalleryViewer};
use wedding_gallery::media::{ImageCache, ImageData, ImageId, ImageLoader};

pub fn pixel() -> ImageData {
    ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])
}

/// Loader that counts calls and completes loads when told to.
///
/// Loads without a gate resolve immediately to a 1x1 image.
#[derive(Default)]
pub struct GatedLoader {
    gates: Mutex<HashMap<ImageId, oneshot::Receiver<Result<ImageData>>>>,
    calls: Mutex<HashMap<ImageId, usize>>,
}

impl GatedLoader {
    pub fn gate(&self, id: &str) -> oneshot::Sender<Result<ImageData>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(ImageId::from(id), rx);
        tx
    }

    pub fn calls(&self, id: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&ImageId::from(id))
            .copied()
            .unwrap_or(0)
    }
}

impl ImageLoader for GatedLoader {
    fn load(&self, id: &ImageId) -> BoxFuture<'static, Result<ImageData>> {
        *self.calls.lock().unwrap().entry(id.clone()).or_default() += 1;
        let gate = self.gates.lock().unwrap().remove(id);
        async move {
            match gate {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(LoadError::TaskAborted("gate dropped".into()).into())),
                None => Ok(pixel()),
            }
        }
        .boxed()
    }
}

pub fn viewer(ids: &[&str]) -> (GalleryViewer, ImageCache, Arc<GatedLoader>) {
    let loader = Arc::new(GatedLoader::default());
    let cache = ImageCache::with_loader(loader.clone());
    let viewer = GalleryViewer::new(
        GalleryItems::from_ids(ids.iter().copied()),
        cache.clone(),
        GallerySettings::default(),
    );
    (viewer, cache, loader)
}
