// SPDX-License-Identifier: MPL-2.0
//! Test helpers: a controllable image loader and tiny sample images.

use crate::error::{LoadError, Result};
use crate::media::{ImageData, ImageId, ImageLoader};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

/// A 1x1 opaque pixel.
pub fn sample_image() -> ImageData {
    ImageData::from_rgba(1, 1, vec![255, 255, 255, 255])
}

/// Loader whose loads complete only when the test says so.
///
/// Call [`ManualLoader::prepare`] before the load is polled; the returned
/// sender settles it. Loads with nothing prepared fail with `NotFound`.
#[derive(Default)]
pub struct ManualLoader {
    pending: Mutex<HashMap<ImageId, Vec<oneshot::Receiver<Result<ImageData>>>>>,
    calls: Mutex<HashMap<ImageId, usize>>,
}

impl ManualLoader {
    pub fn prepare(&self, id: &ImageId) -> oneshot::Sender<Result<ImageData>> {
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap()
            .entry(id.clone())
            .or_default()
            .push(rx);
        tx
    }

    pub fn calls(&self, id: &ImageId) -> usize {
        self.calls.lock().unwrap().get(id).copied().unwrap_or(0)
    }
}

impl ImageLoader for ManualLoader {
    fn load(&self, id: &ImageId) -> BoxFuture<'static, Result<ImageData>> {
        *self.calls.lock().unwrap().entry(id.clone()).or_default() += 1;

        let receiver = self
            .pending
            .lock()
            .unwrap()
            .get_mut(id)
            .filter(|queue| !queue.is_empty())
            .map(|queue| queue.remove(0));
        let missing = id.to_string();

        async move {
            match receiver {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(LoadError::TaskAborted("sender dropped".into()).into())),
                None => Err(LoadError::NotFound(missing).into()),
            }
        }
        .boxed()
    }
}
