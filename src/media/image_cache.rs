// SPDX-License-Identifier: MPL-2.0
//! Session-wide image cache with single-flight loading.
//!
//! # Design
//!
//! - **Single-flight**: at most one load per identifier is in flight; further
//!   requests for a `Loading` entry share the same [`PendingLoad`]
//! - **Session-scoped**: entries are never evicted; a wedding gallery holds a
//!   few dozen photos
//! - **Monotonic**: once an entry is `Loaded` nothing moves it back
//! - **Non-sticky failures**: a `Failed` entry starts a fresh load on the
//!   next request
//!
//! # Usage
//!
//! ```ignore
//! let cache = ImageCache::new(AssetLoader::default());
//!
//! // Start (or join) the load; the future must be polled to make progress.
//! let pending = cache.request(&id);
//!
//! // Rendering code checks without awaiting.
//! if cache.is_loaded(&id) { /* draw it */ }
//! ```

use super::image::ImageData;
use super::loader::{ImageId, ImageLoader};
use crate::error::{Error, Result};
use futures_util::future::{self, BoxFuture, Shared};
use futures_util::FutureExt;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

/// Shared handle on the outcome of one image load.
///
/// Cloning is cheap; every clone resolves to the same result.
pub type PendingLoad = Shared<BoxFuture<'static, Result<ImageData>>>;

/// Observable load state of one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotRequested,
    Loading,
    Loaded,
    Failed,
}

/// Diagnostic snapshot of one cache entry.
#[derive(Debug, Clone)]
pub struct ImageRecordInfo {
    pub id: ImageId,
    pub state: LoadState,
    /// When the current (or last) load was started.
    pub requested_at: Instant,
    /// When the current load settled, if it has.
    pub settled_at: Option<Instant>,
    /// Number of loads issued for this identifier, retries included.
    pub attempts: u32,
}

/// Counters describing cache behaviour over the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls to [`ImageCache::request`].
    pub requests: u64,
    /// Requests that started a new underlying load.
    pub loads_started: u64,
    /// Requests that attached to an in-flight load.
    pub joined: u64,
    /// Requests answered from a loaded entry.
    pub hits: u64,
    /// Loads that settled with an error.
    pub failures: u64,
}

enum Slot {
    Loading(PendingLoad),
    Loaded(ImageData),
    Failed(Error),
}

struct ImageRecord {
    slot: Slot,
    requested_at: Instant,
    settled_at: Option<Instant>,
    attempts: u32,
}

impl ImageRecord {
    fn state(&self) -> LoadState {
        match self.slot {
            Slot::Loading(_) => LoadState::Loading,
            Slot::Loaded(_) => LoadState::Loaded,
            Slot::Failed(_) => LoadState::Failed,
        }
    }
}

#[derive(Default)]
struct Entries {
    records: HashMap<ImageId, ImageRecord>,
    stats: CacheStats,
}

/// Process-wide registry of image load state, keyed by identifier.
///
/// Construct one per session and hand clones to whoever needs it; all clones
/// share the same entries.
#[derive(Clone)]
pub struct ImageCache {
    entries: Arc<Mutex<Entries>>,
    loader: Arc<dyn ImageLoader>,
}

impl ImageCache {
    /// Creates an empty cache backed by `loader`.
    #[must_use]
    pub fn new(loader: impl ImageLoader + 'static) -> Self {
        Self::with_loader(Arc::new(loader))
    }

    /// Creates an empty cache sharing an existing loader.
    #[must_use]
    pub fn with_loader(loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Entries::default())),
            loader,
        }
    }

    /// Requests the image behind `id`.
    ///
    /// - `Loaded`: returns an already-resolved future.
    /// - `Loading`: returns the in-flight future; no new load is issued.
    /// - `NotRequested` / `Failed`: marks the entry `Loading` and returns a new
    ///   load that settles the entry to `Loaded` or `Failed` when it completes.
    ///
    /// The underlying load starts when the returned future is first polled.
    pub fn request(&self, id: &ImageId) -> PendingLoad {
        let mut guard = lock(&self.entries);
        let entries = &mut *guard;
        entries.stats.requests += 1;

        let previous_attempts = match entries.records.get(id) {
            Some(ImageRecord {
                slot: Slot::Loaded(image),
                ..
            }) => {
                entries.stats.hits += 1;
                return future::ready(Ok(image.clone())).boxed().shared();
            }
            Some(ImageRecord {
                slot: Slot::Loading(pending),
                ..
            }) => {
                entries.stats.joined += 1;
                return pending.clone();
            }
            Some(record) => record.attempts,
            None => 0,
        };

        let pending = self.start_load(id);
        entries.records.insert(
            id.clone(),
            ImageRecord {
                slot: Slot::Loading(pending.clone()),
                requested_at: Instant::now(),
                settled_at: None,
                attempts: previous_attempts + 1,
            },
        );
        entries.stats.loads_started += 1;
        tracing::debug!(%id, attempt = previous_attempts + 1, "image load started");
        pending
    }

    fn start_load(&self, id: &ImageId) -> PendingLoad {
        let loader = Arc::clone(&self.loader);
        let entries = Arc::downgrade(&self.entries);
        let key = id.clone();

        async move {
            let result = loader.load(&key).await;
            settle(&entries, &key, &result);
            result
        }
        .boxed()
        .shared()
    }

    /// Returns whether `id` has finished loading successfully.
    #[must_use]
    pub fn is_loaded(&self, id: &ImageId) -> bool {
        self.state(id) == LoadState::Loaded
    }

    /// Returns the current load state of `id`.
    #[must_use]
    pub fn state(&self, id: &ImageId) -> LoadState {
        lock(&self.entries)
            .records
            .get(id)
            .map_or(LoadState::NotRequested, ImageRecord::state)
    }

    /// Returns the decoded image if `id` is loaded.
    #[must_use]
    pub fn get(&self, id: &ImageId) -> Option<ImageData> {
        match lock(&self.entries).records.get(id) {
            Some(ImageRecord {
                slot: Slot::Loaded(image),
                ..
            }) => Some(image.clone()),
            _ => None,
        }
    }

    /// Returns the error of the last failed load of `id`, if it failed.
    #[must_use]
    pub fn failure(&self, id: &ImageId) -> Option<Error> {
        match lock(&self.entries).records.get(id) {
            Some(ImageRecord {
                slot: Slot::Failed(err),
                ..
            }) => Some(err.clone()),
            _ => None,
        }
    }

    /// Returns a diagnostic snapshot of the entry for `id`.
    #[must_use]
    pub fn record(&self, id: &ImageId) -> Option<ImageRecordInfo> {
        lock(&self.entries)
            .records
            .get(id)
            .map(|record| ImageRecordInfo {
                id: id.clone(),
                state: record.state(),
                requested_at: record.requested_at,
                settled_at: record.settled_at,
                attempts: record.attempts,
            })
    }

    /// Records an image obtained outside the cache as loaded.
    ///
    /// An in-flight load for the same identifier keeps running but can no
    /// longer change the entry.
    pub fn mark_loaded(&self, id: &ImageId, image: ImageData) {
        let mut entries = lock(&self.entries);
        let now = Instant::now();
        let record = entries
            .records
            .entry(id.clone())
            .or_insert_with(|| ImageRecord {
                slot: Slot::Loaded(image.clone()),
                requested_at: now,
                settled_at: Some(now),
                attempts: 0,
            });
        if !matches!(record.slot, Slot::Loaded(_)) {
            record.slot = Slot::Loaded(image);
            record.settled_at = Some(now);
        }
    }

    /// Returns the session counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        lock(&self.entries).stats
    }

    /// Returns the number of identifiers ever requested or marked.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.entries).records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.entries).records.is_empty()
    }
}

impl fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = lock(&self.entries);
        f.debug_struct("ImageCache")
            .field("entries", &entries.records.len())
            .field("stats", &entries.stats)
            .finish_non_exhaustive()
    }
}

/// Moves a `Loading` entry to its final state once its load completes.
fn settle(entries: &Weak<Mutex<Entries>>, id: &ImageId, result: &Result<ImageData>) {
    // The cache may have been dropped while the load was in flight.
    let Some(entries) = entries.upgrade() else {
        return;
    };
    let mut guard = lock(&entries);
    let entries = &mut *guard;
    let Some(record) = entries.records.get_mut(id) else {
        return;
    };
    if matches!(record.slot, Slot::Loaded(_)) {
        return;
    }

    record.settled_at = Some(Instant::now());
    match result {
        Ok(image) => {
            record.slot = Slot::Loaded(image.clone());
            tracing::debug!(%id, "image loaded");
        }
        Err(err) => {
            record.slot = Slot::Failed(err.clone());
            entries.stats.failures += 1;
            tracing::warn!(%id, "image failed to load: {err}");
        }
    }
}

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}
