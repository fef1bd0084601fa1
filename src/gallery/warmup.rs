// SPDX-License-Identifier: MPL-2.0
//! Start-up warm-up of the first grid thumbnails.
//!
//! The first few thumbnails are requested immediately so the top of the grid
//! paints without waiting for the viewport observer; the next batch follows
//! at a small stagger so they do not all hit the network in the same tick.

use crate::config::{DEFAULT_WARMUP_COUNT, DEFAULT_WARMUP_EAGER, DEFAULT_WARMUP_STAGGER_MS};
use std::time::Duration;

/// How many thumbnails to warm up and how fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupPlan {
    count: usize,
    eager: usize,
    stagger: Duration,
}

/// One scheduled thumbnail request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmupStep {
    pub index: usize,
    /// Delay after start-up; zero for eager items.
    pub delay: Duration,
}

impl WarmupStep {
    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.delay.is_zero()
    }
}

impl WarmupPlan {
    /// `eager` is capped at `count`.
    #[must_use]
    pub fn new(count: usize, eager: usize, stagger: Duration) -> Self {
        Self {
            count,
            eager: eager.min(count),
            stagger,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn eager(&self) -> usize {
        self.eager
    }

    /// Lays out the requests for a gallery of `len` items.
    ///
    /// Item `i` past the eager batch is due `(i - eager) * stagger` after
    /// start-up.
    #[must_use]
    pub fn schedule(&self, len: usize) -> Vec<WarmupStep> {
        (0..self.count.min(len))
            .map(|index| {
                let delay = if index < self.eager {
                    Duration::ZERO
                } else {
                    let slot = u32::try_from(index - self.eager).unwrap_or(u32::MAX);
                    self.stagger.saturating_mul(slot)
                };
                WarmupStep { index, delay }
            })
            .collect()
    }
}

impl Default for WarmupPlan {
    fn default() -> Self {
        Self::new(
            DEFAULT_WARMUP_COUNT,
            DEFAULT_WARMUP_EAGER,
            Duration::from_millis(DEFAULT_WARMUP_STAGGER_MS),
        )
    }
}
