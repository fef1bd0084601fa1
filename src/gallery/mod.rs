// SPDX-License-Identifier: MPL-2.0
//! Headless gallery core: photo list, lightbox state, gestures and loading
//! policy.
//!
//! Nothing in here talks to a window or a clock. Callers pass the current
//! [`Instant`](std::time::Instant) in and receive deferred work back as
//! [`Effect`]s, which keeps every rule testable without a running GUI.

pub mod gesture;
pub mod input;
pub mod items;
pub mod state;
pub mod thresholds;
pub mod viewer;
pub mod visibility;
pub mod warmup;

pub use gesture::{Contacts, Gesture, GestureKind};
pub use input::{DefaultAction, Effect, InputEvent, Key, Response, Surface};
pub use items::{GalleryItem, GalleryItems};
pub use state::{CooldownToken, Direction, GalleryState, ModalState, NavigationGuard};
pub use thresholds::GestureThresholds;
pub use viewer::GalleryViewer;
pub use visibility::{GridLayout, ViewportObserver};
pub use warmup::{WarmupPlan, WarmupStep};
