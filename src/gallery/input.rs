// SPDX-License-Identifier: MPL-2.0
//! Input normalization and the gallery's rule table.
//!
//! Every trigger the front-end can observe is expressed as an [`InputEvent`].
//! A single dispatcher walks [`RULES`] in order and runs the action of the
//! first rule whose matcher and guard both accept the event. Events no rule
//! accepts are ignored and left to the platform.
//!
//! Actions never perform I/O. Work that has to happen later is returned as
//! [`Effect`]s, and whether the platform's default handling must be
//! suppressed is reported as a [`DefaultAction`].

use super::gesture::{Contacts, GestureKind};
use super::state::{CooldownToken, Direction};
use super::viewer::GalleryViewer;
use crate::media::{ImageId, PendingLoad};
use iced::{Point, Rectangle};
use std::fmt;
use std::time::{Duration, Instant};

/// Keys the gallery reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Element a pointer interaction started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Thumbnail(usize),
    ModalImage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    /// A grid cell was activated without a pointer gesture (e.g. a click
    /// synthesized by the platform).
    ThumbnailClicked(usize),
    PreviousPressed,
    NextPressed,
    ClosePressed,
    /// Click on the dimmed area around the modal photo and controls.
    BackdropClicked,
    PointerDown {
        surface: Surface,
        position: Point,
        contacts: Contacts,
    },
    PointerMoved {
        position: Point,
        contacts: Contacts,
    },
    PointerUp {
        position: Point,
    },
    PointerLeft,
    ContextMenu(Surface),
    DragStart(Surface),
    CooldownElapsed(CooldownToken),
    /// The visible grid area, in content coordinates.
    ViewportChanged(Rectangle),
    WarmupDue(usize),
    /// A load driven by an [`Effect::Load`] completed.
    LoadSettled(ImageId),
}

/// Whether the platform should still apply its own handling of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultAction {
    #[default]
    Allow,
    Prevent,
}

/// Deferred work requested by the gallery.
#[derive(Clone)]
pub enum Effect {
    /// Drive `pending` to completion, then send [`InputEvent::LoadSettled`].
    Load { id: ImageId, pending: PendingLoad },
    /// Send [`InputEvent::CooldownElapsed`] after `after`.
    ReleaseCooldown { token: CooldownToken, after: Duration },
    /// Send [`InputEvent::WarmupDue`] after `after`.
    Warmup { index: usize, after: Duration },
}

impl Effect {
    /// Identifier of the image this effect loads, if any.
    #[must_use]
    pub fn load_id(&self) -> Option<&ImageId> {
        match self {
            Effect::Load { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Load { id, .. } => f.debug_struct("Load").field("id", id).finish(),
            Effect::ReleaseCooldown { token, after } => f
                .debug_struct("ReleaseCooldown")
                .field("token", token)
                .field("after", after)
                .finish(),
            Effect::Warmup { index, after } => f
                .debug_struct("Warmup")
                .field("index", index)
                .field("after", after)
                .finish(),
        }
    }
}

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub default: DefaultAction,
    pub effects: Vec<Effect>,
}

impl Response {
    #[must_use]
    pub fn allow() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn prevent() -> Self {
        Self {
            default: DefaultAction::Prevent,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn is_prevented(&self) -> bool {
        self.default == DefaultAction::Prevent
    }
}

// =============================================================================
// Rule table
// =============================================================================

type Matcher = fn(&InputEvent) -> bool;
type Guard = fn(&GalleryViewer, &InputEvent, Instant) -> bool;
type Action = fn(&mut GalleryViewer, &InputEvent, Instant) -> Response;

struct Rule {
    name: &'static str,
    matches: Matcher,
    guard: Guard,
    action: Action,
}

/// Evaluated top to bottom; order matters where matchers overlap.
static RULES: &[Rule] = &[
    // Suppression comes first so nothing else sees a pinch.
    Rule {
        name: "multi-touch",
        matches: |event| {
            matches!(
                event,
                InputEvent::PointerDown { contacts, .. } | InputEvent::PointerMoved { contacts, .. }
                    if contacts.is_multi_touch()
            )
        },
        guard: always,
        action: suppress_multi_touch,
    },
    Rule {
        name: "context-menu",
        matches: |event| matches!(event, InputEvent::ContextMenu(_)),
        guard: always,
        action: prevent,
    },
    Rule {
        name: "drag-start",
        matches: |event| matches!(event, InputEvent::DragStart(_)),
        guard: always,
        action: prevent,
    },
    Rule {
        name: "cooldown-elapsed",
        matches: |event| matches!(event, InputEvent::CooldownElapsed(_)),
        guard: always,
        action: release_cooldown,
    },
    Rule {
        name: "key-escape",
        matches: |event| matches!(event, InputEvent::KeyPressed(Key::Escape)),
        guard: modal_open,
        action: close,
    },
    Rule {
        name: "key-next",
        matches: |event| matches!(event, InputEvent::KeyPressed(Key::ArrowRight)),
        guard: can_navigate,
        action: go_next,
    },
    Rule {
        name: "key-previous",
        matches: |event| matches!(event, InputEvent::KeyPressed(Key::ArrowLeft)),
        guard: can_navigate,
        action: go_previous,
    },
    Rule {
        name: "next-control",
        matches: |event| matches!(event, InputEvent::NextPressed),
        guard: can_navigate,
        action: go_next,
    },
    Rule {
        name: "previous-control",
        matches: |event| matches!(event, InputEvent::PreviousPressed),
        guard: can_navigate,
        action: go_previous,
    },
    Rule {
        name: "close-control",
        matches: |event| matches!(event, InputEvent::ClosePressed | InputEvent::BackdropClicked),
        guard: modal_open,
        action: close,
    },
    Rule {
        name: "thumbnail-click",
        matches: |event| matches!(event, InputEvent::ThumbnailClicked(_)),
        guard: modal_closed,
        action: open_clicked,
    },
    Rule {
        name: "pointer-down",
        matches: |event| matches!(event, InputEvent::PointerDown { .. }),
        guard: always,
        action: begin_gesture,
    },
    Rule {
        name: "pointer-moved",
        matches: |event| matches!(event, InputEvent::PointerMoved { .. }),
        guard: gesture_active,
        action: track_gesture,
    },
    Rule {
        name: "pointer-up",
        matches: |event| matches!(event, InputEvent::PointerUp { .. }),
        guard: gesture_active,
        action: finish_gesture,
    },
    Rule {
        name: "pointer-left",
        matches: |event| matches!(event, InputEvent::PointerLeft),
        guard: gesture_active,
        action: cancel_gesture,
    },
    Rule {
        name: "viewport-changed",
        matches: |event| matches!(event, InputEvent::ViewportChanged(_)),
        guard: always,
        action: viewport_changed,
    },
    Rule {
        name: "warmup-due",
        matches: |event| matches!(event, InputEvent::WarmupDue(_)),
        guard: always,
        action: warmup_due,
    },
    Rule {
        name: "load-settled",
        matches: |event| matches!(event, InputEvent::LoadSettled(_)),
        guard: always,
        action: load_settled,
    },
];

/// Runs the first rule accepting `event`.
pub(crate) fn dispatch(viewer: &mut GalleryViewer, event: &InputEvent, now: Instant) -> Response {
    let Some(rule) = RULES
        .iter()
        .find(|rule| (rule.matches)(event) && (rule.guard)(viewer, event, now))
    else {
        tracing::trace!(?event, "input ignored");
        return Response::allow();
    };

    tracing::trace!(rule = rule.name, "input rule matched");
    (rule.action)(viewer, event, now)
}

// -----------------------------------------------------------------------------
// Guards
// -----------------------------------------------------------------------------

fn always(_: &GalleryViewer, _: &InputEvent, _: Instant) -> bool {
    true
}

fn modal_open(viewer: &GalleryViewer, _: &InputEvent, _: Instant) -> bool {
    viewer.modal().is_open()
}

fn modal_closed(viewer: &GalleryViewer, _: &InputEvent, _: Instant) -> bool {
    !viewer.modal().is_open()
}

fn can_navigate(viewer: &GalleryViewer, _: &InputEvent, now: Instant) -> bool {
    viewer.modal().is_open() && !viewer.is_navigating(now)
}

fn gesture_active(viewer: &GalleryViewer, _: &InputEvent, _: Instant) -> bool {
    viewer.gesture_surface().is_some()
}

// -----------------------------------------------------------------------------
// Actions
// -----------------------------------------------------------------------------

fn prevent(_: &mut GalleryViewer, _: &InputEvent, _: Instant) -> Response {
    Response::prevent()
}

fn suppress_multi_touch(viewer: &mut GalleryViewer, _: &InputEvent, _: Instant) -> Response {
    viewer.cancel_gesture();
    Response::prevent()
}

fn release_cooldown(viewer: &mut GalleryViewer, event: &InputEvent, _: Instant) -> Response {
    if let InputEvent::CooldownElapsed(token) = event {
        viewer.release_cooldown(*token);
    }
    Response::allow()
}

fn close(viewer: &mut GalleryViewer, _: &InputEvent, _: Instant) -> Response {
    viewer.close();
    Response::prevent()
}

fn go_next(viewer: &mut GalleryViewer, _: &InputEvent, now: Instant) -> Response {
    Response::prevent().with_effects(viewer.next(now))
}

fn go_previous(viewer: &mut GalleryViewer, _: &InputEvent, now: Instant) -> Response {
    Response::prevent().with_effects(viewer.previous(now))
}

fn open_clicked(viewer: &mut GalleryViewer, event: &InputEvent, _: Instant) -> Response {
    let InputEvent::ThumbnailClicked(index) = *event else {
        return Response::allow();
    };
    Response::allow().with_effects(viewer.open_at(index))
}

fn begin_gesture(viewer: &mut GalleryViewer, event: &InputEvent, now: Instant) -> Response {
    if let InputEvent::PointerDown {
        surface, position, ..
    } = *event
    {
        viewer.begin_gesture(surface, position, now);
    }
    Response::allow()
}

fn track_gesture(viewer: &mut GalleryViewer, event: &InputEvent, _: Instant) -> Response {
    let InputEvent::PointerMoved { position, .. } = *event else {
        return Response::allow();
    };
    // A horizontal drag on the modal photo is ours, not a page scroll.
    if viewer.track_gesture(position) {
        Response::prevent()
    } else {
        Response::allow()
    }
}

fn finish_gesture(viewer: &mut GalleryViewer, event: &InputEvent, now: Instant) -> Response {
    let InputEvent::PointerUp { position } = *event else {
        return Response::allow();
    };
    let Some((surface, kind)) = viewer.finish_gesture(position, now) else {
        return Response::allow();
    };
    tracing::debug!(?surface, ?kind, "gesture classified");

    match (surface, kind) {
        (_, GestureKind::LongPress) => Response::prevent(),
        (Surface::Thumbnail(index), GestureKind::Tap) if !viewer.modal().is_open() => {
            Response::allow().with_effects(viewer.open_at(index))
        }
        (Surface::ModalImage, GestureKind::Swipe(direction)) => {
            let effects = if can_navigate(viewer, event, now) {
                match direction {
                    Direction::Next => viewer.next(now),
                    Direction::Previous => viewer.previous(now),
                }
            } else {
                Vec::new()
            };
            Response::prevent().with_effects(effects)
        }
        _ => Response::allow(),
    }
}

fn cancel_gesture(viewer: &mut GalleryViewer, _: &InputEvent, _: Instant) -> Response {
    viewer.cancel_gesture();
    Response::allow()
}

fn viewport_changed(viewer: &mut GalleryViewer, event: &InputEvent, _: Instant) -> Response {
    let InputEvent::ViewportChanged(viewport) = *event else {
        return Response::allow();
    };
    Response::allow().with_effects(viewer.viewport_changed(viewport))
}

fn warmup_due(viewer: &mut GalleryViewer, event: &InputEvent, _: Instant) -> Response {
    let InputEvent::WarmupDue(index) = *event else {
        return Response::allow();
    };
    Response::allow().with_effects(viewer.warmup_due(index))
}

fn load_settled(viewer: &mut GalleryViewer, event: &InputEvent, _: Instant) -> Response {
    if let InputEvent::LoadSettled(id) = event {
        viewer.load_settled(id);
    }
    Response::allow()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GallerySettings;
    use crate::gallery::{GalleryItems, ModalState};
    use crate::media::{ImageCache, LoadState};
    use crate::test_utils::ManualLoader;
    use std::sync::Arc;

    fn viewer(len: usize) -> (GalleryViewer, Arc<ManualLoader>) {
        let loader = Arc::new(ManualLoader::default());
        let cache = ImageCache::with_loader(loader.clone());
        let items = GalleryItems::from_ids((0..len).map(|i| format!("photo_{i}.webp")));
        (
            GalleryViewer::new(items, cache, GallerySettings::default()),
            loader,
        )
    }

    fn press(surface: Surface, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            surface,
            position: Point::new(x, y),
            contacts: Contacts::SINGLE,
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved {
            position: Point::new(x, y),
            contacts: Contacts::SINGLE,
        }
    }

    fn release(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let (mut viewer, _) = viewer(3);
        let now = Instant::now();
        for key in [Key::ArrowRight, Key::ArrowLeft, Key::Escape] {
            let response = viewer.dispatch(InputEvent::KeyPressed(key), now);
            assert!(!response.is_prevented());
            assert!(response.effects.is_empty());
        }
        assert_eq!(viewer.modal(), ModalState::Closed);
    }

    #[test]
    fn tap_on_thumbnail_opens_modal() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();

        viewer.dispatch(press(Surface::Thumbnail(2), 10.0, 10.0), start);
        viewer.dispatch(moved(13.0, 12.0), start + Duration::from_millis(40));
        let response = viewer.dispatch(release(13.0, 12.0), start + Duration::from_millis(100));

        assert_eq!(viewer.modal(), ModalState::Open(2));
        assert_eq!(response.effects.len(), 3);
    }

    #[test]
    fn long_press_on_thumbnail_is_suppressed() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();

        viewer.dispatch(press(Surface::Thumbnail(2), 10.0, 10.0), start);
        let response = viewer.dispatch(release(12.0, 10.0), start + Duration::from_millis(600));

        assert!(response.is_prevented());
        assert_eq!(viewer.modal(), ModalState::Closed);
    }

    #[test]
    fn scrolling_over_thumbnail_does_not_open() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();

        viewer.dispatch(press(Surface::Thumbnail(1), 10.0, 10.0), start);
        viewer.dispatch(moved(10.0, 60.0), start + Duration::from_millis(30));
        let response = viewer.dispatch(release(10.0, 60.0), start + Duration::from_millis(90));

        assert!(!response.is_prevented());
        assert_eq!(viewer.modal(), ModalState::Closed);
    }

    #[test]
    fn swipe_on_modal_navigates_both_ways() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();
        viewer.open_at(2);

        viewer.dispatch(press(Surface::ModalImage, 200.0, 200.0), start);
        let drag = viewer.dispatch(moved(150.0, 205.0), start + Duration::from_millis(20));
        assert!(drag.is_prevented());
        let response = viewer.dispatch(release(120.0, 205.0), start + Duration::from_millis(60));
        assert!(response.is_prevented());
        assert_eq!(viewer.modal(), ModalState::Open(3));

        let later = start + Duration::from_millis(500);
        viewer.dispatch(press(Surface::ModalImage, 200.0, 200.0), later);
        viewer.dispatch(release(280.0, 190.0), later + Duration::from_millis(60));
        assert_eq!(viewer.modal(), ModalState::Open(2));
    }

    #[test]
    fn multi_touch_cancels_gesture_and_is_prevented() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();
        viewer.open_at(1);

        viewer.dispatch(press(Surface::ModalImage, 200.0, 200.0), start);
        let pinch = viewer.dispatch(
            InputEvent::PointerMoved {
                position: Point::new(100.0, 200.0),
                contacts: Contacts::new(2),
            },
            start + Duration::from_millis(10),
        );
        assert!(pinch.is_prevented());

        let response = viewer.dispatch(release(100.0, 200.0), start + Duration::from_millis(50));
        assert!(!response.is_prevented());
        assert_eq!(viewer.modal(), ModalState::Open(1));
    }

    #[test]
    fn two_finger_press_on_thumbnail_is_prevented_and_never_opens() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();

        let down = viewer.dispatch(
            InputEvent::PointerDown {
                surface: Surface::Thumbnail(2),
                position: Point::new(10.0, 10.0),
                contacts: Contacts::new(2),
            },
            start,
        );
        assert!(down.is_prevented());
        assert!(down.effects.is_empty());

        let up = viewer.dispatch(release(10.0, 10.0), start + Duration::from_millis(80));
        assert!(up.effects.is_empty());
        assert_eq!(viewer.modal(), ModalState::Closed);
    }

    #[test]
    fn two_finger_press_on_modal_is_prevented_and_never_swipes() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();
        viewer.open_at(1);

        let down = viewer.dispatch(
            InputEvent::PointerDown {
                surface: Surface::ModalImage,
                position: Point::new(200.0, 200.0),
                contacts: Contacts::new(2),
            },
            start,
        );
        assert!(down.is_prevented());

        viewer.dispatch(release(100.0, 200.0), start + Duration::from_millis(60));
        assert_eq!(viewer.modal(), ModalState::Open(1));
    }

    #[test]
    fn pointer_leave_cancels_mouse_drag() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();
        viewer.open_at(1);

        viewer.dispatch(press(Surface::ModalImage, 200.0, 200.0), start);
        viewer.dispatch(moved(100.0, 200.0), start + Duration::from_millis(10));
        viewer.dispatch(InputEvent::PointerLeft, start + Duration::from_millis(20));
        viewer.dispatch(release(90.0, 200.0), start + Duration::from_millis(30));

        assert_eq!(viewer.modal(), ModalState::Open(1));
    }

    #[test]
    fn context_menu_and_drag_are_always_prevented() {
        let (mut viewer, _) = viewer(2);
        let now = Instant::now();
        assert!(viewer
            .dispatch(InputEvent::ContextMenu(Surface::Thumbnail(0)), now)
            .is_prevented());
        assert!(viewer
            .dispatch(InputEvent::DragStart(Surface::ModalImage), now)
            .is_prevented());
    }

    #[test]
    fn backdrop_and_close_control_close_the_modal() {
        let (mut viewer, _) = viewer(2);
        let now = Instant::now();
        viewer.open_at(0);
        viewer.dispatch(InputEvent::BackdropClicked, now);
        assert_eq!(viewer.modal(), ModalState::Closed);

        viewer.open_at(1);
        viewer.dispatch(InputEvent::ClosePressed, now);
        assert_eq!(viewer.modal(), ModalState::Closed);
    }

    #[test]
    fn cooldown_elapsed_reenables_navigation_early() {
        let (mut viewer, _) = viewer(5);
        let start = Instant::now();
        viewer.open_at(0);

        let response = viewer.dispatch(InputEvent::NextPressed, start);
        let token = response
            .effects
            .iter()
            .find_map(|effect| match effect {
                Effect::ReleaseCooldown { token, .. } => Some(*token),
                _ => None,
            })
            .expect("cooldown scheduled");

        let soon = start + Duration::from_millis(50);
        viewer.dispatch(InputEvent::NextPressed, soon);
        assert_eq!(viewer.modal(), ModalState::Open(1));

        viewer.dispatch(InputEvent::CooldownElapsed(token), soon);
        viewer.dispatch(InputEvent::NextPressed, soon);
        assert_eq!(viewer.modal(), ModalState::Open(2));
    }

    #[test]
    fn thumbnail_click_is_ignored_while_open() {
        let (mut viewer, _) = viewer(5);
        let now = Instant::now();
        viewer.dispatch(InputEvent::ThumbnailClicked(1), now);
        viewer.dispatch(InputEvent::ThumbnailClicked(3), now);
        assert_eq!(viewer.modal(), ModalState::Open(1));
    }

    #[test]
    fn viewport_change_requests_entering_thumbnails() {
        let (mut viewer, _) = viewer(30);
        viewer.layout_grid(&crate::gallery::GridLayout {
            columns: 3,
            cell_size: 100.0,
            spacing: 0.0,
        });

        let viewport = Rectangle::new(Point::ORIGIN, iced::Size::new(300.0, 200.0));
        let response = viewer.dispatch(InputEvent::ViewportChanged(viewport), Instant::now());

        // Visible rows 0..2 plus 600 px of margin → rows 0..8, all 24 cells.
        assert_eq!(response.effects.len(), 24);
        assert_eq!(viewer.thumbnail_state(23), LoadState::Loading);
        assert_eq!(viewer.thumbnail_state(24), LoadState::NotRequested);
    }
}
