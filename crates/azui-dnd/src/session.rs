//! Per-gesture state.

use crate::draggable::DetachedAxes;
use crate::pointer::{PointerDevice, PointerEvent};
use crate::resizable::ResizeHandles;
use crate::sortable::PinnedStyle;
use azui_dom::ElementId;
use std::time::Duration;

/// Window after a cross-container adoption during which center events are
/// ignored, so the stale layout of the old container cannot trigger sorts.
pub const ADOPTION_GUARD: Duration = Duration::from_millis(50);

/// Engine-wide interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DndState {
    #[default]
    Idle,
    /// Pressed on a draggable, resist distance not yet exceeded.
    Pending { device: PointerDevice },
    Dragging { device: PointerDevice },
    Resizing { device: PointerDevice },
}

/// Sortable bookkeeping for a drag that started on a sortable item.
#[derive(Debug, Clone)]
pub struct SortBinding {
    pub(crate) origin_container: ElementId,
    pub(crate) current_container: ElementId,
    /// Container the pointer last left.
    pub(crate) detached_from: Option<ElementId>,
    pub(crate) placeholder_mode: bool,
    /// Child order of the origin container at press time.
    pub(crate) origin_order: Vec<ElementId>,
}

impl SortBinding {
    pub fn origin_container(&self) -> ElementId {
        self.origin_container
    }

    /// Container that currently owns the dragged item.
    pub fn current_container(&self) -> ElementId {
        self.current_container
    }

    pub fn detached_from(&self) -> Option<ElementId> {
        self.detached_from
    }

    pub fn placeholder_mode(&self) -> bool {
        self.placeholder_mode
    }
}

/// An active drag gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub(crate) item: ElementId,
    pub(crate) device: PointerDevice,
    /// Past the resist distance.
    pub(crate) started: bool,
    pub(crate) sort: Option<SortBinding>,
    pub(crate) detached: DetachedAxes,
    pub(crate) guard_until: Option<Duration>,
    /// Inline style of the item before the drag touched it.
    pub(crate) pinned: PinnedStyle,
    pub(crate) last_pointer: PointerEvent,
}

impl DragSession {
    pub(crate) fn new(item: ElementId, pointer: PointerEvent, sort: Option<SortBinding>) -> Self {
        Self {
            item,
            device: pointer.device,
            started: false,
            sort,
            detached: DetachedAxes::default(),
            guard_until: None,
            pinned: PinnedStyle::default(),
            last_pointer: pointer,
        }
    }

    pub fn item(&self) -> ElementId {
        self.item
    }

    pub fn device(&self) -> PointerDevice {
        self.device
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn sort(&self) -> Option<&SortBinding> {
        self.sort.as_ref()
    }

    pub fn detached(&self) -> DetachedAxes {
        self.detached
    }

    pub fn last_pointer(&self) -> PointerEvent {
        self.last_pointer
    }

    /// Whether the post-adoption guard is still active at `now`.
    pub fn is_guarded(&self, now: Duration) -> bool {
        self.guard_until.is_some_and(|until| now < until)
    }
}

/// An active resize gesture.
#[derive(Debug, Clone, Copy)]
pub struct ResizeSession {
    pub(crate) element: ElementId,
    pub(crate) handle: ResizeHandles,
    pub(crate) device: PointerDevice,
}

impl ResizeSession {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn handle(&self) -> ResizeHandles {
        self.handle
    }
}

/// The single gesture the engine tracks at a time.
#[derive(Debug, Clone)]
pub enum Gesture {
    Drag(DragSession),
    Resize(ResizeSession),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerPhase;
    use azui_core::math::Vec2;

    #[test]
    fn test_guard_window() {
        let pointer = PointerEvent::mouse(PointerPhase::Down, Vec2::ZERO, Duration::ZERO);
        let mut session = DragSession::new(ElementId(1), pointer, None);
        assert!(!session.is_guarded(Duration::ZERO));

        session.guard_until = Some(Duration::from_millis(100) + ADOPTION_GUARD);
        assert!(session.is_guarded(Duration::from_millis(149)));
        assert!(!session.is_guarded(Duration::from_millis(150)));
    }
}
