//! Drop event bus.
//!
//! On every pointer move of an active drag the bus finds, among registered
//! droppables, the element under the pointer and the element under the
//! dragged element's center. It emits an event only when either target
//! changes, never once per move.

use crate::droppable::Droppable;
use crate::pointer::PointerEvent;
use crate::registry::BehaviorStore;
use azui_core::profiling::profile_function;
use azui_dom::{Document, ElementId};
use bitflags::bitflags;

bitflags! {
    /// Drop event kinds, also used as a droppable's interest mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DndEvent: u8 {
        /// The pointer entered a droppable.
        const POINTER_IN = 1 << 0;
        /// The pointer left a droppable.
        const POINTER_OUT = 1 << 1;
        /// The dragged element's center entered a droppable.
        const TARGET_CENTER_IN = 1 << 2;
        /// The dragged element's center left a droppable.
        const TARGET_CENTER_OUT = 1 << 3;

        const POINTER = Self::POINTER_IN.bits() | Self::POINTER_OUT.bits();
        const TARGET_CENTER = Self::TARGET_CENTER_IN.bits() | Self::TARGET_CENTER_OUT.bits();
    }
}

/// A drop event delivered to a droppable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropEvent {
    /// A single event kind bit.
    pub kind: DndEvent,
    /// The element being dragged.
    pub source: ElementId,
    /// The droppable receiving the event.
    pub target: ElementId,
    /// Pointer event that caused the transition.
    pub pointer: PointerEvent,
}

/// Tracks the active pointer target and active center target of a drag.
#[derive(Debug, Default)]
pub struct EventBus {
    pointer_target: Option<ElementId>,
    center_target: Option<ElementId>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Droppable currently under the pointer.
    pub fn pointer_target(&self) -> Option<ElementId> {
        self.pointer_target
    }

    /// Droppable currently under the dragged element's center.
    pub fn center_target(&self) -> Option<ElementId> {
        self.center_target
    }

    /// Forget all active targets. Called when a gesture ends.
    pub fn reset(&mut self) {
        self.pointer_target = None;
        self.center_target = None;
    }

    /// Forget an element that no longer exists.
    pub fn forget(&mut self, element: ElementId) {
        if self.pointer_target == Some(element) {
            self.pointer_target = None;
        }
        if self.center_target == Some(element) {
            self.center_target = None;
        }
    }

    /// Recompute both targets for the current drag frame.
    ///
    /// Layout must be up to date. When several droppables match, the one
    /// latest in tree order (the topmost) wins. The source and its subtree
    /// never match. The returned events list `*_OUT` transitions before
    /// `*_IN` transitions; each event is only produced if the droppable
    /// declared interest in that kind.
    pub fn tick(
        &mut self,
        doc: &Document,
        droppables: &BehaviorStore<Droppable>,
        source: ElementId,
        pointer: &PointerEvent,
    ) -> Vec<DropEvent> {
        profile_function!();

        let center = doc.bounding_rect(source).center();
        let mut pointer_candidate = None;
        let mut center_candidate = None;

        for id in doc.tree_order() {
            let Some(droppable) = droppables.get(id) else {
                continue;
            };
            if doc.contains(source, id) || !droppable.accepts(doc, source) {
                continue;
            }
            let rect = doc.bounding_rect(id);
            if !rect.has_area() {
                continue;
            }
            let interest = droppable.interest();
            if interest.intersects(DndEvent::POINTER) && rect.contains(pointer.position) {
                pointer_candidate = Some(id);
            }
            if interest.intersects(DndEvent::TARGET_CENTER) && rect.contains(center) {
                center_candidate = Some(id);
            }
        }

        let mut events = Vec::new();
        let mut emit = |kind: DndEvent, target: Option<ElementId>| {
            let Some(target) = target else {
                return;
            };
            let interested = droppables
                .get(target)
                .is_some_and(|d| d.interest().contains(kind));
            if interested {
                events.push(DropEvent {
                    kind,
                    source,
                    target,
                    pointer: *pointer,
                });
            }
        };

        let pointer_changed = self.pointer_target != pointer_candidate;
        let center_changed = self.center_target != center_candidate;

        if pointer_changed {
            emit(DndEvent::POINTER_OUT, self.pointer_target);
        }
        if center_changed {
            emit(DndEvent::TARGET_CENTER_OUT, self.center_target);
        }
        if pointer_changed {
            emit(DndEvent::POINTER_IN, pointer_candidate);
        }
        if center_changed {
            emit(DndEvent::TARGET_CENTER_IN, center_candidate);
        }

        self.pointer_target = pointer_candidate;
        self.center_target = center_candidate;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::droppable::DroppableOptions;
    use crate::pointer::PointerPhase;
    use azui_core::geometry::Size;
    use azui_core::math::Vec2;
    use azui_dom::Positioning;
    use std::time::Duration;

    fn boxed(doc: &mut Document, x: f32, y: f32, w: f32, h: f32) -> ElementId {
        let el = doc.create_element("div");
        doc.update_style(el, |s| {
            s.position = Positioning::Absolute;
            s.left = Some(x);
            s.top = Some(y);
            s.set_size(w, h);
        })
        .unwrap();
        doc.append_child(doc.root(), el).unwrap();
        el
    }

    fn move_to(doc: &mut Document, el: ElementId, x: f32, y: f32) {
        doc.update_style(el, |s| {
            s.left = Some(x);
            s.top = Some(y);
        })
        .unwrap();
        doc.update_layout();
    }

    fn at(x: f32, y: f32) -> PointerEvent {
        PointerEvent::mouse(PointerPhase::Move, Vec2::new(x, y), Duration::ZERO)
    }

    fn kinds(events: &[DropEvent]) -> Vec<(DndEvent, ElementId)> {
        events.iter().map(|e| (e.kind, e.target)).collect()
    }

    struct Scene {
        doc: Document,
        droppables: BehaviorStore<Droppable>,
        left: ElementId,
        right: ElementId,
        source: ElementId,
    }

    fn scene(interest: DndEvent) -> Scene {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let left = boxed(&mut doc, 0.0, 0.0, 100.0, 100.0);
        let right = boxed(&mut doc, 100.0, 0.0, 100.0, 100.0);
        let source = boxed(&mut doc, 300.0, 300.0, 20.0, 20.0);
        doc.update_layout();

        let mut droppables = BehaviorStore::new();
        droppables.make(left, Some(DroppableOptions::new(interest)));
        droppables.make(right, Some(DroppableOptions::new(interest)));
        Scene {
            doc,
            droppables,
            left,
            right,
            source,
        }
    }

    #[test]
    fn test_one_event_per_transition() {
        let Scene {
            mut doc,
            droppables,
            left,
            source,
            ..
        } = scene(DndEvent::all());
        let mut bus = EventBus::new();

        move_to(&mut doc, source, 20.0, 20.0);
        let events = bus.tick(&doc, &droppables, source, &at(30.0, 30.0));
        assert_eq!(
            kinds(&events),
            vec![
                (DndEvent::POINTER_IN, left),
                (DndEvent::TARGET_CENTER_IN, left)
            ]
        );

        move_to(&mut doc, source, 25.0, 25.0);
        assert!(bus.tick(&doc, &droppables, source, &at(35.0, 35.0)).is_empty());
        assert_eq!(bus.pointer_target(), Some(left));
        assert_eq!(bus.center_target(), Some(left));
    }

    #[test]
    fn test_out_precedes_in() {
        let Scene {
            mut doc,
            droppables,
            left,
            right,
            source,
        } = scene(DndEvent::all());
        let mut bus = EventBus::new();

        move_to(&mut doc, source, 20.0, 20.0);
        bus.tick(&doc, &droppables, source, &at(30.0, 30.0));

        move_to(&mut doc, source, 140.0, 20.0);
        let events = bus.tick(&doc, &droppables, source, &at(150.0, 30.0));
        assert_eq!(
            kinds(&events),
            vec![
                (DndEvent::POINTER_OUT, left),
                (DndEvent::TARGET_CENTER_OUT, left),
                (DndEvent::POINTER_IN, right),
                (DndEvent::TARGET_CENTER_IN, right),
            ]
        );
    }

    #[test]
    fn test_interest_mask_filters_events() {
        let Scene {
            mut doc,
            droppables,
            left,
            source,
            ..
        } = scene(DndEvent::POINTER_IN);
        let mut bus = EventBus::new();

        move_to(&mut doc, source, 20.0, 20.0);
        let events = bus.tick(&doc, &droppables, source, &at(30.0, 30.0));
        assert_eq!(kinds(&events), vec![(DndEvent::POINTER_IN, left)]);
        assert_eq!(bus.center_target(), None);

        move_to(&mut doc, source, 400.0, 400.0);
        let events = bus.tick(&doc, &droppables, source, &at(410.0, 410.0));
        assert!(events.is_empty());
        assert_eq!(bus.pointer_target(), None);
    }

    #[test]
    fn test_topmost_match_wins() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let outer = boxed(&mut doc, 0.0, 0.0, 200.0, 200.0);
        let inner = doc.create_element("div");
        doc.update_style(inner, |s| s.set_size(50.0, 50.0)).unwrap();
        doc.append_child(outer, inner).unwrap();
        let source = boxed(&mut doc, 10.0, 10.0, 10.0, 10.0);
        doc.update_layout();

        let mut droppables = BehaviorStore::new();
        droppables.make(outer, Some(DroppableOptions::new(DndEvent::POINTER)));
        droppables.make(inner, Some(DroppableOptions::new(DndEvent::POINTER)));

        let mut bus = EventBus::new();
        let events = bus.tick(&doc, &droppables, source, &at(15.0, 15.0));
        assert_eq!(kinds(&events), vec![(DndEvent::POINTER_IN, inner)]);
    }

    #[test]
    fn test_source_never_targets_itself() {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let source = boxed(&mut doc, 0.0, 0.0, 100.0, 100.0);
        doc.update_layout();

        let mut droppables = BehaviorStore::new();
        droppables.make(source, Some(DroppableOptions::new(DndEvent::all())));

        let mut bus = EventBus::new();
        assert!(bus.tick(&doc, &droppables, source, &at(50.0, 50.0)).is_empty());
    }

    #[test]
    fn test_accept_filter_and_disabled() {
        let Scene {
            mut doc,
            mut droppables,
            left,
            right,
            source,
        } = scene(DndEvent::POINTER);
        droppables.remove(left);
        droppables.make(left, Some(DroppableOptions::new(DndEvent::POINTER).accept("tab")));
        droppables.get_mut(right).unwrap().set_disabled(true);

        let mut bus = EventBus::new();
        assert!(bus.tick(&doc, &droppables, source, &at(50.0, 50.0)).is_empty());
        assert!(bus.tick(&doc, &droppables, source, &at(150.0, 50.0)).is_empty());

        doc.add_class(source, "tab");
        let events = bus.tick(&doc, &droppables, source, &at(50.0, 50.0));
        assert_eq!(kinds(&events), vec![(DndEvent::POINTER_IN, left)]);
    }

    #[test]
    fn test_reset_and_forget() {
        let Scene {
            mut doc,
            droppables,
            left,
            source,
            ..
        } = scene(DndEvent::all());
        let mut bus = EventBus::new();
        move_to(&mut doc, source, 20.0, 20.0);
        bus.tick(&doc, &droppables, source, &at(30.0, 30.0));

        bus.forget(left);
        assert_eq!(bus.pointer_target(), None);
        assert_eq!(bus.center_target(), None);

        bus.tick(&doc, &droppables, source, &at(30.0, 30.0));
        bus.reset();
        assert_eq!(bus.pointer_target(), None);
    }
}
