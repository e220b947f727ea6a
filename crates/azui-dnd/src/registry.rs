//! Per-element behavior registry.
//!
//! Each behavior kind keeps at most one instance per element. Creating a
//! behavior on an element that already has one of that kind returns the
//! existing instance instead of building a second.

use crate::draggable::Draggable;
use crate::droppable::Droppable;
use crate::resizable::Resizable;
use crate::sortable::Sortable;
use azui_core::alloc::HashMap;
use azui_dom::ElementId;

/// The behavior kinds an element can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Draggable,
    Droppable,
    Resizable,
    Sortable,
}

/// A behavior bound to a single element.
pub trait Behavior: Sized {
    /// Registry slot this behavior lives in.
    const KIND: BehaviorKind;

    /// Options used when the behavior is first created.
    type Options: Default + Clone;

    /// Build a fresh instance bound to `element`.
    fn create(element: ElementId, options: Self::Options) -> Self;

    /// The element this instance is bound to.
    fn element(&self) -> ElementId;

    fn options(&self) -> &Self::Options;
}

/// Instances of one behavior kind, keyed by element.
#[derive(Debug)]
pub struct BehaviorStore<B> {
    instances: HashMap<ElementId, B>,
}

impl<B> Default for BehaviorStore<B> {
    fn default() -> Self {
        Self {
            instances: HashMap::default(),
        }
    }
}

impl<B: Behavior> BehaviorStore<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing instance for `element` or create one.
    ///
    /// The boolean is `true` when a new instance was created. Options are
    /// ignored for an existing instance.
    pub fn make(&mut self, element: ElementId, options: Option<B::Options>) -> (&mut B, bool) {
        let created = !self.instances.contains_key(&element);
        let instance = self
            .instances
            .entry(element)
            .or_insert_with(|| B::create(element, options.unwrap_or_default()));
        (instance, created)
    }

    pub fn get(&self, element: ElementId) -> Option<&B> {
        self.instances.get(&element)
    }

    pub fn get_mut(&mut self, element: ElementId) -> Option<&mut B> {
        self.instances.get_mut(&element)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.instances.contains_key(&element)
    }

    pub fn remove(&mut self, element: ElementId) -> Option<B> {
        self.instances.remove(&element)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &B)> {
        self.instances.iter().map(|(id, b)| (*id, b))
    }
}

/// All behaviors bound to elements of one document.
///
/// An element may carry several kinds at once (a sortable item is both a
/// draggable and a droppable).
#[derive(Debug, Default)]
pub struct Registry {
    pub(crate) draggables: BehaviorStore<Draggable>,
    pub(crate) droppables: BehaviorStore<Droppable>,
    pub(crate) resizables: BehaviorStore<Resizable>,
    pub(crate) sortables: BehaviorStore<Sortable>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draggables(&self) -> &BehaviorStore<Draggable> {
        &self.draggables
    }

    pub fn droppables(&self) -> &BehaviorStore<Droppable> {
        &self.droppables
    }

    pub fn resizables(&self) -> &BehaviorStore<Resizable> {
        &self.resizables
    }

    pub fn sortables(&self) -> &BehaviorStore<Sortable> {
        &self.sortables
    }

    pub fn has(&self, element: ElementId, kind: BehaviorKind) -> bool {
        match kind {
            BehaviorKind::Draggable => self.draggables.contains(element),
            BehaviorKind::Droppable => self.droppables.contains(element),
            BehaviorKind::Resizable => self.resizables.contains(element),
            BehaviorKind::Sortable => self.sortables.contains(element),
        }
    }

    /// Kinds bound to an element.
    pub fn kinds(&self, element: ElementId) -> Vec<BehaviorKind> {
        [
            BehaviorKind::Draggable,
            BehaviorKind::Droppable,
            BehaviorKind::Resizable,
            BehaviorKind::Sortable,
        ]
        .into_iter()
        .filter(|kind| self.has(element, *kind))
        .collect()
    }

    /// Drop one behavior kind from an element. Returns whether it was bound.
    pub fn detach_kind(&mut self, element: ElementId, kind: BehaviorKind) -> bool {
        match kind {
            BehaviorKind::Draggable => self.draggables.remove(element).is_some(),
            BehaviorKind::Droppable => self.droppables.remove(element).is_some(),
            BehaviorKind::Resizable => self.resizables.remove(element).is_some(),
            BehaviorKind::Sortable => self.sortables.remove(element).is_some(),
        }
    }

    /// Drop every behavior bound to an element, returning the kinds removed.
    pub fn detach(&mut self, element: ElementId) -> Vec<BehaviorKind> {
        let kinds = self.kinds(element);
        for kind in &kinds {
            self.detach_kind(element, *kind);
        }
        kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::DndEvent;
    use crate::draggable::{Containment, DraggableOptions};
    use crate::droppable::DroppableOptions;

    #[test]
    fn test_make_is_idempotent() {
        let mut store = BehaviorStore::<Draggable>::new();
        let el = ElementId(3);

        let (first, created) = store.make(
            el,
            Some(DraggableOptions::default().containment(Containment::Parent)),
        );
        assert!(created);
        assert_eq!(first.options().containment, Containment::Parent);

        let (second, created) = store.make(el, Some(DraggableOptions::default()));
        assert!(!created);
        assert_eq!(second.options().containment, Containment::Parent);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_multiple_kinds_per_element() {
        let mut registry = Registry::new();
        let el = ElementId(7);
        registry.draggables.make(el, None);
        registry
            .droppables
            .make(el, Some(DroppableOptions::new(DndEvent::TARGET_CENTER)));

        assert_eq!(
            registry.kinds(el),
            vec![BehaviorKind::Draggable, BehaviorKind::Droppable]
        );
        assert!(registry.detach_kind(el, BehaviorKind::Draggable));
        assert!(!registry.has(el, BehaviorKind::Draggable));
        assert!(registry.has(el, BehaviorKind::Droppable));
    }

    #[test]
    fn test_detach_all() {
        let mut registry = Registry::new();
        let el = ElementId(1);
        registry.draggables.make(el, None);
        registry.resizables.make(el, None);

        let removed = registry.detach(el);
        assert_eq!(removed.len(), 2);
        assert!(registry.kinds(el).is_empty());
        assert!(registry.detach(el).is_empty());
    }
}
