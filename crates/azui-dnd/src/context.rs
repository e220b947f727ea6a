//! Gesture routing.
//!
//! [`DndContext`] owns the document, the behavior registry, the event bus and
//! the single in-flight gesture. Hosts feed it raw pointer events; it turns
//! them into draggable movement, bus transitions, sortable reordering and
//! cross-container adoption.

use crate::bus::{DndEvent, DropEvent, EventBus};
use crate::classes;
use crate::decision::{Decision, run_hook};
use crate::draggable::{Containment, DetachedAxes, DragEvent, Draggable, DraggableOptions};
use crate::droppable::{Droppable, DroppableOptions};
use crate::pointer::{PointerEvent, PointerPhase};
use crate::registry::{Behavior, BehaviorKind, Registry};
use crate::resizable::{ResizeEvent, Resizable, ResizableOptions};
use crate::session::{ADOPTION_GUARD, DndState, DragSession, Gesture, ResizeSession, SortBinding};
use crate::sortable::{
    AddEvent, ContainerEvent, ItemEvent, PinnedStyle, Sortable, SortableOptions, StopData,
    sortable_items,
};
use azui_core::math::Vec2;
use azui_core::profiling::profile_function;
use azui_dom::{Document, DomResult, ElementId, Visibility};
use std::time::Duration;
use tracing::{debug, trace};

/// Interaction engine for one document.
#[derive(Debug)]
pub struct DndContext {
    document: Document,
    registry: Registry,
    bus: EventBus,
    gesture: Option<Gesture>,
    /// Latest timestamp seen from the host.
    now: Duration,
}

impl DndContext {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            registry: Registry::new(),
            bus: EventBus::new(),
            gesture: None,
            now: Duration::ZERO,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for building the tree.
    ///
    /// Mutating elements that take part in an active gesture is not
    /// supported; use [`DndContext::remove_element`] to drop them.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn state(&self) -> DndState {
        match &self.gesture {
            None => DndState::Idle,
            Some(Gesture::Drag(session)) if session.started => DndState::Dragging {
                device: session.device,
            },
            Some(Gesture::Drag(session)) => DndState::Pending {
                device: session.device,
            },
            Some(Gesture::Resize(session)) => DndState::Resizing {
                device: session.device,
            },
        }
    }

    /// The active drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.gesture {
            Some(Gesture::Drag(session)) => Some(session),
            _ => None,
        }
    }

    /// The active resize, if any.
    pub fn resize_session(&self) -> Option<&ResizeSession> {
        match &self.gesture {
            Some(Gesture::Resize(session)) => Some(session),
            _ => None,
        }
    }

    pub fn sortable(&self, element: ElementId) -> Option<&Sortable> {
        self.registry.sortables.get(element)
    }

    pub fn draggable(&self, element: ElementId) -> Option<&Draggable> {
        self.registry.draggables.get(element)
    }

    // ---------------------------------------------------------------------
    // Factories
    // ---------------------------------------------------------------------

    /// Bind a draggable to `element`, or return the one already bound.
    pub fn make_draggable(
        &mut self,
        element: ElementId,
        options: Option<DraggableOptions>,
    ) -> &mut Draggable {
        let (draggable, created) = self.registry.draggables.make(element, options);
        if created {
            debug!(?element, "draggable created");
        }
        draggable
    }

    /// Bind a droppable to `element`, or return the one already bound.
    pub fn make_droppable(
        &mut self,
        element: ElementId,
        options: Option<DroppableOptions>,
    ) -> &mut Droppable {
        let (droppable, created) = self.registry.droppables.make(element, options);
        if created {
            debug!(?element, interest = ?droppable.interest(), "droppable created");
        }
        droppable
    }

    /// Bind a resizable to `element`, or return the one already bound.
    pub fn make_resizable(
        &mut self,
        element: ElementId,
        options: Option<ResizableOptions>,
    ) -> &mut Resizable {
        let (resizable, created) = self.registry.resizables.make(element, options);
        if created {
            debug!(?element, "resizable created");
        }
        resizable
    }

    /// Bind a sortable to a container, or return the one already bound.
    ///
    /// On creation every `azSortableItem` child becomes a draggable and a
    /// center droppable; a detachable container also becomes a pointer
    /// droppable so it can adopt items from other containers.
    pub fn make_sortable(
        &mut self,
        element: ElementId,
        options: Option<SortableOptions>,
    ) -> &mut Sortable {
        if !self.registry.sortables.contains(element) {
            let options = options.unwrap_or_default();
            let detachable = options.detachable;
            self.registry.sortables.make(element, Some(options));
            if detachable {
                self.registry
                    .droppables
                    .make(element, Some(DroppableOptions::new(DndEvent::POINTER)));
            }
            let items = sortable_items(&self.document, element);
            for item in &items {
                self.bind_item(*item);
            }
            debug!(?element, items = items.len(), detachable, "sortable created");
        }
        let (sortable, _) = self.registry.sortables.make(element, None);
        sortable
    }

    fn bind_item(&mut self, item: ElementId) {
        self.document.add_class(item, classes::SORTABLE_ITEM);
        self.registry.draggables.make(
            item,
            Some(DraggableOptions::default().containment(Containment::Parent)),
        );
        self.registry
            .droppables
            .make(item, Some(DroppableOptions::new(DndEvent::TARGET_CENTER)));
    }

    /// Insert `element` into a sortable at the nearest position to `cursor`
    /// (or at the end) and make it a sortable item.
    ///
    /// Returns `false` if the `add` hook vetoed or the insertion failed.
    pub fn sortable_add(
        &mut self,
        container: ElementId,
        element: ElementId,
        cursor: Option<Vec2>,
    ) -> bool {
        let Some(sortable) = self.registry.sortables.get(container) else {
            debug!(?container, "add ignored: not a sortable");
            return false;
        };
        let event = AddEvent {
            container,
            element,
            cursor,
        };
        if run_hook(sortable.options().add.as_ref(), &event).is_veto() {
            debug!(?container, ?element, "add vetoed");
            return false;
        }

        self.document.update_layout();
        if let Err(err) = sortable.place(&mut self.document, element, cursor) {
            debug!(%err, ?element, "add failed");
            return false;
        }
        self.bind_item(element);
        true
    }

    /// Drop one behavior kind from an element.
    ///
    /// An active gesture involving the element is cancelled first.
    pub fn teardown(&mut self, element: ElementId, kind: BehaviorKind) -> bool {
        if self.gesture_involves(element) {
            self.cancel();
        }
        if kind == BehaviorKind::Sortable
            && self
                .registry
                .sortables
                .get(element)
                .is_some_and(|s| s.options().detachable)
        {
            self.registry.droppables.remove(element);
        }
        self.registry.detach_kind(element, kind)
    }

    /// Destroy an element and its subtree, dropping every bound behavior.
    ///
    /// An active gesture involving the element is cancelled first.
    pub fn remove_element(&mut self, element: ElementId) -> DomResult<Vec<ElementId>> {
        if self.gesture_involves(element) {
            self.cancel();
        }
        let destroyed = self.document.destroy(element)?;
        for id in &destroyed {
            self.registry.detach(*id);
            self.bus.forget(*id);
        }
        debug!(?element, count = destroyed.len(), "element removed");
        Ok(destroyed)
    }

    fn gesture_involves(&self, element: ElementId) -> bool {
        let doc = &self.document;
        match &self.gesture {
            Some(Gesture::Drag(session)) => {
                doc.contains(element, session.item)
                    || session.sort.as_ref().is_some_and(|binding| {
                        doc.contains(element, binding.origin_container)
                            || doc.contains(element, binding.current_container)
                    })
            }
            Some(Gesture::Resize(session)) => doc.contains(element, session.element),
            None => false,
        }
    }

    // ---------------------------------------------------------------------
    // Pointer input
    // ---------------------------------------------------------------------

    /// Dispatch a raw pointer event by phase.
    pub fn handle(&mut self, event: PointerEvent) -> Option<StopData> {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(event);
                None
            }
            PointerPhase::Move => {
                self.pointer_move(event);
                None
            }
            PointerPhase::Up => self.pointer_up(event),
            PointerPhase::Cancel => {
                self.cancel();
                None
            }
        }
    }

    /// Advance the clock, expiring the adoption guard when due.
    pub fn advance(&mut self, now: Duration) {
        self.now = self.now.max(now);
        let now = self.now;
        if let Some(Gesture::Drag(session)) = self.gesture.as_mut()
            && session.guard_until.is_some_and(|until| now >= until)
        {
            session.guard_until = None;
            log_dom(
                self.document
                    .update_style(session.item, |s| s.visibility = Visibility::Visible),
                "guard expiry",
            );
            if !session.detached.any() {
                self.document
                    .remove_class(session.item, classes::SORTABLE_MOVING);
            }
            trace!(item = ?session.item, "adoption guard expired");
        }
    }

    /// Press: start a resize on a handle or arm a drag on a draggable.
    ///
    /// Returns whether a gesture began. Ignored while a gesture is active.
    pub fn pointer_down(&mut self, event: PointerEvent) -> bool {
        self.advance(event.time);
        if self.gesture.is_some() {
            trace!("pointer down ignored: gesture active");
            return false;
        }
        self.document.update_layout();
        let Some(hit) = self.document.hit_test(event.position) else {
            return false;
        };
        self.try_begin_resize(hit, &event) || self.try_press_draggable(hit, &event)
    }

    fn try_begin_resize(&mut self, hit: ElementId, event: &PointerEvent) -> bool {
        let resizables = &self.registry.resizables;
        let Some(element) = self.document.closest(hit, |id, _| resizables.contains(id)) else {
            return false;
        };
        let Some(resizable) = self.registry.resizables.get_mut(element) else {
            return false;
        };
        let Some(handle) = resizable.handle_at(&self.document, event.position, event.device)
        else {
            return false;
        };

        let args = ResizeEvent {
            element,
            pointer: *event,
            handle,
            rect: self.document.bounding_rect(element),
        };
        if run_hook(resizable.options().create.as_ref(), &args).is_veto() {
            debug!(?element, "resize vetoed by create hook");
            return false;
        }
        if let Err(err) = resizable.begin(&mut self.document, handle, event.position) {
            debug!(%err, ?element, "resize not started");
            return false;
        }
        self.gesture = Some(Gesture::Resize(ResizeSession {
            element,
            handle,
            device: event.device,
        }));
        debug!(?element, ?handle, "resize started");
        true
    }

    fn try_press_draggable(&mut self, hit: ElementId, event: &PointerEvent) -> bool {
        let draggables = &self.registry.draggables;
        let Some(item) = self.document.closest(hit, |id, _| draggables.contains(id)) else {
            return false;
        };
        let Some(draggable) = self.registry.draggables.get(item) else {
            return false;
        };
        if let Some(handle) = draggable.options().handle.as_deref() {
            let on_handle = self
                .document
                .closest(hit, |_, el| el.has_class(handle))
                .is_some_and(|h| self.document.contains(item, h));
            if !on_handle {
                trace!(?item, "press outside drag handle");
                return false;
            }
        }

        let container = self.document.parent(item).filter(|parent| {
            self.registry.sortables.contains(*parent)
                && self.document.has_class(item, classes::SORTABLE_ITEM)
        });
        let decision = match container.and_then(|c| self.registry.sortables.get(c)) {
            Some(sortable) => run_hook(
                sortable.options().create.as_ref(),
                &ItemEvent {
                    container: sortable.element(),
                    item,
                    pointer: *event,
                },
            ),
            None => run_hook(
                draggable.options().create.as_ref(),
                &DragEvent {
                    element: item,
                    pointer: *event,
                    offset: style_offset(&self.document, item),
                },
            ),
        };
        if decision.is_veto() {
            debug!(?item, "drag vetoed by create hook");
            return false;
        }

        let sort = container.and_then(|c| {
            let sortable = self.registry.sortables.get(c)?;
            Some(SortBinding {
                origin_container: c,
                current_container: c,
                detached_from: None,
                placeholder_mode: sortable.options().placeholder,
                origin_order: self.document.children(c).to_vec(),
            })
        });
        if let Some(draggable) = self.registry.draggables.get_mut(item) {
            draggable.press(&self.document, event.position);
        }
        self.gesture = Some(Gesture::Drag(DragSession::new(item, *event, sort)));
        debug!(?item, ?container, "drag armed");
        true
    }

    /// Move: advance the active gesture.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        profile_function!();
        self.advance(event.time);
        match self.gesture.take() {
            Some(Gesture::Drag(mut session)) => {
                if self.drag_move(&mut session, &event) {
                    self.gesture = Some(Gesture::Drag(session));
                }
            }
            Some(Gesture::Resize(session)) => {
                self.resize_move(&session, &event);
                self.gesture = Some(Gesture::Resize(session));
            }
            None => {}
        }
    }

    /// Returns whether the gesture continues.
    fn drag_move(&mut self, session: &mut DragSession, event: &PointerEvent) -> bool {
        let item = session.item;
        if !session.started {
            let exceeds = self
                .registry
                .draggables
                .get(item)
                .is_some_and(|d| d.exceeds_resist(event.position));
            if !exceeds {
                return true;
            }
            if !self.start_drag(session, event) {
                if let Some(draggable) = self.registry.draggables.get_mut(item) {
                    draggable.release();
                }
                return false;
            }
        }

        self.document.update_layout();
        let Some(draggable) = self.registry.draggables.get(item) else {
            debug!(?item, "drag ended: draggable removed");
            return false;
        };
        if session.sort.is_none() && draggable.options().detachable {
            let escaped = draggable.escaped_axes(&self.document, event.position);
            session.detached = session.detached.union(escaped);
        }
        let offset = draggable.target_offset(&self.document, event.position, session.detached);
        let decision = if session.sort.is_some() {
            Decision::Proceed
        } else {
            run_hook(
                draggable.options().drag.as_ref(),
                &DragEvent {
                    element: item,
                    pointer: *event,
                    offset,
                },
            )
        };
        if decision.is_proceed() {
            log_dom(draggable.apply(&mut self.document, offset), "drag move");
        }

        self.document.update_layout();
        let events = self
            .bus
            .tick(&self.document, &self.registry.droppables, item, event);
        for drop in &events {
            self.route(session, drop);
        }
        session.last_pointer = *event;
        true
    }

    /// Promote a pending press to a drag. Returns `false` on veto.
    fn start_drag(&mut self, session: &mut DragSession, event: &PointerEvent) -> bool {
        let item = session.item;
        self.document.update_layout();

        if let Some(binding) = session.sort.as_ref() {
            let container = binding.current_container;
            let Some(sortable) = self.registry.sortables.get_mut(container) else {
                return false;
            };
            let args = ItemEvent {
                container,
                item,
                pointer: *event,
            };
            if run_hook(sortable.options().start.as_ref(), &args).is_veto() {
                debug!(?item, "drag vetoed by start hook");
                return false;
            }
            match sortable.select(&mut self.document, item) {
                Ok(pinned) => session.pinned = pinned,
                Err(err) => {
                    debug!(%err, ?item, "selection failed");
                    log_dom(sortable.abandon(&mut self.document), "selection rollback");
                    return false;
                }
            }
            self.document.update_layout();
        } else {
            let Some(draggable) = self.registry.draggables.get(item) else {
                return false;
            };
            let args = DragEvent {
                element: item,
                pointer: *event,
                offset: style_offset(&self.document, item),
            };
            if run_hook(draggable.options().start.as_ref(), &args).is_veto() {
                debug!(?item, "drag vetoed by start hook");
                return false;
            }
            session.pinned = self
                .document
                .style(item)
                .map(PinnedStyle::capture)
                .unwrap_or_default();
        }

        let Some(draggable) = self.registry.draggables.get_mut(item) else {
            return false;
        };
        if let Err(err) = draggable.begin(&mut self.document) {
            debug!(%err, ?item, "drag not started");
            return false;
        }
        session.started = true;
        debug!(?item, "drag started");
        true
    }

    /// Release: finish the active gesture.
    ///
    /// Returns the stop data of a drag that actually started.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Option<StopData> {
        self.advance(event.time);
        match self.gesture.take()? {
            Gesture::Drag(session) if session.started => self.finish_drag(session, event),
            Gesture::Drag(session) => {
                if let Some(draggable) = self.registry.draggables.get_mut(session.item) {
                    draggable.release();
                }
                trace!(item = ?session.item, "released before drag started");
                None
            }
            Gesture::Resize(session) => {
                self.finish_resize(&session, &event);
                None
            }
        }
    }

    /// Abort the active gesture, restoring the pre-gesture DOM.
    ///
    /// No `stop` hook fires.
    pub fn cancel(&mut self) {
        match self.gesture.take() {
            Some(Gesture::Drag(session)) => self.abort_drag(session),
            Some(Gesture::Resize(session)) => {
                if let Some(resizable) = self.registry.resizables.get_mut(session.element) {
                    log_dom(resizable.revert(&mut self.document), "resize cancel");
                }
                debug!(element = ?session.element, "resize cancelled");
            }
            None => {}
        }
        self.bus.reset();
    }

    // ---------------------------------------------------------------------
    // Drop event routing
    // ---------------------------------------------------------------------

    fn route(&mut self, session: &mut DragSession, drop: &DropEvent) {
        trace!(kind = ?drop.kind, target = ?drop.target, "drop event");
        let decision = self
            .registry
            .droppables
            .get(drop.target)
            .map_or(Decision::Proceed, |d| d.dispatch(drop));
        if decision.is_veto() {
            debug!(kind = ?drop.kind, target = ?drop.target, "drop event vetoed");
            return;
        }
        if session.sort.is_none() {
            return;
        }

        let is_container = self.registry.sortables.contains(drop.target);
        if drop.kind == DndEvent::POINTER_IN && is_container {
            self.container_pointer_in(session, drop);
        } else if drop.kind == DndEvent::POINTER_OUT && is_container {
            self.container_pointer_out(session, drop);
        } else if drop.kind == DndEvent::TARGET_CENTER_IN {
            self.item_center_in(session, drop);
        } else if drop.kind == DndEvent::TARGET_CENTER_OUT {
            self.item_center_out(session, drop);
        }
    }

    /// The dragged item's center entered a sibling.
    fn item_center_in(&mut self, session: &DragSession, drop: &DropEvent) {
        let Some(binding) = session.sort.as_ref() else {
            return;
        };
        let container = binding.current_container;
        if self.document.parent(drop.target) != Some(container) {
            return;
        }
        if session.is_guarded(self.now)
            || self.document.has_class(drop.source, classes::SORTABLE_MOVING)
        {
            debug!(target = ?drop.target, "sort suppressed: item in flight");
            return;
        }
        let Some(sortable) = self.registry.sortables.get_mut(container) else {
            return;
        };
        let args = ContainerEvent {
            container,
            drop: *drop,
        };
        if run_hook(sortable.options().sort.as_ref(), &args).is_veto() {
            debug!(target = ?drop.target, "sort vetoed");
            return;
        }
        log_dom(sortable.reorder(&mut self.document, drop.target), "reorder");
    }

    /// The dragged item's center left a sibling.
    fn item_center_out(&mut self, session: &DragSession, drop: &DropEvent) {
        let Some(binding) = session.sort.as_ref() else {
            return;
        };
        let container = binding.current_container;
        if self.document.parent(drop.target) != Some(container) {
            return;
        }
        let Some(sortable) = self.registry.sortables.get_mut(container) else {
            return;
        };
        let args = ContainerEvent {
            container,
            drop: *drop,
        };
        if run_hook(sortable.options().sorted.as_ref(), &args).is_veto() {
            debug!(target = ?drop.target, "sorted vetoed");
            return;
        }
        sortable.unmark(&mut self.document, drop.target);
    }

    /// The pointer entered a detachable container.
    fn container_pointer_in(&mut self, session: &mut DragSession, drop: &DropEvent) {
        let container = drop.target;
        let Some(binding) = session.sort.as_ref() else {
            return;
        };
        let Some(sortable) = self.registry.sortables.get(container) else {
            return;
        };
        if sortable.options().placeholder != binding.placeholder_mode {
            debug!(?container, "adoption rejected: placeholder mode mismatch");
            return;
        }
        let args = ContainerEvent {
            container,
            drop: *drop,
        };
        if run_hook(sortable.options().enter.as_ref(), &args).is_veto() {
            debug!(?container, "adoption vetoed by enter hook");
            return;
        }
        if binding.detached_from.is_none() {
            return;
        }
        self.adopt(session, container, &drop.pointer);
    }

    /// The pointer left a detachable container.
    fn container_pointer_out(&mut self, session: &mut DragSession, drop: &DropEvent) {
        let container = drop.target;
        let item = session.item;
        let Some(sortable) = self.registry.sortables.get(container) else {
            return;
        };
        if sortable.selected() != Some(item) {
            return;
        }
        let args = ContainerEvent {
            container,
            drop: *drop,
        };
        if run_hook(sortable.options().exit.as_ref(), &args).is_veto() {
            debug!(?container, "detach vetoed by exit hook");
            return;
        }
        let Some(binding) = session.sort.as_mut() else {
            return;
        };
        self.document.add_class(item, classes::SORTABLE_MOVING);
        session.detached = DetachedAxes::BOTH;
        binding.detached_from = Some(container);
        debug!(?item, ?container, "item detached");
    }

    /// Hand the dragged item over to `container`.
    fn adopt(&mut self, session: &mut DragSession, container: ElementId, pointer: &PointerEvent) {
        let item = session.item;
        let Some(binding) = session.sort.as_mut() else {
            return;
        };
        let from = binding.current_container;

        self.document.update_layout();
        let from_origin = self.document.bounding_rect(from).position();
        let placeholder = match self.registry.sortables.get_mut(from) {
            Some(old) => old.release_hold(&mut self.document),
            None => None,
        };
        self.document.add_class(item, classes::SORTABLE_MOVING);
        log_dom(
            self.document
                .update_style(item, |s| s.visibility = Visibility::Hidden),
            "adoption",
        );

        let Some(sortable) = self.registry.sortables.get_mut(container) else {
            return;
        };
        sortable.accept_hold(item, placeholder);
        log_dom(
            sortable.place(&mut self.document, item, Some(pointer.position)),
            "adoption placement",
        );

        let Some(draggable) = self.registry.draggables.get_mut(item) else {
            return;
        };
        if let Some(placeholder) = placeholder {
            log_dom(
                self.document.insert_before(placeholder, item),
                "placeholder hand-off",
            );
            self.document.update_layout();
            let delta = self.document.bounding_rect(container).position() - from_origin;
            draggable.shift_origin(delta);
        } else {
            log_dom(
                self.document.update_style(item, |s| s.clear_offsets()),
                "adoption",
            );
            self.document.update_layout();
            let rect = self.document.bounding_rect(item);
            draggable.shift_origin(rect.position() - draggable.origin_rect().position());
            draggable.set_origin_rect(rect);
        }
        draggable.set_containment(Containment::Parent);

        // Keep the element where it was on screen in the new frame.
        let offset = draggable.start_offset() + (pointer.position - draggable.mouse_origin());
        log_dom(draggable.apply(&mut self.document, offset), "adoption");
        self.document.update_layout();

        binding.current_container = container;
        binding.detached_from = None;
        session.detached = DetachedAxes::default();
        session.guard_until = Some(self.now + ADOPTION_GUARD);
        debug!(?item, ?from, to = ?container, "item adopted");
    }

    // ---------------------------------------------------------------------
    // Gesture end
    // ---------------------------------------------------------------------

    fn finish_drag(&mut self, session: DragSession, pointer: PointerEvent) -> Option<StopData> {
        let item = session.item;
        self.document.update_layout();
        let bounding_rect = self.document.bounding_rect(item);
        let last_target = self.bus.center_target().or(self.bus.pointer_target());
        self.bus.reset();
        self.clear_flight(item);
        if let Some(draggable) = self.registry.draggables.get_mut(item) {
            draggable.release();
        }
        let released_outside = session.detached.any();

        let data = match &session.sort {
            Some(binding) => {
                let container = binding.current_container;
                let settled = match self.registry.sortables.get_mut(container) {
                    Some(sortable) => sortable.settle(&mut self.document),
                    None => Ok(None),
                };
                let settled = match settled {
                    Ok(Some(settled)) => settled,
                    Ok(None) => {
                        debug!(?item, "stop ignored: nothing selected");
                        return None;
                    }
                    Err(err) => {
                        debug!(%err, ?item, "stop failed to settle");
                        return None;
                    }
                };
                log_dom(
                    self.document
                        .update_style(item, |s| session.pinned.restore(s)),
                    "settle",
                );
                self.document.update_layout();

                let mut data = StopData {
                    source: settled.source,
                    target: settled.target,
                    index: self.document.index(item),
                    bounding_rect,
                    detached: container != binding.origin_container || released_outside,
                    released_outside,
                    origin_container: Some(binding.origin_container),
                    target_container: Some(container),
                    pointer: Some(pointer),
                    vetoed: false,
                };
                let stop = self
                    .registry
                    .sortables
                    .get(binding.origin_container)
                    .and_then(|s| s.options().stop.clone());
                data.vetoed = run_hook(stop.as_ref(), &data).is_veto();
                data
            }
            None => {
                let args = DragEvent {
                    element: item,
                    pointer,
                    offset: style_offset(&self.document, item),
                };
                let vetoed = self
                    .registry
                    .draggables
                    .get(item)
                    .is_some_and(|d| run_hook(d.options().stop.as_ref(), &args).is_veto());
                StopData {
                    source: item,
                    target: last_target,
                    index: self.document.index(item),
                    bounding_rect,
                    detached: released_outside,
                    released_outside,
                    origin_container: None,
                    target_container: None,
                    pointer: Some(pointer),
                    vetoed,
                }
            }
        };
        debug!(
            ?item,
            detached = data.detached,
            vetoed = data.vetoed,
            "drag stopped"
        );
        Some(data)
    }

    fn abort_drag(&mut self, session: DragSession) {
        let item = session.item;
        self.clear_flight(item);
        if let Some(draggable) = self.registry.draggables.get_mut(item) {
            draggable.release();
        }
        if !session.started {
            return;
        }

        if let Some(binding) = &session.sort {
            if let Some(sortable) = self.registry.sortables.get_mut(binding.current_container) {
                log_dom(sortable.abandon(&mut self.document), "cancel");
            }
            let origin = binding.origin_container;
            for child in &binding.origin_order {
                let belongs = *child == item || self.document.parent(*child) == Some(origin);
                if belongs {
                    log_dom(self.document.append_child(origin, *child), "cancel");
                }
            }
        }
        log_dom(
            self.document
                .update_style(item, |s| session.pinned.restore(s)),
            "cancel",
        );
        self.document.update_layout();
        debug!(?item, "drag cancelled");
    }

    /// Undo the in-flight markers of an adoption.
    fn clear_flight(&mut self, item: ElementId) {
        self.document.remove_class(item, classes::SORTABLE_MOVING);
        log_dom(
            self.document
                .update_style(item, |s| s.visibility = Visibility::Visible),
            "clear flight",
        );
    }

    fn resize_move(&mut self, session: &ResizeSession, event: &PointerEvent) {
        let Some(resizable) = self.registry.resizables.get(session.element) else {
            return;
        };
        let Some(step) = resizable.propose(event.position) else {
            return;
        };
        let args = ResizeEvent {
            element: session.element,
            pointer: *event,
            handle: session.handle,
            rect: resizable.step_rect(&step).unwrap_or_default(),
        };
        if run_hook(resizable.options().resize.as_ref(), &args).is_veto() {
            trace!(element = ?session.element, "resize step vetoed");
            return;
        }
        log_dom(resizable.apply(&mut self.document, &step), "resize");
    }

    fn finish_resize(&mut self, session: &ResizeSession, event: &PointerEvent) {
        self.document.update_layout();
        let Some(resizable) = self.registry.resizables.get_mut(session.element) else {
            return;
        };
        resizable.release();
        let args = ResizeEvent {
            element: session.element,
            pointer: *event,
            handle: session.handle,
            rect: self.document.bounding_rect(session.element),
        };
        run_hook(resizable.options().stop.as_ref(), &args);
        debug!(element = ?session.element, "resize stopped");
    }
}

fn style_offset(doc: &Document, element: ElementId) -> Vec2 {
    let (left, top) = doc.style(element).map(|s| s.offset()).unwrap_or((0.0, 0.0));
    Vec2::new(left, top)
}

/// Gesture-time DOM failures are skipped, not propagated.
fn log_dom(result: DomResult<()>, step: &'static str) {
    if let Err(err) = result {
        debug!(%err, step, "dom operation skipped");
    }
}
