//! Sortable containers.
//!
//! A sortable turns its `azSortableItem` children into draggables and
//! reorders them as the dragged item's center crosses its siblings. It runs
//! in one of two modes:
//!
//! - placeholder mode: the dragged item is pinned absolutely and a hidden
//!   clone holds its slot, swapping with siblings as the drag proceeds;
//! - marker mode: the item stays in flow and siblings get
//!   `azSortableDropBefore` / `azSortableDropAfter` classes; the move
//!   happens on release.
//!
//! This module owns the container-side DOM work. Gesture routing lives in
//! [`DndContext`](crate::context::DndContext).

use crate::bus::DropEvent;
use crate::classes;
use crate::decision::Hook;
use crate::pointer::PointerEvent;
use crate::registry::{Behavior, BehaviorKind};
use azui_core::geometry::Rect;
use azui_core::math::Vec2;
use azui_dom::{Document, DomResult, ElementId, InlineStyle, Positioning, Visibility};
use std::fmt;

/// Axis used to pick a side during nearest insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Side of an anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Before,
    After,
}

/// Sortable drag phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortPhase {
    #[default]
    Idle,
    /// An item is selected, nothing has been reordered yet.
    Selected,
    /// At least one reorder was applied.
    Reordering,
}

/// Arguments for `create` and `start` hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemEvent {
    pub container: ElementId,
    pub item: ElementId,
    pub pointer: PointerEvent,
}

/// Arguments for `enter`, `exit`, `sort` and `sorted` hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerEvent {
    /// Sortable whose hook runs.
    pub container: ElementId,
    pub drop: DropEvent,
}

/// Arguments for the `add` hook.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddEvent {
    pub container: ElementId,
    pub element: ElementId,
    pub cursor: Option<Vec2>,
}

/// Result of a finished drag, passed to `stop` hooks and returned to the
/// caller of `pointer_up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopData {
    /// The dragged element.
    pub source: ElementId,
    /// Item the drop position was last computed against.
    pub target: Option<ElementId>,
    /// Final index of the source among its parent's children.
    pub index: Option<usize>,
    /// Bounding rect of the source at release, before it settled.
    pub bounding_rect: Rect,
    /// The item ended up outside the container it started in: adopted by
    /// another container or released outside every container.
    pub detached: bool,
    /// Released while outside every container that accepted it.
    pub released_outside: bool,
    pub origin_container: Option<ElementId>,
    pub target_container: Option<ElementId>,
    pub pointer: Option<PointerEvent>,
    /// The `stop` hook vetoed.
    pub vetoed: bool,
}

/// Options for a [`Sortable`].
#[derive(Clone)]
pub struct SortableOptions {
    /// Use a placeholder clone instead of drop markers.
    pub placeholder: bool,
    /// Keep the placeholder visible.
    pub show_placeholder: bool,
    /// Let items leave this container and enter other detachable ones.
    pub detachable: bool,
    pub align: Axis,
    pub create: Option<Hook<ItemEvent>>,
    pub start: Option<Hook<ItemEvent>>,
    pub enter: Option<Hook<ContainerEvent>>,
    pub exit: Option<Hook<ContainerEvent>>,
    pub sort: Option<Hook<ContainerEvent>>,
    pub sorted: Option<Hook<ContainerEvent>>,
    pub stop: Option<Hook<StopData>>,
    pub add: Option<Hook<AddEvent>>,
}

impl Default for SortableOptions {
    fn default() -> Self {
        Self {
            placeholder: true,
            show_placeholder: false,
            detachable: false,
            align: Axis::X,
            create: None,
            start: None,
            enter: None,
            exit: None,
            sort: None,
            sorted: None,
            stop: None,
            add: None,
        }
    }
}

impl fmt::Debug for SortableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortableOptions")
            .field("placeholder", &self.placeholder)
            .field("show_placeholder", &self.show_placeholder)
            .field("detachable", &self.detachable)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}

impl SortableOptions {
    pub fn placeholder(mut self, enabled: bool) -> Self {
        self.placeholder = enabled;
        self
    }

    pub fn show_placeholder(mut self, visible: bool) -> Self {
        self.show_placeholder = visible;
        self
    }

    pub fn detachable(mut self, detachable: bool) -> Self {
        self.detachable = detachable;
        self
    }

    pub fn align(mut self, align: Axis) -> Self {
        self.align = align;
        self
    }

    pub fn on_create(mut self, hook: Hook<ItemEvent>) -> Self {
        self.create = Some(hook);
        self
    }

    pub fn on_start(mut self, hook: Hook<ItemEvent>) -> Self {
        self.start = Some(hook);
        self
    }

    pub fn on_enter(mut self, hook: Hook<ContainerEvent>) -> Self {
        self.enter = Some(hook);
        self
    }

    pub fn on_exit(mut self, hook: Hook<ContainerEvent>) -> Self {
        self.exit = Some(hook);
        self
    }

    pub fn on_sort(mut self, hook: Hook<ContainerEvent>) -> Self {
        self.sort = Some(hook);
        self
    }

    pub fn on_sorted(mut self, hook: Hook<ContainerEvent>) -> Self {
        self.sorted = Some(hook);
        self
    }

    pub fn on_stop(mut self, hook: Hook<StopData>) -> Self {
        self.stop = Some(hook);
        self
    }

    pub fn on_add(mut self, hook: Hook<AddEvent>) -> Self {
        self.add = Some(hook);
        self
    }
}

/// Inline style fields the sortable overrides on the dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PinnedStyle {
    position: Positioning,
    left: Option<f32>,
    top: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
}

impl PinnedStyle {
    pub fn capture(style: &InlineStyle) -> Self {
        Self {
            position: style.position,
            left: style.left,
            top: style.top,
            width: style.width,
            height: style.height,
        }
    }

    pub fn restore(&self, style: &mut InlineStyle) {
        style.position = self.position;
        style.left = self.left;
        style.top = self.top;
        style.width = self.width;
        style.height = self.height;
    }
}

/// Sibling marked as the drop anchor in marker mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub target: ElementId,
    pub side: DropSide,
}

/// Outcome of settling a drag in a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settled {
    pub source: ElementId,
    pub target: Option<ElementId>,
}

/// A container whose items can be reordered by dragging.
#[derive(Debug)]
pub struct Sortable {
    element: ElementId,
    options: SortableOptions,
    /// Last z-index handed to a selected item.
    z: i32,
    phase: SortPhase,
    selected: Option<ElementId>,
    placeholder: Option<ElementId>,
    marker: Option<Marker>,
    last_target: Option<ElementId>,
}

impl Behavior for Sortable {
    const KIND: BehaviorKind = BehaviorKind::Sortable;
    type Options = SortableOptions;

    fn create(element: ElementId, options: SortableOptions) -> Self {
        Self {
            element,
            options,
            z: 0,
            phase: SortPhase::Idle,
            selected: None,
            placeholder: None,
            marker: None,
            last_target: None,
        }
    }

    fn element(&self) -> ElementId {
        self.element
    }

    fn options(&self) -> &SortableOptions {
        &self.options
    }
}

impl Sortable {
    pub fn phase(&self) -> SortPhase {
        self.phase
    }

    /// Item currently being dragged within this container.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    pub fn placeholder(&self) -> Option<ElementId> {
        self.placeholder
    }

    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    /// Sortable items of this container, in document order.
    pub fn items(&self, doc: &Document) -> Vec<ElementId> {
        sortable_items(doc, self.element)
    }

    /// Select `item` and prepare it for dragging. Layout must be up to date.
    ///
    /// Returns the item's inline style fields from before the drag.
    pub(crate) fn select(&mut self, doc: &mut Document, item: ElementId) -> DomResult<PinnedStyle> {
        let pinned = doc.style(item).map(PinnedStyle::capture).unwrap_or_default();
        let rect = doc.bounding_rect(item);
        let offset = doc.offset_in_parent(item);

        self.z += 1;
        let z = self.z;
        doc.update_style(item, |s| s.z_index = Some(z))?;
        doc.add_class(item, classes::SORTABLE_SELECTED);
        self.selected = Some(item);
        self.phase = SortPhase::Selected;
        self.last_target = None;

        if self.options.placeholder {
            let placeholder = doc.clone_shallow(item)?;
            doc.remove_class(placeholder, classes::SORTABLE_SELECTED);
            doc.add_class(placeholder, classes::PLACEHOLDER);
            let hidden = !self.options.show_placeholder;
            doc.update_style(placeholder, |s| {
                s.set_size(rect.width, rect.height);
                s.z_index = None;
                if hidden {
                    s.visibility = Visibility::Hidden;
                }
            })?;

            doc.update_style(item, |s| {
                s.position = Positioning::Absolute;
                s.left = Some(offset.x);
                s.top = Some(offset.y);
                s.set_size(rect.width, rect.height);
            })?;
            doc.insert_before(placeholder, item)?;
            self.placeholder = Some(placeholder);
        } else {
            doc.add_class(item, classes::DENY);
        }
        Ok(pinned)
    }

    /// Move the drop position to `target`, a sibling of the selection.
    pub(crate) fn reorder(&mut self, doc: &mut Document, target: ElementId) -> DomResult<()> {
        let Some(selected) = self.selected else {
            return Ok(());
        };
        if let Some(placeholder) = self.placeholder {
            doc.swap(placeholder, target)?;
        } else {
            self.clear_markers(doc, target);
            let side = match (doc.index(selected), doc.index(target)) {
                (Some(from), Some(to)) if from < to => DropSide::After,
                _ => DropSide::Before,
            };
            doc.add_class(
                target,
                match side {
                    DropSide::Before => classes::DROP_BEFORE,
                    DropSide::After => classes::DROP_AFTER,
                },
            );
            doc.remove_class(selected, classes::DENY);
            doc.add_class(selected, classes::ALLOW);
            self.marker = Some(Marker { target, side });
        }
        self.last_target = Some(target);
        self.phase = SortPhase::Reordering;
        Ok(())
    }

    /// Undo the marker state when the center leaves `target`.
    pub(crate) fn unmark(&mut self, doc: &mut Document, target: ElementId) {
        if self.placeholder.is_some() {
            return;
        }
        let Some(selected) = self.selected else {
            return;
        };
        self.clear_markers(doc, target);
        doc.remove_class(selected, classes::ALLOW);
        doc.add_class(selected, classes::DENY);
        self.marker = None;
    }

    /// Remove drop markers from `anchor` and all its siblings.
    fn clear_markers(&self, doc: &mut Document, anchor: ElementId) {
        let mut marked = doc.siblings(anchor);
        marked.push(anchor);
        for el in marked {
            doc.remove_class(el, classes::DROP_BEFORE);
            doc.remove_class(el, classes::DROP_AFTER);
        }
    }

    /// Insert `element` at the nearest position to `cursor`, or append it.
    pub(crate) fn place(
        &self,
        doc: &mut Document,
        element: ElementId,
        cursor: Option<Vec2>,
    ) -> DomResult<()> {
        let items: Vec<ElementId> = self
            .items(doc)
            .into_iter()
            .filter(|id| *id != element)
            .collect();
        match cursor.and_then(|c| nearest_insertion(doc, &items, c, self.options.align)) {
            Some((anchor, DropSide::After)) => doc.insert_after(element, anchor),
            Some((anchor, DropSide::Before)) => doc.insert_before(element, anchor),
            None => doc.append_child(self.element, element),
        }
    }

    /// Hand the in-flight state to another container.
    ///
    /// Returns the placeholder so the receiving container can own it.
    pub(crate) fn release_hold(&mut self, doc: &mut Document) -> Option<ElementId> {
        if let Some(marker) = self.marker.take() {
            self.clear_markers(doc, marker.target);
        }
        if let Some(selected) = self.selected.take() {
            doc.remove_class(selected, classes::ALLOW);
            if self.placeholder.is_none() {
                doc.add_class(selected, classes::DENY);
            }
        }
        self.phase = SortPhase::Idle;
        self.last_target = None;
        self.placeholder.take()
    }

    /// Take ownership of an item handed over by another container.
    pub(crate) fn accept_hold(&mut self, item: ElementId, placeholder: Option<ElementId>) {
        self.selected = Some(item);
        self.placeholder = placeholder;
        self.marker = None;
        self.last_target = None;
        self.phase = SortPhase::Selected;
    }

    /// Land the selected item at the drop position.
    ///
    /// Returns `None` when nothing is selected.
    pub(crate) fn settle(&mut self, doc: &mut Document) -> DomResult<Option<Settled>> {
        let Some(selected) = self.selected.take() else {
            return Ok(None);
        };
        for class in [classes::SORTABLE_SELECTED, classes::ALLOW, classes::DENY] {
            doc.remove_class(selected, class);
        }

        if let Some(placeholder) = self.placeholder.take() {
            doc.insert_before(selected, placeholder)?;
            doc.destroy(placeholder)?;
        } else if let Some(marker) = self.marker.take() {
            self.clear_markers(doc, marker.target);
            let after = matches!(
                (doc.index(selected), doc.index(marker.target)),
                (Some(from), Some(to)) if from < to
            );
            if after {
                doc.insert_after(selected, marker.target)?;
            } else {
                doc.insert_before(selected, marker.target)?;
            }
        }

        self.phase = SortPhase::Idle;
        Ok(Some(Settled {
            source: selected,
            target: self.last_target.take(),
        }))
    }

    /// Drop all in-flight state without moving the selection.
    pub(crate) fn abandon(&mut self, doc: &mut Document) -> DomResult<()> {
        if let Some(marker) = self.marker.take() {
            self.clear_markers(doc, marker.target);
        }
        if let Some(selected) = self.selected.take() {
            for class in [classes::SORTABLE_SELECTED, classes::ALLOW, classes::DENY] {
                doc.remove_class(selected, class);
            }
        }
        if let Some(placeholder) = self.placeholder.take() {
            doc.destroy(placeholder)?;
        }
        self.phase = SortPhase::Idle;
        self.last_target = None;
        Ok(())
    }
}

/// Sortable items among a container's children, placeholders excluded.
pub fn sortable_items(doc: &Document, container: ElementId) -> Vec<ElementId> {
    doc.children(container)
        .iter()
        .copied()
        .filter(|id| {
            doc.has_class(*id, classes::SORTABLE_ITEM) && !doc.has_class(*id, classes::PLACEHOLDER)
        })
        .collect()
}

/// Find the item whose center is nearest to `cursor` and the side of it the
/// cursor lies on along `align`.
///
/// Ties in distance go to the earlier item; a cursor exactly on the
/// anchor's center counts as after it.
pub fn nearest_insertion(
    doc: &Document,
    items: &[ElementId],
    cursor: Vec2,
    align: Axis,
) -> Option<(ElementId, DropSide)> {
    let mut best: Option<(ElementId, f32, Vec2)> = None;
    for item in items {
        let delta = cursor - doc.bounding_rect(*item).center();
        let distance = delta.length_squared();
        if best.is_none_or(|(_, nearest, _)| distance < nearest) {
            best = Some((*item, distance, delta));
        }
    }

    best.map(|(anchor, _, delta)| {
        let along = match align {
            Axis::X => delta.x,
            Axis::Y => delta.y,
        };
        let side = if along >= 0.0 {
            DropSide::After
        } else {
            DropSide::Before
        };
        (anchor, side)
    })
}
