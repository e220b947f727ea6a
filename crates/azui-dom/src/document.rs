//! Element arena with Taffy layout integration.

use crate::dirty::DirtyFlags;
use crate::element::{Element, ElementId};
use crate::error::{DomError, DomResult};
use crate::style::{Display, InlineStyle, Visibility};
use azui_core::geometry::{Rect, Size};
use azui_core::math::Vec2;
use azui_core::profiling::profile_function;
use indexmap::IndexMap;
use std::fmt;
use taffy::TaffyTree;

/// Headless document.
///
/// Owns every element and keeps a Taffy tree mirroring the element hierarchy.
/// Page-space rects are cached on the elements and refreshed by
/// [`update_layout`](Self::update_layout).
pub struct Document {
    taffy: TaffyTree<()>,
    elements: IndexMap<ElementId, Element>,
    root: ElementId,
    next_id: usize,
    viewport: Size<f32>,
    dirty: DirtyFlags,
    /// Set by layout-affecting changes, cleared by a layout pass.
    layout_pending: bool,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("elements", &self.elements.len())
            .field("viewport", &self.viewport)
            .field("dirty", &self.dirty)
            .field("layout_pending", &self.layout_pending)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a document whose root element is sized to the viewport.
    pub fn new(viewport: Size<f32>) -> Self {
        let mut doc = Self {
            taffy: TaffyTree::new(),
            elements: IndexMap::new(),
            root: ElementId(0),
            next_id: 0,
            viewport,
            dirty: DirtyFlags::NONE,
            layout_pending: true,
        };
        let root = doc.create_element("body");
        doc.root = root;
        if let Some(element) = doc.elements.get_mut(&root) {
            element.style.width = Some(viewport.width);
            element.style.height = Some(viewport.height);
        }
        doc.sync_style(root);
        doc
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn viewport(&self) -> Size<f32> {
        self.viewport
    }

    /// Resize the viewport (and the root element).
    pub fn set_viewport(&mut self, viewport: Size<f32>) {
        self.viewport = viewport;
        let root = self.root;
        if let Some(element) = self.elements.get_mut(&root) {
            element.style.width = Some(viewport.width);
            element.style.height = Some(viewport.height);
        }
        self.sync_style(root);
        self.mark(DirtyFlags::LAYOUT);
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let style = InlineStyle::default();
        let taffy_node = self
            .taffy
            .new_leaf(style.to_taffy())
            .expect("Failed to create taffy node");

        self.elements.insert(id, Element::new(tag, taffy_node));
        id
    }

    pub fn exists(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ---------------------------------------------------------------------
    // Attributes, classes, styles
    // ---------------------------------------------------------------------

    pub fn set_id_attr(&mut self, id: ElementId, value: impl Into<String>) -> DomResult<()> {
        let element = self.get_mut(id)?;
        element.id_attr = Some(value.into());
        Ok(())
    }

    /// Find an element by its `id` attribute.
    pub fn get_element_by_id(&self, value: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, e)| e.id_attr.as_deref() == Some(value))
            .map(|(id, _)| *id)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        let changed = self
            .elements
            .get_mut(&id)
            .is_some_and(|e| e.classes.add(class));
        if changed {
            self.mark(DirtyFlags::CLASSES);
        }
        changed
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) -> bool {
        let changed = self
            .elements
            .get_mut(&id)
            .is_some_and(|e| e.classes.remove(class));
        if changed {
            self.mark(DirtyFlags::CLASSES);
        }
        changed
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements.get(&id).is_some_and(|e| e.has_class(class))
    }

    pub fn style(&self, id: ElementId) -> Option<&InlineStyle> {
        self.elements.get(&id).map(|e| &e.style)
    }

    /// Mutate an element's inline style and mark the document dirty.
    pub fn update_style(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut InlineStyle),
    ) -> DomResult<()> {
        let element = self.get_mut(id)?;
        let before = element.style.clone();
        f(&mut element.style);
        if element.style == before {
            return Ok(());
        }

        let mut flags = DirtyFlags::STYLE;
        if element.style.visibility != before.visibility {
            flags |= DirtyFlags::VISIBILITY;
        }
        let paint_only = InlineStyle {
            visibility: before.visibility,
            z_index: before.z_index,
            ..element.style.clone()
        } == before;
        if !paint_only {
            flags |= DirtyFlags::LAYOUT;
        }

        self.sync_style(id);
        self.mark(flags);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Tree queries
    // ---------------------------------------------------------------------

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(&id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Position of an element among its parent's children.
    pub fn index(&self, id: ElementId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| *c == id)
    }

    /// All other children of this element's parent, in document order.
    pub fn siblings(&self, id: ElementId) -> Vec<ElementId> {
        match self.parent(id) {
            Some(parent) => self
                .children(parent)
                .iter()
                .copied()
                .filter(|c| *c != id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether `id` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Whether the element is attached to the document root.
    pub fn is_connected(&self, id: ElementId) -> bool {
        self.exists(id) && self.contains(self.root, id)
    }

    /// Nearest inclusive ancestor matching the predicate.
    pub fn closest(
        &self,
        id: ElementId,
        predicate: impl Fn(ElementId, &Element) -> bool,
    ) -> Option<ElementId> {
        let mut current = Some(id);
        while let Some(node) = current {
            let element = self.elements.get(&node)?;
            if predicate(node, element) {
                return Some(node);
            }
            current = element.parent;
        }
        None
    }

    /// Pre-order walk of the connected tree, starting at the root.
    pub fn tree_order(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.elements.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> DomResult<()> {
        let len = self.get(parent)?.children.len();
        self.attach(parent, len, child)
    }

    /// Insert `new` immediately before `reference` under the reference's parent.
    pub fn insert_before(&mut self, new: ElementId, reference: ElementId) -> DomResult<()> {
        self.insert_relative(new, reference, 0)
    }

    /// Insert `new` immediately after `reference` under the reference's parent.
    pub fn insert_after(&mut self, new: ElementId, reference: ElementId) -> DomResult<()> {
        self.insert_relative(new, reference, 1)
    }

    fn insert_relative(&mut self, new: ElementId, reference: ElementId, shift: usize) -> DomResult<()> {
        self.get(new)?;
        let parent = self.get(reference)?.parent.ok_or(DomError::NoParent(reference))?;
        if new == reference {
            return Ok(());
        }
        self.check_hierarchy(parent, new)?;
        self.detach(new);

        let index = self
            .children(parent)
            .iter()
            .position(|c| *c == reference)
            .ok_or(DomError::NoParent(reference))?;
        self.attach(parent, index + shift, new)
    }

    /// Exchange the document positions of two elements.
    pub fn swap(&mut self, a: ElementId, b: ElementId) -> DomResult<()> {
        if a == b {
            return Ok(());
        }
        let parent_a = self.get(a)?.parent.ok_or(DomError::NoParent(a))?;
        let parent_b = self.get(b)?.parent.ok_or(DomError::NoParent(b))?;
        if self.contains(a, b) {
            return Err(DomError::HierarchyRequest { parent: a, child: b });
        }
        if self.contains(b, a) {
            return Err(DomError::HierarchyRequest { parent: b, child: a });
        }

        let index_a = self.index(a).ok_or(DomError::NoParent(a))?;
        let index_b = self.index(b).ok_or(DomError::NoParent(b))?;

        if parent_a == parent_b {
            self.get_mut(parent_a)?.children.swap(index_a, index_b);
        } else {
            self.get_mut(parent_a)?.children[index_a] = b;
            self.get_mut(parent_b)?.children[index_b] = a;
            self.get_mut(a)?.parent = Some(parent_b);
            self.get_mut(b)?.parent = Some(parent_a);
            self.sync_children(parent_b);
        }
        self.sync_children(parent_a);
        self.mark(DirtyFlags::CHILDREN_ORDER);
        Ok(())
    }

    /// Detach an element from its parent, keeping it (and its subtree) alive.
    pub fn remove(&mut self, id: ElementId) -> DomResult<()> {
        if id == self.root {
            return Err(DomError::RootImmutable);
        }
        self.get(id)?;
        self.detach(id);
        Ok(())
    }

    /// Remove an element and its whole subtree from the document.
    ///
    /// Returns the destroyed ids so callers can drop state keyed by them.
    pub fn destroy(&mut self, id: ElementId) -> DomResult<Vec<ElementId>> {
        self.remove(id)?;

        let mut destroyed = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            if let Some(element) = self.elements.shift_remove(&node) {
                self.taffy.remove(element.taffy_node).ok();
                stack.extend(element.children);
                destroyed.push(node);
            }
        }
        Ok(destroyed)
    }

    /// Copy tag, classes and inline style into a new detached element.
    ///
    /// The `id` attribute and children are not copied.
    pub fn clone_shallow(&mut self, id: ElementId) -> DomResult<ElementId> {
        let (tag, classes, style) = {
            let source = self.get(id)?;
            (source.tag.clone(), source.classes.clone(), source.style.clone())
        };
        let clone = self.create_element(&tag);
        if let Some(element) = self.elements.get_mut(&clone) {
            element.classes = classes;
            element.style = style;
        }
        self.sync_style(clone);
        Ok(clone)
    }

    fn attach(&mut self, parent: ElementId, index: usize, child: ElementId) -> DomResult<()> {
        self.get(parent)?;
        self.get(child)?;
        self.check_hierarchy(parent, child)?;
        self.detach(child);

        let parent_element = self.get_mut(parent)?;
        let index = index.min(parent_element.children.len());
        parent_element.children.insert(index, child);
        self.get_mut(child)?.parent = Some(parent);

        self.sync_children(parent);
        self.mark(DirtyFlags::CHILDREN_ORDER);
        Ok(())
    }

    fn detach(&mut self, child: ElementId) {
        let Some(old_parent) = self.parent(child) else {
            return;
        };
        if let Some(parent) = self.elements.get_mut(&old_parent) {
            parent.children.retain(|c| *c != child);
        }
        if let Some(element) = self.elements.get_mut(&child) {
            element.parent = None;
        }
        self.sync_children(old_parent);
        self.mark(DirtyFlags::CHILDREN_ORDER);
    }

    fn check_hierarchy(&self, parent: ElementId, child: ElementId) -> DomResult<()> {
        if child == self.root {
            return Err(DomError::RootImmutable);
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn get(&self, id: ElementId) -> DomResult<&Element> {
        self.elements.get(&id).ok_or(DomError::NotFound(id))
    }

    fn get_mut(&mut self, id: ElementId) -> DomResult<&mut Element> {
        self.elements.get_mut(&id).ok_or(DomError::NotFound(id))
    }

    fn sync_style(&mut self, id: ElementId) {
        if let Some(element) = self.elements.get(&id) {
            self.taffy
                .set_style(element.taffy_node, element.style.to_taffy())
                .ok();
        }
    }

    fn sync_children(&mut self, id: ElementId) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        let taffy_children: Vec<taffy::NodeId> = element
            .children
            .iter()
            .filter_map(|c| self.elements.get(c).map(|e| e.taffy_node))
            .collect();
        self.taffy
            .set_children(element.taffy_node, &taffy_children)
            .ok();
    }

    fn mark(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
        if flags.needs_layout() {
            self.layout_pending = true;
        }
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    /// Whether rects are stale.
    pub fn needs_layout(&self) -> bool {
        self.layout_pending
    }

    /// Take and reset the accumulated dirty flags.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::replace(&mut self.dirty, DirtyFlags::NONE)
    }

    /// Recompute layout if anything layout-affecting changed.
    pub fn update_layout(&mut self) {
        profile_function!();

        if !self.layout_pending {
            return;
        }
        self.layout_pending = false;

        let Some(root_node) = self.elements.get(&self.root).map(|e| e.taffy_node) else {
            return;
        };
        let available_space = taffy::Size {
            width: taffy::AvailableSpace::Definite(self.viewport.width),
            height: taffy::AvailableSpace::Definite(self.viewport.height),
        };
        if let Err(e) = self.taffy.compute_layout(root_node, available_space) {
            tracing::error!("Layout computation failed: {:?}", e);
            return;
        }

        // Taffy locations are parent-relative; accumulate into page space.
        let mut stack = vec![(self.root, Vec2::ZERO)];
        while let Some((id, parent_origin)) = stack.pop() {
            let Some(element) = self.elements.get_mut(&id) else {
                continue;
            };
            if let Ok(layout) = self.taffy.layout(element.taffy_node) {
                element.layout = Rect::new(
                    parent_origin.x + layout.location.x,
                    parent_origin.y + layout.location.y,
                    layout.size.width,
                    layout.size.height,
                );
            }
            let origin = element.layout.position();
            stack.extend(element.children.iter().map(|c| (*c, origin)));
        }
    }

    /// Page-space rect from the last layout pass (zero for unknown elements).
    pub fn bounding_rect(&self, id: ElementId) -> Rect {
        self.elements.get(&id).map(|e| e.layout).unwrap_or(Rect::ZERO)
    }

    /// Position of an element relative to its parent's top-left corner.
    pub fn offset_in_parent(&self, id: ElementId) -> Vec2 {
        let rect = self.bounding_rect(id);
        match self.parent(id) {
            Some(parent) => rect.position() - self.bounding_rect(parent).position(),
            None => rect.position(),
        }
    }

    /// Topmost visible element under a page-space point.
    ///
    /// Children paint over their parent; among siblings higher `z_index`
    /// wins, then positioned elements, then later document order.
    pub fn hit_test(&self, point: Vec2) -> Option<ElementId> {
        self.hit_test_from(self.root, point)
    }

    fn hit_test_from(&self, id: ElementId, point: Vec2) -> Option<ElementId> {
        let element = self.elements.get(&id)?;
        if element.style.display == Display::None {
            return None;
        }

        let mut children: Vec<(usize, ElementId)> =
            element.children.iter().copied().enumerate().collect();
        children.sort_by_key(|(order, child)| {
            let style = self.style(*child);
            (
                style.and_then(|s| s.z_index).unwrap_or(0),
                style.is_some_and(|s| s.is_positioned()),
                *order,
            )
        });
        for (_, child) in children.into_iter().rev() {
            if let Some(hit) = self.hit_test_from(child, point) {
                return Some(hit);
            }
        }

        (element.style.visibility == Visibility::Visible && element.layout.contains(point))
            .then_some(id)
    }
}
