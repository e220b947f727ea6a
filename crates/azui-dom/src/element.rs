//! Elements and class lists.

use crate::style::InlineStyle;
use azui_core::geometry::Rect;
use indexmap::IndexSet;

/// Element identifier in a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Ordered set of class names, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: IndexSet<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. Returns `true` if it was not present.
    pub fn add(&mut self, class: &str) -> bool {
        if self.classes.contains(class) {
            return false;
        }
        self.classes.insert(class.to_string())
    }

    /// Remove a class. Returns `true` if it was present.
    pub fn remove(&mut self, class: &str) -> bool {
        self.classes.shift_remove(class)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle(&mut self, class: &str) -> bool {
        if !self.remove(class) {
            self.add(class);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A node in the document.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) id_attr: Option<String>,
    pub(crate) classes: ClassList,
    pub(crate) style: InlineStyle,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) taffy_node: taffy::NodeId,
    /// Page-space rect from the last layout pass.
    pub(crate) layout: Rect,
}

impl Element {
    pub(crate) fn new(tag: impl Into<String>, taffy_node: taffy::NodeId) -> Self {
        Self {
            tag: tag.into(),
            id_attr: None,
            classes: ClassList::new(),
            style: InlineStyle::default(),
            parent: None,
            children: Vec::new(),
            taffy_node,
            layout: Rect::ZERO,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute, if any.
    pub fn id_attr(&self) -> Option<&str> {
        self.id_attr.as_deref()
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn style(&self) -> &InlineStyle {
        &self.style
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn layout(&self) -> Rect {
        self.layout
    }
}
