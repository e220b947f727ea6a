//! Sortable list fixtures.

use azui_core::geometry::Size;
use azui_core::math::Vec2;
use azui_dnd::{Axis, DndContext, SortableOptions, classes};
use azui_dom::{Document, ElementId, Flow, Positioning};

/// Default item edge length.
pub const ITEM_SIZE: f32 = 100.0;

struct ListDef {
    origin: Vec2,
    size: Vec2,
    items: usize,
    options: SortableOptions,
}

/// Builder for [`SortableFixture`].
pub struct FixtureBuilder {
    viewport: Size<f32>,
    item_size: Vec2,
    lists: Vec<ListDef>,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            viewport: Size::new(1024.0, 768.0),
            item_size: Vec2::splat(ITEM_SIZE),
            lists: Vec::new(),
        }
    }
}

impl FixtureBuilder {
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    pub fn item_size(mut self, width: f32, height: f32) -> Self {
        self.item_size = Vec2::new(width, height);
        self
    }

    /// Add an absolutely positioned sortable container.
    ///
    /// Items flow along a row for [`Axis::X`] and a column for [`Axis::Y`].
    pub fn list(mut self, origin: Vec2, size: Vec2, items: usize, options: SortableOptions) -> Self {
        self.lists.push(ListDef {
            origin,
            size,
            items,
            options,
        });
        self
    }

    pub fn build(self) -> SortableFixture {
        let mut doc = Document::new(self.viewport);
        let mut containers = Vec::new();
        let mut items = Vec::new();
        let mut options = Vec::new();

        for def in self.lists {
            let container = doc.create_element("ul");
            let flow = match def.options.align {
                Axis::X => Flow::Row,
                Axis::Y => Flow::Column,
            };
            doc.update_style(container, |s| {
                s.position = Positioning::Absolute;
                s.left = Some(def.origin.x);
                s.top = Some(def.origin.y);
                s.set_size(def.size.x, def.size.y);
                s.flow = flow;
            })
            .expect("container exists");
            doc.append_child(doc.root(), container)
                .expect("attach container");

            let list_items = (0..def.items)
                .map(|_| {
                    let item = doc.create_element("li");
                    doc.add_class(item, classes::SORTABLE_ITEM);
                    doc.update_style(item, |s| s.set_size(self.item_size.x, self.item_size.y))
                        .expect("item exists");
                    doc.append_child(container, item).expect("attach item");
                    item
                })
                .collect();

            containers.push(container);
            items.push(list_items);
            options.push(def.options);
        }

        let mut ctx = DndContext::new(doc);
        for (container, options) in containers.iter().zip(options) {
            ctx.make_sortable(*container, Some(options));
        }
        ctx.document_mut().update_layout();

        SortableFixture {
            ctx,
            containers,
            items,
            item_size: self.item_size,
        }
    }
}

/// A document with one or more sortable lists.
pub struct SortableFixture {
    pub ctx: DndContext,
    pub containers: Vec<ElementId>,
    /// Items of each list, in initial order.
    pub items: Vec<Vec<ElementId>>,
    item_size: Vec2,
}

impl SortableFixture {
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::default()
    }

    /// One 600x100 horizontal list at the page origin.
    pub fn single(items: usize, options: SortableOptions) -> Self {
        Self::builder()
            .list(Vec2::ZERO, Vec2::new(600.0, ITEM_SIZE), items, options)
            .build()
    }

    pub fn container(&self, list: usize) -> ElementId {
        self.containers[list]
    }

    pub fn item(&self, list: usize, index: usize) -> ElementId {
        self.items[list][index]
    }

    /// Current children of a list's container.
    pub fn order(&self, list: usize) -> Vec<ElementId> {
        self.ctx.document().children(self.containers[list]).to_vec()
    }

    /// Page-space center of an element after a layout pass.
    pub fn center(&mut self, element: ElementId) -> Vec2 {
        self.ctx.document_mut().update_layout();
        self.ctx.document().bounding_rect(element).center()
    }

    /// All placeholder elements in the document.
    pub fn placeholders(&self) -> Vec<ElementId> {
        let doc = self.ctx.document();
        doc.tree_order()
            .into_iter()
            .filter(|id| doc.has_class(*id, classes::PLACEHOLDER))
            .collect()
    }

    /// Create a detached element sized like the fixture's items.
    pub fn new_element(&mut self) -> ElementId {
        let size = self.item_size;
        let doc = self.ctx.document_mut();
        let element = doc.create_element("li");
        doc.update_style(element, |s| s.set_size(size.x, size.y))
            .expect("element exists");
        element
    }
}
