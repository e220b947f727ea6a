//! azui - pointer-driven interaction widgets
//!
//! azui attaches drag, drop, resize and sortable behaviors to elements of a
//! retained, laid-out element tree and drives them from raw pointer events.
//!
//! - **Document**: elements with classes, inline styles and flexbox layout
//! - **Draggable / Droppable**: move elements and report what they pass over
//! - **Resizable**: edge and corner handles with size limits
//! - **Sortable**: live reordering, optionally across containers
//!
//! # Quick Start
//!
//! ```rust
//! use azui::prelude::*;
//! use std::time::Duration;
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let list = doc.create_element("ul");
//! doc.update_style(list, |s| {
//!     s.position = Positioning::Absolute;
//!     s.set_size(400.0, 100.0);
//! })
//! .unwrap();
//! doc.append_child(doc.root(), list).unwrap();
//!
//! let items: Vec<_> = (0..3)
//!     .map(|_| {
//!         let item = doc.create_element("li");
//!         doc.add_class(item, classes::SORTABLE_ITEM);
//!         doc.update_style(item, |s| s.set_size(100.0, 100.0)).unwrap();
//!         doc.append_child(list, item).unwrap();
//!         item
//!     })
//!     .collect();
//!
//! let mut ctx = DndContext::new(doc);
//! ctx.make_sortable(list, None);
//!
//! let at = |ms: u64| Duration::from_millis(ms);
//! ctx.handle(PointerEvent::mouse(PointerPhase::Down, Vec2::new(50.0, 50.0), at(0)));
//! for (i, x) in [83.0, 116.0, 149.0, 182.0].into_iter().enumerate() {
//!     ctx.handle(PointerEvent::mouse(PointerPhase::Move, Vec2::new(x, 50.0), at(16 * (i as u64 + 1))));
//! }
//! let stop = ctx.handle(PointerEvent::mouse(PointerPhase::Up, Vec2::new(182.0, 50.0), at(96)));
//!
//! assert!(stop.is_some());
//! assert_eq!(ctx.document().children(list), &[items[1], items[0], items[2]]);
//! ```
//!
//! # Features
//!
//! - `dnd` (default): the interaction engine
//! - `profiling` (default): puffin HTTP server support in `azui::core::profiling`

pub use azui_core as core;
pub use azui_core::math;
pub use azui_dom as dom;

#[cfg(feature = "dnd")]
pub use azui_dnd as dnd;

pub use azui_dom::{Document, DomError, DomResult, ElementId};

#[cfg(feature = "dnd")]
pub use azui_dnd::{DndContext, DndState, PointerEvent, StopData};

/// Prelude module for convenient imports
pub mod prelude {
    pub use azui_core::geometry::{Rect, Size};
    pub use azui_core::math::Vec2;

    pub use azui_dom::{
        Display, Document, DomError, DomResult, ElementId, Flow, InlineStyle, Positioning,
        Visibility,
    };

    #[cfg(feature = "dnd")]
    pub use azui_dnd::{
        Axis, Containment, Decision, DndContext, DndEvent, DndState, DraggableOptions,
        DroppableOptions, PointerDevice, PointerEvent, PointerPhase, ResizableOptions,
        ResizeHandles, SortableOptions, StopData, classes, hook,
    };
}
