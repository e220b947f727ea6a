//! azui DnD - pointer-driven drag, drop, resize and sortable interactions
//!
//! The engine binds behaviors to elements of an [`azui_dom::Document`] and
//! drives them from raw pointer events:
//!
//! - [`Registry`]: one behavior instance per element and kind
//! - [`EventBus`]: turns drag frames into `pointer_in/out` and
//!   `target_center_in/out` transitions
//! - [`Draggable`], [`Droppable`], [`Resizable`]: the primitive contracts
//! - [`Sortable`]: live reordering, optionally across containers
//! - [`DndContext`]: owns all of the above and routes pointer input
//!
//! ## Quick Start
//!
//! ```rust
//! use azui_core::geometry::Size;
//! use azui_dnd::{DndContext, SortableOptions, classes};
//! use azui_dom::{Document, Positioning};
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let list = doc.create_element("ul");
//! doc.update_style(list, |s| {
//!     s.position = Positioning::Absolute;
//!     s.set_size(300.0, 100.0);
//! })
//! .unwrap();
//! doc.append_child(doc.root(), list).unwrap();
//!
//! for _ in 0..3 {
//!     let item = doc.create_element("li");
//!     doc.add_class(item, classes::SORTABLE_ITEM);
//!     doc.update_style(item, |s| s.set_size(100.0, 100.0)).unwrap();
//!     doc.append_child(list, item).unwrap();
//! }
//!
//! let mut ctx = DndContext::new(doc);
//! ctx.make_sortable(list, Some(SortableOptions::default().detachable(true)));
//! assert_eq!(ctx.registry().draggables().len(), 3);
//! ```

pub mod bus;
pub mod classes;
pub mod context;
pub mod decision;
pub mod draggable;
pub mod droppable;
pub mod pointer;
pub mod registry;
pub mod resizable;
pub mod session;
pub mod sortable;

pub use bus::{DndEvent, DropEvent, EventBus};
pub use context::DndContext;
pub use decision::{Decision, Hook, hook};
pub use draggable::{Containment, DetachedAxes, DragEvent, DragPhase, Draggable, DraggableOptions};
pub use droppable::{Droppable, DroppableOptions};
pub use pointer::{PointerDevice, PointerEvent, PointerPhase};
pub use registry::{Behavior, BehaviorKind, BehaviorStore, Registry};
pub use resizable::{ResizeEvent, ResizeHandles, Resizable, ResizableOptions};
pub use session::{ADOPTION_GUARD, DndState, DragSession, Gesture, ResizeSession, SortBinding};
pub use sortable::{
    AddEvent, Axis, ContainerEvent, DropSide, ItemEvent, Marker, SortPhase, Sortable,
    SortableOptions, StopData,
};
