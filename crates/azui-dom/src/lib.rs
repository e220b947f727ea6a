//! azui DOM - headless element tree with Taffy layout
//!
//! The interaction engine mutates a document the same way a browser widget
//! library mutates the DOM: it moves children around, toggles classes and
//! writes inline positioning styles. This crate provides that document as an
//! explicit arena so the engine can run (and be tested) without a browser.
//!
//! ## Quick Start
//!
//! ```rust
//! use azui_core::geometry::Size;
//! use azui_dom::{Document, Flow};
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let list = doc.create_element("ul");
//! doc.update_style(list, |s| {
//!     s.flow = Flow::Row;
//!     s.width = Some(300.0);
//!     s.height = Some(40.0);
//! })
//! .unwrap();
//! doc.append_child(doc.root(), list).unwrap();
//!
//! let item = doc.create_element("li");
//! doc.update_style(item, |s| s.set_size(100.0, 40.0)).unwrap();
//! doc.append_child(list, item).unwrap();
//!
//! doc.update_layout();
//! assert_eq!(doc.bounding_rect(item).width, 100.0);
//! ```

pub mod dirty;
pub mod document;
pub mod element;
pub mod error;
pub mod style;

pub use dirty::DirtyFlags;
pub use document::Document;
pub use element::{ClassList, Element, ElementId};
pub use error::{DomError, DomResult};
pub use style::{Display, Flow, InlineStyle, Positioning, Visibility};
