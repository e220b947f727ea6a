//! Error types for document operations.

use crate::element::ElementId;

/// Error types for DOM mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Element not found in the document.
    NotFound(ElementId),
    /// The operation needs the element to have a parent.
    NoParent(ElementId),
    /// The insertion would make an element its own ancestor.
    HierarchyRequest {
        parent: ElementId,
        child: ElementId,
    },
    /// The document root cannot be moved or removed.
    RootImmutable,
}

impl std::fmt::Display for DomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomError::NotFound(id) => write!(f, "Element {:?} not found", id),
            DomError::NoParent(id) => write!(f, "Element {:?} has no parent", id),
            DomError::HierarchyRequest { parent, child } => {
                write!(f, "Cannot insert {:?} under its descendant {:?}", child, parent)
            }
            DomError::RootImmutable => write!(f, "The document root cannot be moved"),
        }
    }
}

impl std::error::Error for DomError {}

/// Result type for DOM operations.
pub type DomResult<T> = Result<T, DomError>;
