//! Droppable contract: elements that receive drop events from the bus.

use crate::bus::{DndEvent, DropEvent};
use crate::decision::{Decision, Hook, run_hook};
use crate::registry::{Behavior, BehaviorKind};
use azui_dom::{Document, ElementId};
use std::fmt;

/// Options for a [`Droppable`].
#[derive(Clone)]
pub struct DroppableOptions {
    /// Drop events this element wants to receive.
    pub interest: DndEvent,
    /// When set, only sources carrying this class are considered.
    pub accept: Option<String>,
    /// Disabled droppables never become bus targets.
    pub disabled: bool,
    pub pointer_in: Option<Hook<DropEvent>>,
    pub pointer_out: Option<Hook<DropEvent>>,
    pub target_center_in: Option<Hook<DropEvent>>,
    pub target_center_out: Option<Hook<DropEvent>>,
}

impl Default for DroppableOptions {
    fn default() -> Self {
        Self::new(DndEvent::TARGET_CENTER)
    }
}

impl fmt::Debug for DroppableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DroppableOptions")
            .field("interest", &self.interest)
            .field("accept", &self.accept)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl DroppableOptions {
    pub fn new(interest: DndEvent) -> Self {
        Self {
            interest,
            accept: None,
            disabled: false,
            pointer_in: None,
            pointer_out: None,
            target_center_in: None,
            target_center_out: None,
        }
    }

    pub fn accept(mut self, class: impl Into<String>) -> Self {
        self.accept = Some(class.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_pointer_in(mut self, hook: Hook<DropEvent>) -> Self {
        self.pointer_in = Some(hook);
        self
    }

    pub fn on_pointer_out(mut self, hook: Hook<DropEvent>) -> Self {
        self.pointer_out = Some(hook);
        self
    }

    pub fn on_target_center_in(mut self, hook: Hook<DropEvent>) -> Self {
        self.target_center_in = Some(hook);
        self
    }

    pub fn on_target_center_out(mut self, hook: Hook<DropEvent>) -> Self {
        self.target_center_out = Some(hook);
        self
    }
}

/// An element registered as a drop target.
#[derive(Debug)]
pub struct Droppable {
    element: ElementId,
    options: DroppableOptions,
}

impl Behavior for Droppable {
    const KIND: BehaviorKind = BehaviorKind::Droppable;
    type Options = DroppableOptions;

    fn create(element: ElementId, options: DroppableOptions) -> Self {
        Self { element, options }
    }

    fn element(&self) -> ElementId {
        self.element
    }

    fn options(&self) -> &DroppableOptions {
        &self.options
    }
}

impl Droppable {
    pub fn interest(&self) -> DndEvent {
        self.options.interest
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    /// Whether `source` may target this droppable at all.
    pub fn accepts(&self, doc: &Document, source: ElementId) -> bool {
        !self.options.disabled
            && self
                .options
                .accept
                .as_deref()
                .is_none_or(|class| doc.has_class(source, class))
    }

    /// Run the user hook registered for an event kind.
    pub fn dispatch(&self, event: &DropEvent) -> Decision {
        let hook = if event.kind == DndEvent::POINTER_IN {
            self.options.pointer_in.as_ref()
        } else if event.kind == DndEvent::POINTER_OUT {
            self.options.pointer_out.as_ref()
        } else if event.kind == DndEvent::TARGET_CENTER_IN {
            self.options.target_center_in.as_ref()
        } else if event.kind == DndEvent::TARGET_CENTER_OUT {
            self.options.target_center_out.as_ref()
        } else {
            None
        };
        run_hook(hook, event)
    }
}
