//! Draggable contract: pointer-driven movement with containment.

use crate::decision::Hook;
use crate::pointer::PointerEvent;
use crate::registry::{Behavior, BehaviorKind};
use azui_core::geometry::Rect;
use azui_core::math::Vec2;
use azui_dom::{Document, DomResult, ElementId, Positioning};
use std::fmt;

/// Default pointer travel before a press becomes a drag.
pub const DEFAULT_RESIST: f32 = 5.0;

/// Region a dragged element is kept inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Containment {
    #[default]
    None,
    /// The element's current parent.
    Parent,
    Element(ElementId),
}

/// Axes on which a drag has escaped its containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetachedAxes {
    pub x: bool,
    pub y: bool,
}

impl DetachedAxes {
    pub const BOTH: Self = Self { x: true, y: true };

    pub fn any(self) -> bool {
        self.x || self.y
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            x: self.x || other.x,
            y: self.y || other.y,
        }
    }
}

/// Arguments passed to draggable hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub element: ElementId,
    pub pointer: PointerEvent,
    /// `left`/`top` offset the element has (or is about to get).
    pub offset: Vec2,
}

/// Options for a [`Draggable`].
#[derive(Clone)]
pub struct DraggableOptions {
    pub containment: Containment,
    /// Pointer travel (in pixels) before the drag starts.
    pub resist: f32,
    /// Class of a descendant that must be under the pointer to start a drag.
    pub handle: Option<String>,
    /// Let the element leave its containment on the axis the pointer leaves.
    pub detachable: bool,
    pub create: Option<Hook<DragEvent>>,
    pub start: Option<Hook<DragEvent>>,
    pub drag: Option<Hook<DragEvent>>,
    pub stop: Option<Hook<DragEvent>>,
}

impl Default for DraggableOptions {
    fn default() -> Self {
        Self {
            containment: Containment::None,
            resist: DEFAULT_RESIST,
            handle: None,
            detachable: false,
            create: None,
            start: None,
            drag: None,
            stop: None,
        }
    }
}

impl fmt::Debug for DraggableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableOptions")
            .field("containment", &self.containment)
            .field("resist", &self.resist)
            .field("handle", &self.handle)
            .field("detachable", &self.detachable)
            .finish_non_exhaustive()
    }
}

impl DraggableOptions {
    pub fn containment(mut self, containment: Containment) -> Self {
        self.containment = containment;
        self
    }

    pub fn resist(mut self, resist: f32) -> Self {
        self.resist = resist;
        self
    }

    pub fn handle(mut self, class: impl Into<String>) -> Self {
        self.handle = Some(class.into());
        self
    }

    pub fn detachable(mut self, detachable: bool) -> Self {
        self.detachable = detachable;
        self
    }

    pub fn on_create(mut self, hook: Hook<DragEvent>) -> Self {
        self.create = Some(hook);
        self
    }

    pub fn on_start(mut self, hook: Hook<DragEvent>) -> Self {
        self.start = Some(hook);
        self
    }

    pub fn on_drag(mut self, hook: Hook<DragEvent>) -> Self {
        self.drag = Some(hook);
        self
    }

    pub fn on_stop(mut self, hook: Hook<DragEvent>) -> Self {
        self.stop = Some(hook);
        self
    }
}

/// Drag phase of a single draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pressed, resist distance not yet exceeded.
    Pending,
    Dragging,
}

/// An element that follows the pointer while dragged.
///
/// The element's `left`/`top` offset is `start_offset + (pointer - mouse0)`,
/// clamped into the containment rect on every axis that has not detached.
#[derive(Debug)]
pub struct Draggable {
    element: ElementId,
    options: DraggableOptions,
    phase: DragPhase,
    /// Pointer position the offset is measured from.
    mouse0: Vec2,
    start_offset: Vec2,
    /// Bounding rect the current drag frame is measured against.
    origin_rect: Rect,
}

impl Behavior for Draggable {
    const KIND: BehaviorKind = BehaviorKind::Draggable;
    type Options = DraggableOptions;

    fn create(element: ElementId, options: DraggableOptions) -> Self {
        Self {
            element,
            options,
            phase: DragPhase::Idle,
            mouse0: Vec2::ZERO,
            start_offset: Vec2::ZERO,
            origin_rect: Rect::ZERO,
        }
    }

    fn element(&self) -> ElementId {
        self.element
    }

    fn options(&self) -> &DraggableOptions {
        &self.options
    }
}

impl Draggable {
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn mouse_origin(&self) -> Vec2 {
        self.mouse0
    }

    pub fn origin_rect(&self) -> Rect {
        self.origin_rect
    }

    pub fn start_offset(&self) -> Vec2 {
        self.start_offset
    }

    pub fn set_containment(&mut self, containment: Containment) {
        self.options.containment = containment;
    }

    /// Record the press. Layout must be up to date.
    pub fn press(&mut self, doc: &Document, pointer: Vec2) {
        self.mouse0 = pointer;
        self.origin_rect = doc.bounding_rect(self.element);
        self.phase = DragPhase::Pending;
    }

    /// Whether the pointer has travelled at least the resist distance.
    pub fn exceeds_resist(&self, pointer: Vec2) -> bool {
        pointer.distance(self.mouse0) >= self.options.resist
    }

    /// Enter the dragging phase, making the element positioned if needed.
    pub fn begin(&mut self, doc: &mut Document) -> DomResult<()> {
        let style = doc
            .style(self.element)
            .cloned()
            .ok_or(azui_dom::DomError::NotFound(self.element))?;
        if style.position == Positioning::Static {
            doc.update_style(self.element, |s| {
                s.position = Positioning::Relative;
                s.clear_offsets();
            })?;
            self.start_offset = Vec2::ZERO;
        } else {
            let (left, top) = style.offset();
            self.start_offset = Vec2::new(left, top);
        }
        self.phase = DragPhase::Dragging;
        Ok(())
    }

    /// Rebase the drag after the element moved to a new frame.
    ///
    /// `delta` is the page-space distance the element's reference frame moved.
    pub fn shift_origin(&mut self, delta: Vec2) {
        self.mouse0 += delta;
    }

    pub fn set_origin_rect(&mut self, rect: Rect) {
        self.origin_rect = rect;
    }

    /// Page-space rect of the containment region, if any.
    pub fn containment_rect(&self, doc: &Document) -> Option<Rect> {
        match self.options.containment {
            Containment::None => None,
            Containment::Parent => doc.parent(self.element).map(|p| doc.bounding_rect(p)),
            Containment::Element(id) => doc.exists(id).then(|| doc.bounding_rect(id)),
        }
    }

    /// Axes on which the pointer lies outside the containment rect.
    pub fn escaped_axes(&self, doc: &Document, pointer: Vec2) -> DetachedAxes {
        match self.containment_rect(doc) {
            Some(rect) => DetachedAxes {
                x: !rect.contains_x(pointer.x),
                y: !rect.contains_y(pointer.y),
            },
            None => DetachedAxes::default(),
        }
    }

    /// Offset the element should take for a pointer position.
    ///
    /// Layout must be up to date.
    pub fn target_offset(&self, doc: &Document, pointer: Vec2, detached: DetachedAxes) -> Vec2 {
        let mut offset = self.start_offset + (pointer - self.mouse0);
        let Some(bounds) = self.containment_rect(doc) else {
            return offset;
        };

        // Page position the element would have at offset zero.
        let rect = doc.bounding_rect(self.element);
        let current = doc
            .style(self.element)
            .map(|s| s.offset())
            .unwrap_or((0.0, 0.0));
        let base = rect.position() - Vec2::new(current.0, current.1);

        if !detached.x {
            let page_x = clamp_axis(base.x + offset.x, bounds.x, bounds.right() - rect.width);
            offset.x = page_x - base.x;
        }
        if !detached.y {
            let page_y = clamp_axis(base.y + offset.y, bounds.y, bounds.bottom() - rect.height);
            offset.y = page_y - base.y;
        }
        offset
    }

    /// Write an offset to the element's inline style.
    pub fn apply(&self, doc: &mut Document, offset: Vec2) -> DomResult<()> {
        doc.update_style(self.element, |s| {
            s.left = Some(offset.x);
            s.top = Some(offset.y);
        })
    }

    pub fn release(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

/// Clamp `value` into `[min, max]`, preferring `min` when the range is empty.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use azui_core::geometry::Size;

    fn setup() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let frame = doc.create_element("div");
        doc.update_style(frame, |s| {
            s.position = Positioning::Absolute;
            s.left = Some(100.0);
            s.top = Some(100.0);
            s.set_size(200.0, 200.0);
        })
        .unwrap();
        doc.append_child(doc.root(), frame).unwrap();

        let el = doc.create_element("div");
        doc.update_style(el, |s| s.set_size(50.0, 50.0)).unwrap();
        doc.append_child(frame, el).unwrap();
        doc.update_layout();
        (doc, frame, el)
    }

    #[test]
    fn test_resist_threshold() {
        let (doc, _, el) = setup();
        let mut drag = Draggable::create(el, DraggableOptions::default());
        drag.press(&doc, Vec2::new(110.0, 110.0));
        assert_eq!(drag.phase(), DragPhase::Pending);
        assert!(!drag.exceeds_resist(Vec2::new(113.0, 110.0)));
        assert!(drag.exceeds_resist(Vec2::new(115.0, 110.0)));
    }

    #[test]
    fn test_begin_makes_static_relative() {
        let (mut doc, _, el) = setup();
        let mut drag = Draggable::create(el, DraggableOptions::default());
        drag.press(&doc, Vec2::new(110.0, 110.0));
        drag.begin(&mut doc).unwrap();
        assert_eq!(doc.style(el).unwrap().position, Positioning::Relative);
        assert_eq!(drag.start_offset(), Vec2::ZERO);
        assert_eq!(drag.phase(), DragPhase::Dragging);
    }

    #[test]
    fn test_unconstrained_follows_pointer() {
        let (mut doc, _, el) = setup();
        let mut drag = Draggable::create(el, DraggableOptions::default());
        drag.press(&doc, Vec2::new(110.0, 110.0));
        drag.begin(&mut doc).unwrap();
        doc.update_layout();

        let offset = drag.target_offset(&doc, Vec2::new(510.0, 20.0), DetachedAxes::default());
        assert_eq!(offset, Vec2::new(400.0, -90.0));
    }

    #[test]
    fn test_parent_containment_clamps() {
        let (mut doc, _, el) = setup();
        let mut drag = Draggable::create(
            el,
            DraggableOptions::default().containment(Containment::Parent),
        );
        drag.press(&doc, Vec2::new(110.0, 110.0));
        drag.begin(&mut doc).unwrap();
        doc.update_layout();

        let offset = drag.target_offset(&doc, Vec2::new(510.0, 20.0), DetachedAxes::default());
        assert_eq!(offset, Vec2::new(150.0, 0.0));

        drag.apply(&mut doc, offset).unwrap();
        doc.update_layout();
        assert_eq!(doc.bounding_rect(el).right(), 300.0);
    }

    #[test]
    fn test_detached_axis_is_free() {
        let (mut doc, _, el) = setup();
        let mut drag = Draggable::create(
            el,
            DraggableOptions::default().containment(Containment::Parent),
        );
        drag.press(&doc, Vec2::new(110.0, 110.0));
        drag.begin(&mut doc).unwrap();
        doc.update_layout();

        let escaped = drag.escaped_axes(&doc, Vec2::new(510.0, 150.0));
        assert_eq!(escaped, DetachedAxes { x: true, y: false });

        let offset = drag.target_offset(&doc, Vec2::new(510.0, 20.0), escaped);
        assert_eq!(offset, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn test_shift_origin_rebases() {
        let (doc, _, el) = setup();
        let mut drag = Draggable::create(el, DraggableOptions::default());
        drag.press(&doc, Vec2::new(110.0, 110.0));
        drag.shift_origin(Vec2::new(0.0, 40.0));
        assert_eq!(drag.mouse_origin(), Vec2::new(110.0, 150.0));
    }
}
