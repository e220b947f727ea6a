//! Resizable contract: edge and corner handles that change an element's size.

use crate::decision::Hook;
use crate::pointer::{PointerDevice, PointerEvent};
use crate::registry::{Behavior, BehaviorKind};
use azui_core::geometry::Rect;
use azui_core::math::Vec2;
use azui_dom::{Document, DomError, DomResult, ElementId, Positioning};
use bitflags::bitflags;
use std::fmt;

/// Handle thickness for mouse input.
pub const MOUSE_HANDLE_SIZE: f32 = 4.0;
/// Handle thickness for touch input.
pub const TOUCH_HANDLE_SIZE: f32 = 8.0;

bitflags! {
    /// Edges a resize handle acts on. Corners combine two edges.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResizeHandles: u8 {
        const N = 1 << 0;
        const E = 1 << 1;
        const S = 1 << 2;
        const W = 1 << 3;

        const NE = Self::N.bits() | Self::E.bits();
        const SE = Self::S.bits() | Self::E.bits();
        const SW = Self::S.bits() | Self::W.bits();
        const NW = Self::N.bits() | Self::W.bits();
    }
}

/// Arguments passed to resizable hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub element: ElementId,
    pub pointer: PointerEvent,
    pub handle: ResizeHandles,
    /// Page-space rect the element has (or is about to get).
    pub rect: Rect,
}

/// Options for a [`Resizable`].
#[derive(Clone)]
pub struct ResizableOptions {
    /// Handles that are active.
    pub handles: ResizeHandles,
    /// Overrides the per-device handle thickness.
    pub handle_size: Option<f32>,
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    /// Shift the element when resizing from the north or west edge so the
    /// opposite edge stays put.
    pub move_on_resize: bool,
    pub create: Option<Hook<ResizeEvent>>,
    pub resize: Option<Hook<ResizeEvent>>,
    pub stop: Option<Hook<ResizeEvent>>,
}

impl Default for ResizableOptions {
    fn default() -> Self {
        Self {
            handles: ResizeHandles::all(),
            handle_size: None,
            min_width: 0.0,
            min_height: 0.0,
            max_width: None,
            max_height: None,
            move_on_resize: true,
            create: None,
            resize: None,
            stop: None,
        }
    }
}

impl fmt::Debug for ResizableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizableOptions")
            .field("handles", &self.handles)
            .field("handle_size", &self.handle_size)
            .field("min_width", &self.min_width)
            .field("min_height", &self.min_height)
            .field("max_width", &self.max_width)
            .field("max_height", &self.max_height)
            .field("move_on_resize", &self.move_on_resize)
            .finish_non_exhaustive()
    }
}

impl ResizableOptions {
    pub fn handles(mut self, handles: ResizeHandles) -> Self {
        self.handles = handles;
        self
    }

    pub fn handle_size(mut self, size: f32) -> Self {
        self.handle_size = Some(size);
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    pub fn max_size(mut self, width: f32, height: f32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn move_on_resize(mut self, enabled: bool) -> Self {
        self.move_on_resize = enabled;
        self
    }

    pub fn on_create(mut self, hook: Hook<ResizeEvent>) -> Self {
        self.create = Some(hook);
        self
    }

    pub fn on_resize(mut self, hook: Hook<ResizeEvent>) -> Self {
        self.resize = Some(hook);
        self
    }

    pub fn on_stop(mut self, hook: Hook<ResizeEvent>) -> Self {
        self.stop = Some(hook);
        self
    }
}

/// Geometry proposed by a resize step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStep {
    pub width: f32,
    pub height: f32,
    pub offset: Vec2,
}

/// State captured when a resize gesture starts.
#[derive(Debug, Clone, Copy)]
struct ResizeAnchor {
    handle: ResizeHandles,
    pointer: Vec2,
    rect: Rect,
    offset: Vec2,
}

/// An element with resize handles along its edges.
#[derive(Debug)]
pub struct Resizable {
    element: ElementId,
    options: ResizableOptions,
    anchor: Option<ResizeAnchor>,
}

impl Behavior for Resizable {
    const KIND: BehaviorKind = BehaviorKind::Resizable;
    type Options = ResizableOptions;

    fn create(element: ElementId, options: ResizableOptions) -> Self {
        Self {
            element,
            options,
            anchor: None,
        }
    }

    fn element(&self) -> ElementId {
        self.element
    }

    fn options(&self) -> &ResizableOptions {
        &self.options
    }
}

impl Resizable {
    pub fn handle_size(&self, device: PointerDevice) -> f32 {
        self.options.handle_size.unwrap_or(match device {
            PointerDevice::Mouse => MOUSE_HANDLE_SIZE,
            PointerDevice::Touch => TOUCH_HANDLE_SIZE,
        })
    }

    /// Handle under a page-space point, if any.
    pub fn handle_at(
        &self,
        doc: &Document,
        point: Vec2,
        device: PointerDevice,
    ) -> Option<ResizeHandles> {
        let rect = doc.bounding_rect(self.element);
        if !rect.contains(point) {
            return None;
        }
        let size = self.handle_size(device);
        let mut handle = ResizeHandles::empty();
        handle.set(ResizeHandles::N, point.y - rect.y <= size);
        handle.set(ResizeHandles::S, rect.bottom() - point.y <= size);
        handle.set(ResizeHandles::W, point.x - rect.x <= size);
        handle.set(ResizeHandles::E, rect.right() - point.x <= size);
        let handle = handle & self.options.handles;
        (!handle.is_empty()).then_some(handle)
    }

    /// Whether a resize is in progress.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn active_handle(&self) -> Option<ResizeHandles> {
        self.anchor.map(|a| a.handle)
    }

    /// Start resizing from a handle. Layout must be up to date.
    pub fn begin(
        &mut self,
        doc: &mut Document,
        handle: ResizeHandles,
        pointer: Vec2,
    ) -> DomResult<()> {
        let style = doc
            .style(self.element)
            .cloned()
            .ok_or(DomError::NotFound(self.element))?;
        let moves = handle.intersects(ResizeHandles::N | ResizeHandles::W);
        if moves && self.options.move_on_resize && style.position == Positioning::Static {
            doc.update_style(self.element, |s| s.position = Positioning::Relative)?;
        }
        let (left, top) = style.offset();
        self.anchor = Some(ResizeAnchor {
            handle,
            pointer,
            rect: doc.bounding_rect(self.element),
            offset: Vec2::new(left, top),
        });
        Ok(())
    }

    /// Geometry for a pointer position, clamped to the size limits.
    pub fn propose(&self, pointer: Vec2) -> Option<ResizeStep> {
        let anchor = self.anchor?;
        let delta = pointer - anchor.pointer;
        let opts = &self.options;
        let clamp = |value: f32, min: f32, max: Option<f32>| {
            value.min(max.unwrap_or(f32::INFINITY)).max(min)
        };

        let mut width = anchor.rect.width;
        let mut height = anchor.rect.height;
        if anchor.handle.contains(ResizeHandles::E) {
            width = anchor.rect.width + delta.x;
        } else if anchor.handle.contains(ResizeHandles::W) {
            width = anchor.rect.width - delta.x;
        }
        if anchor.handle.contains(ResizeHandles::S) {
            height = anchor.rect.height + delta.y;
        } else if anchor.handle.contains(ResizeHandles::N) {
            height = anchor.rect.height - delta.y;
        }
        let width = clamp(width, opts.min_width, opts.max_width);
        let height = clamp(height, opts.min_height, opts.max_height);

        let mut offset = anchor.offset;
        if opts.move_on_resize {
            if anchor.handle.contains(ResizeHandles::W) {
                offset.x += anchor.rect.width - width;
            }
            if anchor.handle.contains(ResizeHandles::N) {
                offset.y += anchor.rect.height - height;
            }
        }
        Some(ResizeStep {
            width,
            height,
            offset,
        })
    }

    /// Page-space rect a step would produce.
    pub fn step_rect(&self, step: &ResizeStep) -> Option<Rect> {
        let anchor = self.anchor?;
        let moved = step.offset - anchor.offset;
        Some(Rect::new(
            anchor.rect.x + moved.x,
            anchor.rect.y + moved.y,
            step.width,
            step.height,
        ))
    }

    pub fn apply(&self, doc: &mut Document, step: &ResizeStep) -> DomResult<()> {
        let moves = self.options.move_on_resize
            && self
                .anchor
                .is_some_and(|a| a.handle.intersects(ResizeHandles::N | ResizeHandles::W));
        doc.update_style(self.element, |s| {
            s.set_size(step.width, step.height);
            if moves {
                s.left = Some(step.offset.x);
                s.top = Some(step.offset.y);
            }
        })
    }

    /// Restore the geometry captured by [`Resizable::begin`].
    pub fn revert(&mut self, doc: &mut Document) -> DomResult<()> {
        let Some(anchor) = self.anchor else {
            return Ok(());
        };
        let step = ResizeStep {
            width: anchor.rect.width,
            height: anchor.rect.height,
            offset: anchor.offset,
        };
        self.apply(doc, &step)?;
        self.anchor = None;
        Ok(())
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azui_core::geometry::Size;

    fn setup(options: ResizableOptions) -> (Document, Resizable) {
        let mut doc = Document::new(Size::new(800.0, 600.0));
        let el = doc.create_element("div");
        doc.update_style(el, |s| {
            s.position = Positioning::Absolute;
            s.left = Some(100.0);
            s.top = Some(100.0);
            s.set_size(200.0, 100.0);
        })
        .unwrap();
        doc.append_child(doc.root(), el).unwrap();
        doc.update_layout();
        (doc, Resizable::create(el, options))
    }

    #[test]
    fn test_handle_detection() {
        let (doc, resizable) = setup(ResizableOptions::default());
        let mouse = PointerDevice::Mouse;
        assert_eq!(
            resizable.handle_at(&doc, Vec2::new(298.0, 150.0), mouse),
            Some(ResizeHandles::E)
        );
        assert_eq!(
            resizable.handle_at(&doc, Vec2::new(101.0, 101.0), mouse),
            Some(ResizeHandles::NW)
        );
        assert_eq!(resizable.handle_at(&doc, Vec2::new(200.0, 150.0), mouse), None);
        assert_eq!(resizable.handle_at(&doc, Vec2::new(400.0, 150.0), mouse), None);
    }

    #[test]
    fn test_touch_handles_are_wider() {
        let (doc, resizable) = setup(ResizableOptions::default());
        let point = Vec2::new(293.0, 150.0);
        assert_eq!(resizable.handle_at(&doc, point, PointerDevice::Mouse), None);
        assert_eq!(
            resizable.handle_at(&doc, point, PointerDevice::Touch),
            Some(ResizeHandles::E)
        );
    }

    #[test]
    fn test_disabled_handles_ignored() {
        let (doc, resizable) = setup(ResizableOptions::default().handles(ResizeHandles::SE));
        assert_eq!(
            resizable.handle_at(&doc, Vec2::new(101.0, 101.0), PointerDevice::Mouse),
            None
        );
    }

    #[test]
    fn test_east_resize_with_limits() {
        let (mut doc, mut resizable) =
            setup(ResizableOptions::default().min_size(50.0, 50.0).max_size(250.0, 300.0));
        resizable
            .begin(&mut doc, ResizeHandles::E, Vec2::new(299.0, 150.0))
            .unwrap();

        let step = resizable.propose(Vec2::new(329.0, 150.0)).unwrap();
        assert_eq!((step.width, step.height), (230.0, 100.0));

        let step = resizable.propose(Vec2::new(500.0, 150.0)).unwrap();
        assert_eq!(step.width, 250.0);

        let step = resizable.propose(Vec2::new(0.0, 150.0)).unwrap();
        assert_eq!(step.width, 50.0);
    }

    #[test]
    fn test_west_resize_moves_element() {
        let (mut doc, mut resizable) = setup(ResizableOptions::default());
        resizable
            .begin(&mut doc, ResizeHandles::W, Vec2::new(101.0, 150.0))
            .unwrap();
        let step = resizable.propose(Vec2::new(81.0, 150.0)).unwrap();
        assert_eq!(step.width, 220.0);
        assert_eq!(step.offset, Vec2::new(80.0, 100.0));

        resizable.apply(&mut doc, &step).unwrap();
        doc.update_layout();
        let rect = doc.bounding_rect(resizable.element());
        assert_eq!(rect, Rect::new(80.0, 100.0, 220.0, 100.0));
        assert_eq!(resizable.step_rect(&step), Some(rect));
    }

    #[test]
    fn test_revert_restores_geometry() {
        let (mut doc, mut resizable) = setup(ResizableOptions::default());
        resizable
            .begin(&mut doc, ResizeHandles::SE, Vec2::new(299.0, 199.0))
            .unwrap();
        let step = resizable.propose(Vec2::new(349.0, 249.0)).unwrap();
        resizable.apply(&mut doc, &step).unwrap();
        resizable.revert(&mut doc).unwrap();
        doc.update_layout();

        assert!(!resizable.is_active());
        assert_eq!(
            doc.bounding_rect(resizable.element()),
            Rect::new(100.0, 100.0, 200.0, 100.0)
        );
    }
}
