//! Standalone draggables, droppables and resizables driven through the context.

use azui_core::geometry::Size;
use azui_core::math::Vec2;
use azui_dnd::{
    Behavior, BehaviorKind, Containment, DndContext, DndEvent, DndState, DraggableOptions,
    DroppableOptions, PointerDevice, ResizableOptions, ResizeHandles,
};
use azui_dom::{Document, ElementId, Positioning};
use azui_test_utils::{GestureDriver, HookRecorder};

fn pt(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn absolute(doc: &mut Document, x: f32, y: f32, width: f32, height: f32) -> ElementId {
    let el = doc.create_element("div");
    doc.update_style(el, |s| {
        s.position = Positioning::Absolute;
        s.left = Some(x);
        s.top = Some(y);
        s.set_size(width, height);
    })
    .unwrap();
    doc.append_child(doc.root(), el).unwrap();
    el
}

/// A 200x200 frame at (100, 100) holding a 50x50 box in its top-left corner.
fn framed_box(options: DraggableOptions) -> (DndContext, ElementId, ElementId) {
    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let frame = absolute(&mut doc, 100.0, 100.0, 200.0, 200.0);
    let boxed = doc.create_element("div");
    doc.update_style(boxed, |s| s.set_size(50.0, 50.0)).unwrap();
    doc.append_child(frame, boxed).unwrap();

    let mut ctx = DndContext::new(doc);
    ctx.make_draggable(boxed, Some(options));
    (ctx, frame, boxed)
}

fn rect_of(ctx: &mut DndContext, el: ElementId) -> azui_core::geometry::Rect {
    ctx.document_mut().update_layout();
    ctx.document().bounding_rect(el)
}

#[test]
fn test_drag_clamped_to_parent() {
    let recorder = HookRecorder::new();
    let options = recorder
        .wire_draggable(DraggableOptions::default().containment(Containment::Parent));
    let (mut ctx, _, boxed) = framed_box(options);
    let mut driver = GestureDriver::new();

    assert!(driver.press(&mut ctx, pt(125.0, 125.0)));
    driver.move_to(&mut ctx, pt(425.0, 125.0));
    assert_eq!(rect_of(&mut ctx, boxed).x, 250.0);

    let stop = driver.release(&mut ctx).unwrap();
    assert_eq!(stop.source, boxed);
    assert_eq!(stop.origin_container, None);
    assert!(!stop.released_outside);
    assert_eq!(stop.bounding_rect.x, 250.0);
    assert_eq!(
        recorder.names(),
        vec!["drag_create", "drag_start", "drag", "drag_stop"]
    );

    // A standalone drag leaves the element where it was dropped.
    let style = ctx.document().style(boxed).unwrap();
    assert_eq!(style.position, Positioning::Relative);
    assert_eq!(style.left, Some(150.0));
}

#[test]
fn test_resist_distance() {
    let (mut ctx, _, _) = framed_box(DraggableOptions::default());
    let mut driver = GestureDriver::new();

    driver.press(&mut ctx, pt(125.0, 125.0));
    driver.move_to(&mut ctx, pt(128.0, 125.0));
    assert_eq!(
        ctx.state(),
        DndState::Pending {
            device: PointerDevice::Mouse
        }
    );
    driver.move_to(&mut ctx, pt(131.0, 125.0));
    assert_eq!(
        ctx.state(),
        DndState::Dragging {
            device: PointerDevice::Mouse
        }
    );
}

#[test]
fn test_drag_veto_holds_position() {
    let recorder = HookRecorder::new();
    let (mut ctx, _, boxed) = framed_box(recorder.wire_draggable(DraggableOptions::default()));
    recorder.veto("drag");
    let mut driver = GestureDriver::new();

    driver.press(&mut ctx, pt(125.0, 125.0));
    driver.move_through(&mut ctx, pt(175.0, 175.0), 3);
    assert_eq!(rect_of(&mut ctx, boxed).position(), pt(100.0, 100.0));
    assert_eq!(recorder.count("drag"), 3);

    recorder.allow("drag");
    driver.move_to(&mut ctx, pt(180.0, 175.0));
    assert_eq!(rect_of(&mut ctx, boxed).position(), pt(155.0, 150.0));
}

#[test]
fn test_detachable_axis_escapes() {
    let options = DraggableOptions::default()
        .containment(Containment::Parent)
        .detachable(true);
    let (mut ctx, _, boxed) = framed_box(options);
    let mut driver = GestureDriver::new();

    driver.press(&mut ctx, pt(125.0, 125.0));
    driver.move_to(&mut ctx, pt(425.0, 125.0));
    assert_eq!(rect_of(&mut ctx, boxed).position(), pt(400.0, 100.0));
    let detached = ctx.session().unwrap().detached();
    assert!(detached.x);
    assert!(!detached.y);

    // The escaped axis stays free even back inside the frame.
    driver.move_to(&mut ctx, pt(150.0, 125.0));
    assert!(ctx.session().unwrap().detached().x);

    let stop = driver.release(&mut ctx).unwrap();
    assert!(stop.released_outside);
}

#[test]
fn test_drag_handle() {
    let (mut ctx, _, boxed) =
        framed_box(DraggableOptions::default().handle("grip"));
    let grip = {
        let doc = ctx.document_mut();
        let grip = doc.create_element("span");
        doc.add_class(grip, "grip");
        doc.update_style(grip, |s| s.set_size(10.0, 10.0)).unwrap();
        doc.append_child(boxed, grip).unwrap();
        grip
    };
    let mut driver = GestureDriver::new();

    assert!(!driver.press(&mut ctx, pt(140.0, 140.0)));
    assert_eq!(ctx.state(), DndState::Idle);

    assert!(driver.press(&mut ctx, pt(105.0, 105.0)));
    assert_eq!(ctx.session().map(|s| s.item()), Some(boxed));
    assert_ne!(ctx.session().map(|s| s.item()), Some(grip));
}

#[test]
fn test_droppable_hooks_fire_once_per_transition() {
    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let boxed = absolute(&mut doc, 100.0, 100.0, 50.0, 50.0);
    let zone = absolute(&mut doc, 400.0, 100.0, 100.0, 100.0);
    let mut ctx = DndContext::new(doc);
    ctx.make_draggable(boxed, None);

    let recorder = HookRecorder::new();
    ctx.make_droppable(
        zone,
        Some(recorder.wire_droppable(DroppableOptions::new(DndEvent::all()))),
    );
    let mut driver = GestureDriver::new();

    driver.press(&mut ctx, pt(125.0, 125.0));
    driver.move_to(&mut ctx, pt(200.0, 150.0));
    assert!(recorder.calls().is_empty());

    driver.move_to(&mut ctx, pt(450.0, 150.0));
    driver.move_to(&mut ctx, pt(460.0, 150.0));
    assert_eq!(recorder.count("pointer_in"), 1);
    assert_eq!(recorder.count("target_center_in"), 1);
    assert_eq!(ctx.bus().center_target(), Some(zone));

    let entered = recorder.drops(DndEvent::POINTER_IN);
    assert_eq!(entered[0].source, boxed);
    assert_eq!(entered[0].target, zone);

    driver.move_to(&mut ctx, pt(700.0, 150.0));
    assert_eq!(recorder.count("pointer_out"), 1);
    assert_eq!(recorder.count("target_center_out"), 1);
    assert_eq!(ctx.bus().center_target(), None);

    let stop = driver.release(&mut ctx).unwrap();
    assert_eq!(stop.target, None);
}

#[test]
fn test_drop_target_reported_on_release() {
    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let boxed = absolute(&mut doc, 100.0, 100.0, 50.0, 50.0);
    let zone = absolute(&mut doc, 400.0, 100.0, 100.0, 100.0);
    let mut ctx = DndContext::new(doc);
    ctx.make_draggable(boxed, None);
    ctx.make_droppable(zone, None);
    let mut driver = GestureDriver::new();

    let stop = driver
        .drag(&mut ctx, pt(125.0, 125.0), pt(450.0, 150.0), 4)
        .unwrap();
    assert_eq!(stop.target, Some(zone));
    assert_eq!(ctx.bus().center_target(), None);
}

#[test]
fn test_make_draggable_is_idempotent() {
    let (mut ctx, _, boxed) = framed_box(DraggableOptions::default().resist(20.0));
    let draggable = ctx.make_draggable(boxed, Some(DraggableOptions::default().resist(1.0)));
    assert_eq!(draggable.options().resist, 20.0);
    assert_eq!(ctx.registry().draggables().len(), 1);
}

#[test]
fn test_teardown_draggable() {
    let (mut ctx, _, boxed) = framed_box(DraggableOptions::default());
    assert!(ctx.teardown(boxed, BehaviorKind::Draggable));
    assert!(!ctx.teardown(boxed, BehaviorKind::Draggable));

    let mut driver = GestureDriver::new();
    assert!(!driver.press(&mut ctx, pt(125.0, 125.0)));
}

fn resizable_panel(options: ResizableOptions) -> (DndContext, ElementId) {
    let mut doc = Document::new(Size::new(1024.0, 768.0));
    let panel = absolute(&mut doc, 100.0, 100.0, 200.0, 100.0);
    let mut ctx = DndContext::new(doc);
    ctx.make_resizable(panel, Some(options));
    (ctx, panel)
}

#[test]
fn test_resize_east_edge() {
    let recorder = HookRecorder::new();
    let (mut ctx, panel) = resizable_panel(
        recorder.wire_resizable(ResizableOptions::default().min_size(50.0, 50.0)),
    );
    let mut driver = GestureDriver::new();

    assert!(driver.press(&mut ctx, pt(299.0, 150.0)));
    assert_eq!(
        ctx.state(),
        DndState::Resizing {
            device: PointerDevice::Mouse
        }
    );
    assert_eq!(ctx.resize_session().map(|s| s.handle()), Some(ResizeHandles::E));

    driver.move_to(&mut ctx, pt(349.0, 150.0));
    assert_eq!(ctx.document().style(panel).unwrap().width, Some(250.0));

    driver.move_to(&mut ctx, pt(100.0, 150.0));
    assert_eq!(ctx.document().style(panel).unwrap().width, Some(50.0));

    assert!(driver.release(&mut ctx).is_none());
    assert_eq!(ctx.state(), DndState::Idle);
    assert_eq!(recorder.count("resize_create"), 1);
    assert_eq!(recorder.count("resize"), 2);
    assert_eq!(recorder.count("resize_stop"), 1);
    assert_eq!(rect_of(&mut ctx, panel).width, 50.0);
}

#[test]
fn test_resize_west_edge_moves_element() {
    let (mut ctx, panel) = resizable_panel(ResizableOptions::default());
    let mut driver = GestureDriver::new();

    driver.press(&mut ctx, pt(101.0, 150.0));
    driver.move_to(&mut ctx, pt(61.0, 150.0));
    driver.release(&mut ctx);

    let rect = rect_of(&mut ctx, panel);
    assert_eq!(rect.x, 60.0);
    assert_eq!(rect.width, 240.0);
}

#[test]
fn test_resize_cancel_reverts() {
    let (mut ctx, panel) = resizable_panel(ResizableOptions::default());
    let mut driver = GestureDriver::new();

    driver.press(&mut ctx, pt(299.0, 199.0));
    driver.move_to(&mut ctx, pt(349.0, 249.0));
    ctx.cancel();

    assert_eq!(ctx.state(), DndState::Idle);
    let rect = rect_of(&mut ctx, panel);
    assert_eq!((rect.width, rect.height), (200.0, 100.0));
}

#[test]
fn test_resize_vetoes() {
    let recorder = HookRecorder::new();
    let (mut ctx, panel) = resizable_panel(recorder.wire_resizable(ResizableOptions::default()));
    let mut driver = GestureDriver::new();

    recorder.veto("resize_create");
    assert!(!driver.press(&mut ctx, pt(299.0, 150.0)));

    recorder.allow("resize_create");
    recorder.veto("resize");
    assert!(driver.press(&mut ctx, pt(299.0, 150.0)));
    driver.move_to(&mut ctx, pt(349.0, 150.0));
    assert_eq!(ctx.document().style(panel).unwrap().width, Some(200.0));
}

#[test]
fn test_interior_press_is_not_a_resize() {
    let (mut ctx, _) = resizable_panel(ResizableOptions::default());
    let mut driver = GestureDriver::new();
    assert!(!driver.press(&mut ctx, pt(200.0, 150.0)));
    assert_eq!(ctx.state(), DndState::Idle);
}

#[test]
fn test_touch_handles_are_larger() {
    let (mut ctx, _) = resizable_panel(ResizableOptions::default());
    let mut mouse = GestureDriver::new();
    assert!(!mouse.press(&mut ctx, pt(294.0, 150.0)));

    let mut touch = GestureDriver::touch();
    assert!(touch.press(&mut ctx, pt(294.0, 150.0)));
}
