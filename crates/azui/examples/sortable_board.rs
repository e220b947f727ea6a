//! A two-column board where cards can be reordered and moved between columns.
//!
//! The example scripts a pointer gesture instead of reading real input, and
//! logs every hook the sortables fire.
//!
//! Run with: RUST_LOG=debug cargo run -p azui --example sortable_board

use azui::dnd::ContainerEvent;
use azui::prelude::*;
use std::time::Duration;

const CARD: f32 = 80.0;

fn column(doc: &mut Document, x: f32, cards: usize) -> DomResult<(ElementId, Vec<ElementId>)> {
    let column = doc.create_element("ul");
    doc.update_style(column, |s| {
        s.position = Positioning::Absolute;
        s.left = Some(x);
        s.top = Some(0.0);
        s.set_size(CARD, CARD * 6.0);
        s.flow = Flow::Column;
    })?;
    doc.append_child(doc.root(), column)?;

    let mut items = Vec::with_capacity(cards);
    for _ in 0..cards {
        let card = doc.create_element("li");
        doc.add_class(card, classes::SORTABLE_ITEM);
        doc.update_style(card, |s| s.set_size(CARD, CARD))?;
        doc.append_child(column, card)?;
        items.push(card);
    }
    Ok((column, items))
}

fn logged(name: &'static str) -> SortableOptions {
    SortableOptions::default()
        .align(Axis::Y)
        .detachable(true)
        .on_enter(hook(move |e: &ContainerEvent| {
            tracing::info!(column = name, container = ?e.container, "enter");
            Decision::Proceed
        }))
        .on_exit(hook(move |e: &ContainerEvent| {
            tracing::info!(column = name, container = ?e.container, "exit");
            Decision::Proceed
        }))
        .on_sort(hook(move |e: &ContainerEvent| {
            tracing::info!(column = name, target = ?e.drop.target, "sort");
            Decision::Proceed
        }))
        .on_stop(hook(move |data: &StopData| {
            tracing::info!(
                column = name,
                source = ?data.source,
                index = ?data.index,
                detached = data.detached,
                "stop"
            );
            Decision::Proceed
        }))
}

struct Script {
    time: Duration,
}

impl Script {
    fn send(&mut self, ctx: &mut DndContext, phase: PointerPhase, x: f32, y: f32) -> Option<StopData> {
        self.time += Duration::from_millis(16);
        ctx.handle(PointerEvent::mouse(phase, Vec2::new(x, y), self.time))
    }

    fn drag(&mut self, ctx: &mut DndContext, path: &[(f32, f32)]) -> Option<StopData> {
        let (&(x, y), rest) = path.split_first()?;
        self.send(ctx, PointerPhase::Down, x, y);
        for &(x, y) in rest {
            self.send(ctx, PointerPhase::Move, x, y);
        }
        let &(x, y) = path.last()?;
        self.send(ctx, PointerPhase::Up, x, y)
    }
}

fn main() -> DomResult<()> {
    azui::core::logging::init();

    let mut doc = Document::new(Size::new(400.0, 600.0));
    let (todo, _) = column(&mut doc, 0.0, 4)?;
    let (done, _) = column(&mut doc, 160.0, 2)?;

    let mut ctx = DndContext::new(doc);
    ctx.make_sortable(todo, Some(logged("todo")));
    ctx.make_sortable(done, Some(logged("done")));

    let mut script = Script {
        time: Duration::ZERO,
    };

    // Move the first card below the second one.
    let path: Vec<_> = (0..=6).map(|i| (40.0, 40.0 + i as f32 * 11.0)).collect();
    script.drag(&mut ctx, &path);
    tracing::info!(order = ?ctx.document().children(todo), "todo after reorder");

    // Carry the top card across to the second column and let it settle.
    let mut path: Vec<_> = (0..=8).map(|i| (40.0 + i as f32 * 20.0, 40.0)).collect();
    path.extend((1..=5).map(|i| (200.0, 40.0 + i as f32)));
    match script.drag(&mut ctx, &path) {
        Some(stop) => tracing::info!(
            from = ?stop.origin_container,
            to = ?stop.target_container,
            "card moved"
        ),
        None => tracing::warn!("drag did not start"),
    }

    tracing::info!(todo = ?ctx.document().children(todo), done = ?ctx.document().children(done), "final board");
    Ok(())
}
