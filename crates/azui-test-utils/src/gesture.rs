//! Scripted pointer gestures.

use azui_core::math::Vec2;
use azui_dnd::{DndContext, PointerDevice, PointerEvent, PointerPhase, StopData};
use std::time::Duration;

/// Sends pointer events to a [`DndContext`], advancing a fake clock by a
/// fixed step before each one.
#[derive(Debug, Clone)]
pub struct GestureDriver {
    device: PointerDevice,
    time: Duration,
    step: Duration,
    position: Vec2,
}

impl Default for GestureDriver {
    fn default() -> Self {
        Self {
            device: PointerDevice::Mouse,
            time: Duration::ZERO,
            step: Duration::from_millis(16),
            position: Vec2::ZERO,
        }
    }
}

impl GestureDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver that sends touch events.
    pub fn touch() -> Self {
        Self {
            device: PointerDevice::Touch,
            ..Self::default()
        }
    }

    pub fn with_step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    pub fn now(&self) -> Duration {
        self.time
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    fn event(&mut self, phase: PointerPhase, position: Vec2) -> PointerEvent {
        self.time += self.step;
        self.position = position;
        PointerEvent {
            phase,
            position,
            device: self.device,
            time: self.time,
        }
    }

    pub fn press(&mut self, ctx: &mut DndContext, at: Vec2) -> bool {
        let event = self.event(PointerPhase::Down, at);
        ctx.pointer_down(event)
    }

    pub fn move_to(&mut self, ctx: &mut DndContext, at: Vec2) {
        let event = self.event(PointerPhase::Move, at);
        ctx.pointer_move(event);
    }

    /// Move in `steps` equal increments from the current position.
    pub fn move_through(&mut self, ctx: &mut DndContext, to: Vec2, steps: usize) {
        let from = self.position;
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.move_to(ctx, from.lerp(to, t));
        }
    }

    /// Release at the current position.
    pub fn release(&mut self, ctx: &mut DndContext) -> Option<StopData> {
        let event = self.event(PointerPhase::Up, self.position);
        ctx.pointer_up(event)
    }

    /// Let time pass without pointer input.
    pub fn wait(&mut self, ctx: &mut DndContext, duration: Duration) {
        self.time += duration;
        ctx.advance(self.time);
    }

    /// Press at `from`, move to `to` in `steps` increments, release.
    pub fn drag(
        &mut self,
        ctx: &mut DndContext,
        from: Vec2,
        to: Vec2,
        steps: usize,
    ) -> Option<StopData> {
        self.press(ctx, from);
        self.move_through(ctx, to, steps);
        self.release(ctx)
    }
}
