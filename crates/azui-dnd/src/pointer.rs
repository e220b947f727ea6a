//! Raw pointer input.

use azui_core::math::Vec2;
use std::time::Duration;

/// Input device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerDevice {
    #[default]
    Mouse,
    Touch,
}

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A raw pointer or touch event in page coordinates.
///
/// `time` is supplied by the host and only needs to be monotonic within a
/// gesture; it drives the post-adoption guard window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Vec2,
    pub device: PointerDevice,
    pub time: Duration,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, position: Vec2, time: Duration) -> Self {
        Self {
            phase,
            position,
            device: PointerDevice::Mouse,
            time,
        }
    }

    /// Build an event from a touch list, tracking the first touch point.
    ///
    /// Returns `None` when the list is empty.
    pub fn touch(phase: PointerPhase, touches: &[Vec2], time: Duration) -> Option<Self> {
        touches.first().map(|position| Self {
            phase,
            position: *position,
            device: PointerDevice::Touch,
            time,
        })
    }

    pub fn is_touch(&self) -> bool {
        self.device == PointerDevice::Touch
    }
}
