/// Fast vector math using SIMD-accelerated `glam` types.
///
/// Pointer positions, drag deltas and element offsets are all [`Vec2`] in
/// page space (origin at the document's top-left corner, y growing downwards).
///
/// # Examples
///
/// ```
/// use azui_core::math::Vec2;
///
/// let pressed = Vec2::new(10.0, 20.0);
/// let current = Vec2::new(25.0, 20.0);
/// assert_eq!(current - pressed, Vec2::new(15.0, 0.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::{Vec2, vec2};

/// Squared euclidean distance between two points.
///
/// Used for nearest-item searches, where only the ordering of distances matters.
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}
