//! Test utilities for azui.
//!
//! - [`SortableFixture`] - builds absolutely positioned sortable lists with
//!   fixed item geometry
//! - [`GestureDriver`] - feeds press/move/release sequences with monotonic
//!   timestamps
//! - [`HookRecorder`] - hooks that record their calls and return a
//!   configurable [`Decision`](azui_dnd::Decision)
//!
//! # Example
//!
//! ```rust
//! use azui_core::math::Vec2;
//! use azui_dnd::SortableOptions;
//! use azui_test_utils::{GestureDriver, HookRecorder, SortableFixture};
//!
//! let recorder = HookRecorder::new();
//! let mut fixture = SortableFixture::single(3, recorder.wire(SortableOptions::default()));
//! let mut driver = GestureDriver::new();
//!
//! let first = fixture.item(0, 0);
//! driver.drag(&mut fixture.ctx, Vec2::new(50.0, 50.0), Vec2::new(281.0, 50.0), 7);
//!
//! assert_eq!(fixture.order(0).last(), Some(&first));
//! assert_eq!(recorder.count("stop"), 1);
//! ```

pub mod fixture;
pub mod gesture;
pub mod recorder;

pub use fixture::{FixtureBuilder, SortableFixture};
pub use gesture::GestureDriver;
pub use recorder::{HookCall, HookRecorder};
