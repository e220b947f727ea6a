//! azui Core
//!
//! This crate contains the shared foundation of the azui interaction toolkit:
//! hashing collections, vector math, page-space geometry, logging and profiling.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
