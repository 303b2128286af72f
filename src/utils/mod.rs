//! # Utilities Module
//!
//! Angle helpers and grid flood fill shared by the generation pipeline.

pub mod math;
pub mod pathfinding;

pub use self::math::*;
pub use self::pathfinding::*;
