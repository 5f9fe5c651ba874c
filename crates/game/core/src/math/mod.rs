//! Deterministic numeric primitives shared by state and dispatch.
//!
//! Everything here is integer-only: 24.8 fixed point, integer points and a
//! table-driven sine.
mod fixed;
mod point;
pub mod rotation;

pub use fixed::{Fixed, FixedRange};
pub use point::{FixedPoint, Point, PointOffset};
