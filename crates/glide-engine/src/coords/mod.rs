//! Value types that satisfy the interpolation algebra.
//!
//! Both are plain `f64` aggregates so they can be fed straight into
//! [`crate::interp`] with the alpha produced by a clock.

mod color;
mod vec2;

pub use color::Color;
pub use vec2::Vec2;
