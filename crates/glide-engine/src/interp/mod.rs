//! Interpolation primitives.
//!
//! Pure functions over any value that can be added, subtracted and scaled by an
//! `f64`. Alpha is never clamped here; values outside `[0, 1]` extrapolate.

use core::ops::{Add, Mul, Sub};

/// Algebra required by the interpolation functions.
///
/// Implemented automatically for every type providing `+`, `-` and `* f64`,
/// which covers `f64` itself as well as [`Vec2`](crate::coords::Vec2) and
/// [`Color`](crate::coords::Color).
pub trait Interpolate:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
}

impl<T> Interpolate for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>
{
}

/// `start + (goal - start) * alpha`.
#[inline]
pub fn linear<T: Interpolate>(start: T, goal: T, alpha: f64) -> T {
    start + (goal - start) * alpha
}

/// Quadratic Bézier through `p0`, control point `p1`, ending at `p2`.
#[inline]
pub fn quadratic_curve<T: Interpolate>(p0: T, p1: T, p2: T, alpha: f64) -> T {
    let inv = 1.0 - alpha;
    p0 * (inv * inv) + p1 * (2.0 * inv * alpha) + p2 * (alpha * alpha)
}

/// Cubic Bézier through `p0`, control points `p1` and `p2`, ending at `p3`.
#[inline]
pub fn cubic_curve<T: Interpolate>(p0: T, p1: T, p2: T, p3: T, alpha: f64) -> T {
    let inv = 1.0 - alpha;
    let inv2 = inv * inv;
    let alpha2 = alpha * alpha;
    p0 * (inv2 * inv) + p1 * (3.0 * inv2 * alpha) + p2 * (3.0 * inv * alpha2) + p3 * (alpha2 * alpha)
}
