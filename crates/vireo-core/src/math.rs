//! Vector math re-exported from [`glam`].
//!
//! Widget geometry only needs 2D points and offsets, so [`Vec2`] is the type
//! that shows up everywhere; the rest of `glam` is re-exported for callers
//! that share types with a renderer.
//!
//! ```
//! use vireo_core::math::Vec2;
//!
//! let cursor = Vec2::new(10.0, 20.0);
//! let offset = Vec2::new(0.0, -5.0);
//! assert_eq!(cursor + offset, Vec2::new(10.0, 15.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::*;

/// Clamp `value` into `[min, max]` without panicking.
///
/// `f32::clamp` panics when `min > max` or either bound is NaN; widget
/// ranges come straight from callers, so this variant orders the bounds
/// first and ignores NaN bounds.
#[inline]
pub fn clamp_f32(value: f32, min: f32, max: f32) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}

/// f64 variant of [`clamp_f32`].
#[inline]
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}
