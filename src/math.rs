/*
 * Math Module
 *
 * Small vector helpers shared by the flock aggregates and the steering rules.
 * Everything works on glam's Vec3. Normalization follows game-engine semantics:
 * vectors whose magnitude is at or below NORMALIZE_EPSILON collapse to zero
 * instead of producing NaN.
 */

use glam::Vec3;

/// Magnitude at or below which a vector is treated as having no direction.
pub const NORMALIZE_EPSILON: f32 = 1.0e-5;

/// Normalize `v`, or return `Vec3::ZERO` if it is too short to carry a direction.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > NORMALIZE_EPSILON {
        v / length
    } else {
        Vec3::ZERO
    }
}

/// The weight a strength `s` contributes: `s / (s + 1)`.
///
/// Approaches 1 as `s` grows but never reaches it. Callers guarantee `s >= 0`.
#[inline]
pub fn saturating_weight(strength: f32) -> f32 {
    strength / (strength + 1.0)
}

/// Linear interpolation with `t` clamped to `[0, 1]` first.
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns 0 when the range is empty.
#[inline]
pub fn inverse_lerp_clamped(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() <= f32::EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// True when every component is finite.
#[inline]
pub fn is_finite_vec(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}
