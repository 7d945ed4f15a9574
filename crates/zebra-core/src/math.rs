#![forbid(unsafe_code)]

//! Scalar helpers with GLSL semantics.

/// Hermite interpolation between two edges.
///
/// Matches GLSL `smoothstep`, including reversed edges (`edge0 > edge1`),
/// which yields a falling ramp. Equal edges degrade to a hard step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend `a + (b - a) * t` (GLSL `mix`). `t` is not clamped.
#[inline]
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
