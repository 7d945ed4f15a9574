#![forbid(unsafe_code)]

//! Radial opacity fade around the canvas center.

use crate::math::smoothstep;

/// Smooth inverse ramp on distance from `center`: opaque inside `inner`,
/// transparent beyond `outer`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadialMask {
    pub center: (f64, f64),
    pub inner: f64,
    pub outer: f64,
}

impl RadialMask {
    pub const REFERENCE: Self = Self {
        center: (0.5, 0.5),
        inner: 0.75,
        outer: 1.75,
    };

    #[inline]
    pub const fn new(center: (f64, f64), inner: f64, outer: f64) -> Self {
        Self {
            center,
            inner,
            outer,
        }
    }

    /// Euclidean distance from the mask center.
    #[inline]
    pub fn distance(&self, u: f64, v: f64) -> f64 {
        (u - self.center.0).hypot(v - self.center.1)
    }

    /// Alpha for a given distance from the center.
    #[inline]
    pub fn alpha_at_distance(&self, distance: f64) -> f64 {
        smoothstep(self.outer, self.inner, distance)
    }

    /// Alpha at normalized coordinate `(u, v)`.
    #[inline]
    pub fn alpha(&self, u: f64, v: f64) -> f64 {
        self.alpha_at_distance(self.distance(u, v))
    }
}

impl Default for RadialMask {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_edges() {
        let m = RadialMask::default();
        assert_eq!(m.alpha_at_distance(0.0), 1.0);
        assert_eq!(m.alpha_at_distance(0.75), 1.0);
        assert_eq!(m.alpha_at_distance(1.75), 0.0);
        assert_eq!(m.alpha_at_distance(3.0), 0.0);
        assert!((m.alpha_at_distance(1.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn monotonic_between_edges() {
        let m = RadialMask::default();
        let mut prev = m.alpha_at_distance(0.75);
        for i in 1..=1000 {
            let d = 0.75 + i as f64 * 0.001;
            let a = m.alpha_at_distance(d);
            assert!(a <= prev, "alpha rose at d={d}");
            prev = a;
        }
    }

    #[test]
    fn whole_unit_square_is_opaque_by_default() {
        // The farthest corner is sqrt(0.5) ~= 0.707 from the center.
        let m = RadialMask::default();
        assert_eq!(m.alpha(0.0, 0.0), 1.0);
        assert_eq!(m.alpha(1.0, 1.0), 1.0);
        assert_eq!(m.alpha(0.5, 0.5), 1.0);
    }

    #[test]
    fn tight_mask_clears_corners() {
        let m = RadialMask::new((0.5, 0.5), 0.1, 0.3);
        assert_eq!(m.alpha(0.5, 0.5), 1.0);
        assert_eq!(m.alpha(0.0, 0.0), 0.0);
    }
}
