#![forbid(unsafe_code)]

//! Zebra banding: a soft 0/1 stripe pattern over the field value.
//!
//! The field value `v` drives a cosine with `density` periods per unit of
//! `v`. A smooth threshold at zero turns the cosine into stripes. The
//! threshold width follows the screen-space rate of change of the signal
//! (`fwidth`), so edges stay about one pixel wide at any resolution.
//!
//! A CPU host has no hardware derivatives. The compositor estimates
//! `fwidth` from neighbouring pixels when it knows the pixel footprint
//! ([`EdgeWidth::ScreenSpace`]). Otherwise it falls back to a fixed width
//! ([`EdgeWidth::Fixed`]), where edge sharpness depends on the value
//! gradient instead of the resolution.

use crate::math::smoothstep;
use std::f64::consts::TAU;

/// `fwidth` used when no screen-space estimate is available.
///
/// Roughly what a 1600px canvas measures for the reference parameters.
pub const FALLBACK_FWIDTH: f64 = 0.02;

/// Transition width selection for the band edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EdgeWidth {
    /// Screen-space `|ds/dx| + |ds/dy|` of the band signal.
    ScreenSpace(f64),
    /// Fixed transition width ([`FALLBACK_FWIDTH`]).
    #[default]
    Fixed,
}

impl EdgeWidth {
    /// Effective `fwidth`, falling back to the fixed width when the
    /// screen-space estimate is zero or not finite (flat or degenerate field).
    #[inline]
    pub fn resolve(self) -> f64 {
        match self {
            Self::ScreenSpace(w) if w.is_finite() && w > f64::EPSILON => w,
            _ => FALLBACK_FWIDTH,
        }
    }
}

/// Periodic band signal `-cos(v * density * 2π)` in `[-1, 1]`.
#[inline]
pub fn band_signal(v: f64, density: f64) -> f64 {
    let period = 1.0 / density;
    -(v / period * TAU).cos()
}

/// Quantize `v` into a smoothed stripe factor in `[0, 1]`.
///
/// `density` is the number of bands per unit of `v` and must be positive.
#[inline]
pub fn zebra_band(v: f64, density: f64, edge: EdgeWidth) -> f64 {
    let period = 1.0 / density;
    let s = band_signal(v, density);
    smoothstep(0.0, 0.1 * period, 0.1 * s / edge.resolve())
}

/// Band quantizer with a fixed density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandQuantizer {
    density: f64,
}

impl BandQuantizer {
    #[inline]
    pub const fn new(density: f64) -> Self {
        Self { density }
    }

    #[inline]
    pub const fn density(&self) -> f64 {
        self.density
    }

    /// Band period in units of `v`.
    #[inline]
    pub fn period(&self) -> f64 {
        1.0 / self.density
    }

    #[inline]
    pub fn signal(&self, v: f64) -> f64 {
        band_signal(v, self.density)
    }

    #[inline]
    pub fn band(&self, v: f64, edge: EdgeWidth) -> f64 {
        zebra_band(v, self.density, edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_centers_are_solid() {
        // density 2: period 0.5, signal peaks (+1) at v = 0.25 and troughs at 0.
        assert_eq!(zebra_band(0.25, 2.0, EdgeWidth::Fixed), 1.0);
        assert_eq!(zebra_band(0.0, 2.0, EdgeWidth::Fixed), 0.0);
        assert_eq!(zebra_band(0.5, 2.0, EdgeWidth::Fixed), 0.0);
        assert_eq!(zebra_band(0.75, 2.0, EdgeWidth::Fixed), 1.0);
    }

    #[test]
    fn signal_is_negative_cosine() {
        assert!((band_signal(0.0, 2.0) + 1.0).abs() < 1e-12);
        assert!((band_signal(0.25, 2.0) - 1.0).abs() < 1e-12);
        assert!(band_signal(0.125, 2.0).abs() < 1e-12);
    }

    #[test]
    fn edge_is_soft_not_hard() {
        // Walk across the rising edge near v = 0.125 (density 2) and expect
        // intermediate values, not a jump from 0 to 1.
        let mut saw_partial = false;
        let mut v = 0.12;
        while v < 0.13 {
            let b = zebra_band(v, 2.0, EdgeWidth::Fixed);
            if b > 0.0 && b < 1.0 {
                saw_partial = true;
            }
            v += 0.000_01;
        }
        assert!(saw_partial);
    }

    #[test]
    fn wider_fwidth_widens_the_edge() {
        let v = 0.1252;
        let sharp = zebra_band(v, 2.0, EdgeWidth::ScreenSpace(0.001));
        let soft = zebra_band(v, 2.0, EdgeWidth::ScreenSpace(0.5));
        assert!(sharp > soft, "sharp={sharp} soft={soft}");
    }

    #[test]
    fn degenerate_screen_space_width_falls_back() {
        assert_eq!(EdgeWidth::ScreenSpace(0.0).resolve(), FALLBACK_FWIDTH);
        assert_eq!(EdgeWidth::ScreenSpace(f64::NAN).resolve(), FALLBACK_FWIDTH);
        assert_eq!(EdgeWidth::ScreenSpace(f64::INFINITY).resolve(), FALLBACK_FWIDTH);
        assert_eq!(EdgeWidth::ScreenSpace(0.3).resolve(), 0.3);
        // s = 0 with a zero derivative would be 0/0 without the fallback.
        let b = zebra_band(0.125, 2.0, EdgeWidth::ScreenSpace(0.0));
        assert!(b.is_finite());
    }

    #[test]
    fn quantizer_matches_free_function() {
        let q = BandQuantizer::new(3.0);
        assert!((q.period() - 1.0 / 3.0).abs() < 1e-15);
        for i in 0..50 {
            let v = i as f64 * 0.037 - 0.8;
            assert_eq!(q.band(v, EdgeWidth::Fixed), zebra_band(v, 3.0, EdgeWidth::Fixed));
        }
    }
}
