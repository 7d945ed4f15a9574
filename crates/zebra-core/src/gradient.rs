#![forbid(unsafe_code)]

//! Multi-stop gradient mapping.
//!
//! The field value selects a segment through an ascending threshold chain;
//! the band factor then blends between the two stops bounding that segment.
//! With the default four stops and thresholds `[0.25, 0.75]`:
//!
//! | field value        | blend                       |
//! |--------------------|-----------------------------|
//! | `v < 0.25`         | `mix(stop0, stop1, t)`      |
//! | `0.25 <= v < 0.75` | `mix(stop1, stop2, t)`      |
//! | `v >= 0.75`        | `mix(stop2, stop3, t)`      |
//!
//! The field value is never clamped. Values below the first threshold land
//! in the first segment and values past the last threshold land in the last.

use crate::color::Rgb;
use smallvec::{SmallVec, smallvec};

/// Default palette stops: cyan, pink, violet, amber.
pub const DEFAULT_STOPS: [Rgb; 4] = [
    Rgb::new(0.133, 0.722, 0.812),
    Rgb::new(0.941, 0.396, 0.584),
    Rgb::new(0.517, 0.368, 0.968),
    Rgb::new(0.989, 0.768, 0.098),
];

/// Default segment thresholds.
pub const DEFAULT_THRESHOLDS: [f64; 2] = [0.25, 0.75];

/// Why a gradient definition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientDefect {
    /// Fewer than two stops.
    TooFewStops,
    /// `thresholds.len() + 2 != stops.len()`.
    ThresholdCount { stops: usize, thresholds: usize },
    /// Threshold at `index` is NaN or infinite.
    NonFiniteThreshold { index: usize },
    /// Threshold at `index` is not strictly above its predecessor.
    UnorderedThreshold { index: usize },
    /// Stop at `index` has a component outside `[0, 1]` or not finite.
    StopOutOfRange { index: usize },
}

impl std::fmt::Display for GradientDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewStops => write!(f, "gradient needs at least two stops"),
            Self::ThresholdCount { stops, thresholds } => write!(
                f,
                "{stops} stops need {} thresholds, got {thresholds}",
                stops.saturating_sub(2)
            ),
            Self::NonFiniteThreshold { index } => write!(f, "threshold {index} is not finite"),
            Self::UnorderedThreshold { index } => {
                write!(f, "threshold {index} must be greater than threshold {}", index - 1)
            }
            Self::StopOutOfRange { index } => {
                write!(f, "stop {index} has a component outside [0, 1]")
            }
        }
    }
}

/// Ordered color stops plus the thresholds separating their segments.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientMap {
    stops: SmallVec<[Rgb; 4]>,
    thresholds: SmallVec<[f64; 2]>,
}

impl GradientMap {
    /// Build a gradient, checking the stop/threshold invariants.
    pub fn new(stops: &[Rgb], thresholds: &[f64]) -> Result<Self, GradientDefect> {
        let map = Self {
            stops: SmallVec::from_slice(stops),
            thresholds: SmallVec::from_slice(thresholds),
        };
        map.check()?;
        Ok(map)
    }

    /// Verify the invariants that [`GradientMap::color_at`] relies on.
    ///
    /// Deserialized maps bypass [`GradientMap::new`], so configuration
    /// validation calls this again.
    pub fn check(&self) -> Result<(), GradientDefect> {
        if self.stops.len() < 2 {
            return Err(GradientDefect::TooFewStops);
        }
        if self.thresholds.len() + 2 != self.stops.len() {
            return Err(GradientDefect::ThresholdCount {
                stops: self.stops.len(),
                thresholds: self.thresholds.len(),
            });
        }
        for (index, th) in self.thresholds.iter().enumerate() {
            if !th.is_finite() {
                return Err(GradientDefect::NonFiniteThreshold { index });
            }
            if index > 0 && *th <= self.thresholds[index - 1] {
                return Err(GradientDefect::UnorderedThreshold { index });
            }
        }
        if let Some(index) = self.stops.iter().position(|s| !s.is_normalized()) {
            return Err(GradientDefect::StopOutOfRange { index });
        }
        Ok(())
    }

    #[inline]
    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    #[inline]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Segment index for field value `v`: the first threshold `v` is below,
    /// or the last segment when `v` clears them all. NaN falls through to
    /// the last segment, like the `else` arm of a comparison chain.
    #[inline]
    pub fn segment(&self, v: f64) -> usize {
        self.thresholds
            .iter()
            .position(|&th| v < th)
            .unwrap_or(self.thresholds.len())
    }

    /// Color for field value `v` and band factor `t`.
    #[inline]
    pub fn color_at(&self, v: f64, t: f64) -> Rgb {
        let k = self.segment(v);
        match (self.stops.get(k), self.stops.get(k + 1)) {
            (Some(a), Some(b)) => a.lerp(*b, t),
            // Unreachable for a checked map; keep the last stop rather than panic.
            _ => self.stops.last().copied().unwrap_or_default(),
        }
    }
}

impl Default for GradientMap {
    fn default() -> Self {
        Self {
            stops: smallvec![
                DEFAULT_STOPS[0],
                DEFAULT_STOPS[1],
                DEFAULT_STOPS[2],
                DEFAULT_STOPS[3]
            ],
            thresholds: smallvec![DEFAULT_THRESHOLDS[0], DEFAULT_THRESHOLDS[1]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-12 && (a.g - b.g).abs() < 1e-12 && (a.b - b.b).abs() < 1e-12
    }

    #[test]
    fn default_has_four_stops_three_segments() {
        let g = GradientMap::default();
        assert_eq!(g.stops().len(), 4);
        assert_eq!(g.thresholds(), &[0.25, 0.75]);
        assert!(g.check().is_ok());
    }

    #[test]
    fn range_coverage_at_reference_points() {
        let g = GradientMap::default();
        let [s0, s1, s2, s3] = DEFAULT_STOPS;
        // v = 0: first segment, stop0 at t = 0 and stop1 at t = 1.
        assert!(close(g.color_at(0.0, 0.0), s0));
        assert!(close(g.color_at(0.0, 1.0), s1));
        // v = 0.25 is the first value of the middle segment.
        assert_eq!(g.segment(0.25), 1);
        assert_eq!(g.segment(0.25 - 1e-12), 0);
        assert!(close(g.color_at(0.25, 0.0), s1));
        // v = 0.75 is the first value of the last segment.
        assert_eq!(g.segment(0.75), 2);
        assert_eq!(g.segment(0.75 - 1e-12), 1);
        assert!(close(g.color_at(0.75, 0.0), s2));
        // v = 1 with t near 1 is stop3-dominant.
        let c = g.color_at(1.0, 0.99);
        assert!((c.r - s3.r).abs() < 0.01 && (c.b - s3.b).abs() < 0.01);
    }

    #[test]
    fn out_of_range_values_use_outer_segments() {
        let g = GradientMap::default();
        assert_eq!(g.segment(-5.0), 0);
        assert_eq!(g.segment(42.0), 2);
        assert_eq!(g.segment(f64::NAN), 2);
        assert_eq!(g.segment(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn midpoint_blend() {
        let g = GradientMap::default();
        let [_, s1, s2, _] = DEFAULT_STOPS;
        assert!(close(g.color_at(0.5, 0.5), s1.lerp(s2, 0.5)));
    }

    #[test]
    fn custom_two_stop_gradient_has_no_thresholds() {
        let g = GradientMap::new(&[Rgb::BLACK, Rgb::WHITE], &[]).unwrap();
        assert_eq!(g.segment(-100.0), 0);
        assert_eq!(g.segment(100.0), 0);
        assert!(close(g.color_at(3.0, 0.5), Rgb::new(0.5, 0.5, 0.5)));
    }

    #[test]
    fn rejects_bad_definitions() {
        let stops = DEFAULT_STOPS;
        assert_eq!(
            GradientMap::new(&stops[..1], &[]),
            Err(GradientDefect::TooFewStops)
        );
        assert_eq!(
            GradientMap::new(&stops, &[0.5]),
            Err(GradientDefect::ThresholdCount {
                stops: 4,
                thresholds: 1
            })
        );
        assert_eq!(
            GradientMap::new(&stops, &[0.75, 0.25]),
            Err(GradientDefect::UnorderedThreshold { index: 1 })
        );
        assert_eq!(
            GradientMap::new(&stops, &[0.25, f64::NAN]),
            Err(GradientDefect::NonFiniteThreshold { index: 1 })
        );
        assert_eq!(
            GradientMap::new(&[Rgb::BLACK, Rgb::new(1.5, 0.0, 0.0)], &[]),
            Err(GradientDefect::StopOutOfRange { index: 1 })
        );
    }

    #[test]
    fn defect_messages_name_the_problem() {
        let msg = GradientDefect::ThresholdCount {
            stops: 4,
            thresholds: 1,
        }
        .to_string();
        assert!(msg.contains("2 thresholds"), "{msg}");
    }
}
