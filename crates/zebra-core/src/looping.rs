#![forbid(unsafe_code)]

//! Time-periodic noise built from two offset simplex samples.
//!
//! A linear crossfade between the noise at `current` and at
//! `current - loop_scale` makes the field periodic in the playhead: at the
//! start the first sample carries all the weight, at the end the second
//! sample sits at the same time coordinate the first one started from.
//! The loop is seamless by construction, with no special case at the wrap.

use crate::noise::NoiseSource;

/// Evaluate the looping noise field at `(px, py)`.
///
/// - `playhead`: normalized loop position in `[0, 1)`.
/// - `loop_scale`: temporal length of the loop in noise-space units. Must be
///   non-zero; a zero value is a configuration error rejected long before
///   this is called.
/// - `offset`: phase offset along the noise time axis.
#[inline]
pub fn loop_noise<N: NoiseSource + ?Sized>(
    noise: &N,
    px: f64,
    py: f64,
    playhead: f64,
    loop_scale: f64,
    offset: f64,
) -> f64 {
    let duration = loop_scale;
    let current = playhead * loop_scale;
    let ahead = noise.sample(px, py, current + offset);
    let behind = noise.sample(px, py, current - duration + offset);
    ((duration - current) * ahead + current * behind) / duration
}

/// Loop parameters bundled for repeated evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopingField {
    /// Temporal length of the loop in noise-space units.
    pub loop_scale: f64,
    /// Phase offset along the noise time axis.
    pub offset: f64,
}

impl LoopingField {
    /// Reference loop: one noise unit long, starting at time 60.
    pub const REFERENCE: Self = Self {
        loop_scale: 1.0,
        offset: 60.0,
    };

    #[inline]
    pub const fn new(loop_scale: f64, offset: f64) -> Self {
        Self { loop_scale, offset }
    }

    /// Sample the field at `(px, py)` for the given playhead.
    #[inline]
    pub fn sample<N: NoiseSource + ?Sized>(&self, noise: &N, px: f64, py: f64, playhead: f64) -> f64 {
        loop_noise(noise, px, py, playhead, self.loop_scale, self.offset)
    }
}

impl Default for LoopingField {
    fn default() -> Self {
        Self::REFERENCE
    }
}
