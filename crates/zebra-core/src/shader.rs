#![forbid(unsafe_code)]

//! Per-pixel compositor.
//!
//! [`ZebraShader`] combines the looping noise field, the band quantizer, the
//! gradient map and the radial mask into one RGBA value per
//! `(coordinate, frame)`:
//!
//! 1. `p = uv * scale`
//! 2. for each octave: `v += loop_noise(p, playhead) * amp; p *= 2; amp *= 0.5`
//! 3. `v /= size`
//! 4. `t = band(v)`, `color = gradient(v, t)`
//! 5. `alpha = mask(uv)`
//! 6. optional hue rotation, then emit straight-alpha RGBA
//!
//! # Determinism
//!
//! A shader is immutable after construction. Given identical inputs, every
//! call returns the same color regardless of thread or evaluation order.
//! There is no time state: the playhead arrives with each [`FrameContext`].

use std::f64::consts::TAU;

use crate::banding::{BandQuantizer, EdgeWidth};
use crate::color::{Rgba, rotate_hue};
use crate::config::{ZebraConfig, ZebraConfigError};
use crate::looping::LoopingField;
use crate::noise::{NoiseSource, Simplex3};
use crate::sampling::Uv;

// ---------------------------------------------------------------------------
// Frame context
// ---------------------------------------------------------------------------

/// Per-frame inputs supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameContext {
    /// Normalized loop position in `[0, 1)`.
    pub playhead: f64,
    /// Size of one pixel in normalized units, when the host knows it.
    ///
    /// Enables the screen-space band edge width. `None` selects the fixed
    /// fallback width.
    pub texel: Option<(f64, f64)>,
}

impl FrameContext {
    /// Context without a pixel footprint.
    #[inline]
    pub const fn at(playhead: f64) -> Self {
        Self {
            playhead,
            texel: None,
        }
    }

    /// Context for a raster of `width x height` pixels.
    #[inline]
    pub fn for_raster(playhead: f64, width: u32, height: u32) -> Self {
        let texel = (width > 0 && height > 0)
            .then(|| (1.0 / f64::from(width), 1.0 / f64::from(height)));
        Self { playhead, texel }
    }
}

// ---------------------------------------------------------------------------
// Shader
// ---------------------------------------------------------------------------

/// Intermediate values of one evaluation, exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeSample {
    /// Normalized field value.
    pub value: f64,
    /// Band factor in `[0, 1]`.
    pub band: f64,
    pub color: Rgba,
}

/// Validated, immutable compositor.
#[derive(Debug, Clone)]
pub struct ZebraShader<N: NoiseSource = Simplex3> {
    config: ZebraConfig,
    noise: N,
    field: LoopingField,
    bands: BandQuantizer,
}

impl ZebraShader<Simplex3> {
    /// Build a shader with the reference noise primitive.
    pub fn new(config: ZebraConfig) -> Result<Self, Vec<ZebraConfigError>> {
        Self::with_noise(config, Simplex3)
    }
}

impl Default for ZebraShader<Simplex3> {
    fn default() -> Self {
        match Self::new(ZebraConfig::default()) {
            Ok(shader) => shader,
            Err(errors) => unreachable!("default zebra config rejected: {errors:?}"),
        }
    }
}

impl<N: NoiseSource> ZebraShader<N> {
    /// Build a shader over an arbitrary noise source.
    pub fn with_noise(config: ZebraConfig, noise: N) -> Result<Self, Vec<ZebraConfigError>> {
        config.validate()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(config = %config.summary_short(), "zebra shader ready");

        Ok(Self {
            field: LoopingField::new(config.loop_scale, config.offset),
            bands: BandQuantizer::new(config.density),
            noise,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &ZebraConfig {
        &self.config
    }

    #[inline]
    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Normalized field value `v` at `uv`.
    pub fn field_value(&self, uv: Uv, playhead: f64) -> f64 {
        let mut px = uv.u * self.config.scale;
        let mut py = uv.v * self.config.scale;
        let mut amp = self.config.amplitude;
        let mut v = 0.0;
        for _ in 0..self.config.octaves {
            v += self.field.sample(&self.noise, px, py, playhead) * amp;
            px *= 2.0;
            py *= 2.0;
            amp *= 0.5;
        }
        v / self.config.size
    }

    /// Edge width for the band at `uv`, given its field value.
    ///
    /// With a pixel footprint, `fwidth` of the band signal is estimated with
    /// forward differences one pixel right and one pixel up.
    pub fn edge_width(&self, uv: Uv, value: f64, ctx: &FrameContext) -> EdgeWidth {
        match ctx.texel {
            Some((dx, dy)) => {
                let s = self.bands.signal(value);
                let sx = self
                    .bands
                    .signal(self.field_value(uv.offset(dx, 0.0), ctx.playhead));
                let sy = self
                    .bands
                    .signal(self.field_value(uv.offset(0.0, dy), ctx.playhead));
                EdgeWidth::ScreenSpace((sx - s).abs() + (sy - s).abs())
            }
            None => EdgeWidth::Fixed,
        }
    }

    /// Hue rotation angle for a playhead, or `None` when hue is untouched.
    #[inline]
    pub fn hue_angle(&self, playhead: f64) -> Option<f64> {
        self.config
            .hue_enabled()
            .then(|| self.config.hue_shift + TAU * self.config.hue_spin * playhead)
    }

    /// Evaluate the pipeline and keep the intermediates.
    pub fn sample(&self, uv: Uv, ctx: &FrameContext) -> ShadeSample {
        let value = self.field_value(uv, ctx.playhead);
        let band = self.bands.band(value, self.edge_width(uv, value, ctx));
        let mut rgb = self.config.gradient.color_at(value, band);
        if let Some(angle) = self.hue_angle(ctx.playhead) {
            rgb = rotate_hue(rgb, angle);
        }
        let alpha = self.config.mask.alpha(uv.u, uv.v);
        ShadeSample {
            value,
            band,
            color: Rgba::new(rgb, alpha),
        }
    }

    /// Straight-alpha RGBA at `uv` for the given frame.
    #[inline]
    pub fn shade(&self, uv: Uv, ctx: &FrameContext) -> Rgba {
        self.sample(uv, ctx).color
    }
}
