#![forbid(unsafe_code)]

//! Shader configuration: parameter set, palette, mask and loop tunables.
//!
//! Every knob has a reference default. A [`ZebraConfig`] is validated once,
//! when a [`ZebraShader`](crate::shader::ZebraShader) is built. Invalid
//! parameter sets are rejected there, so the per-pixel path has no error
//! cases.
//!
//! Environment overrides (all optional):
//! - `ZEBRA_SCALE` / `ZEBRA_SIZE` / `ZEBRA_DENSITY` (f64)
//! - `ZEBRA_LOOP_SCALE` / `ZEBRA_OFFSET` / `ZEBRA_AMPLITUDE` (f64)
//! - `ZEBRA_OCTAVES` (integer, 1..=8)
//! - `ZEBRA_HUE_SHIFT` (radians) / `ZEBRA_HUE_SPIN` (whole turns per loop)

use core::fmt;
use std::env;

use crate::gradient::GradientMap;
use crate::mask::RadialMask;

pub const ENV_SCALE: &str = "ZEBRA_SCALE";
pub const ENV_SIZE: &str = "ZEBRA_SIZE";
pub const ENV_DENSITY: &str = "ZEBRA_DENSITY";
pub const ENV_LOOP_SCALE: &str = "ZEBRA_LOOP_SCALE";
pub const ENV_OFFSET: &str = "ZEBRA_OFFSET";
pub const ENV_AMPLITUDE: &str = "ZEBRA_AMPLITUDE";
pub const ENV_OCTAVES: &str = "ZEBRA_OCTAVES";
pub const ENV_HUE_SHIFT: &str = "ZEBRA_HUE_SHIFT";
pub const ENV_HUE_SPIN: &str = "ZEBRA_HUE_SPIN";

/// Upper bound on accumulated octaves.
pub const MAX_OCTAVES: u32 = 8;

/// Complete, immutable configuration for one render.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZebraConfig {
    /// Spatial frequency: normalized coordinates are multiplied by this.
    pub scale: f64,
    /// Value normalization: the accumulated noise is divided by this.
    pub size: f64,
    /// Bands per unit of field value.
    pub density: f64,
    /// Loop length in noise-space time units.
    pub loop_scale: f64,
    /// Phase offset along the noise time axis.
    pub offset: f64,
    /// Weight of the first octave.
    pub amplitude: f64,
    /// Number of accumulated octaves (lacunarity 2, gain 0.5).
    pub octaves: u32,
    pub gradient: GradientMap,
    pub mask: RadialMask,
    /// Static hue rotation in radians.
    pub hue_shift: f64,
    /// Full hue turns per animation loop; integral so the loop stays seamless.
    pub hue_spin: f64,
}

impl Default for ZebraConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            size: 0.3,
            density: 2.0,
            loop_scale: 1.0,
            offset: 60.0,
            amplitude: 0.5,
            octaves: 1,
            gradient: GradientMap::default(),
            mask: RadialMask::default(),
            hue_shift: 0.0,
            hue_spin: 0.0,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ZebraConfigParse {
    pub config: ZebraConfig,
    pub errors: Vec<ZebraConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZebraConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ZebraConfigError {
    pub fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ZebraConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ZebraConfigError {}

impl ZebraConfig {
    /// Defaults with environment overrides applied, plus parse diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ZebraConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Apply overrides from `get` on top of `self`.
    #[must_use]
    pub fn with_overrides<F>(self, get: F) -> ZebraConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        apply_overrides(self, get)
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ZebraConfigError>> {
        let mut errors = Vec::new();
        validate_finite("scale", self.scale, &mut errors);
        validate_nonzero("size", self.size, &mut errors);
        validate_positive("density", self.density, &mut errors);
        validate_nonzero("loop_scale", self.loop_scale, &mut errors);
        validate_finite("offset", self.offset, &mut errors);
        validate_finite("amplitude", self.amplitude, &mut errors);
        if !(1..=MAX_OCTAVES).contains(&self.octaves) {
            errors.push(ZebraConfigError::new(
                "octaves",
                self.octaves.to_string(),
                format!("expected 1..={MAX_OCTAVES}"),
            ));
        }
        if let Err(defect) = self.gradient.check() {
            errors.push(ZebraConfigError::new(
                "gradient",
                format!(
                    "{} stops / {} thresholds",
                    self.gradient.stops().len(),
                    self.gradient.thresholds().len()
                ),
                defect.to_string(),
            ));
        }
        self.validate_mask(&mut errors);
        validate_finite("hue_shift", self.hue_shift, &mut errors);
        if !self.hue_spin.is_finite() || self.hue_spin.fract() != 0.0 {
            errors.push(ZebraConfigError::new(
                "hue_spin",
                self.hue_spin.to_string(),
                "expected a whole number of turns per loop",
            ));
        }

        #[cfg(feature = "tracing")]
        if !errors.is_empty() {
            tracing::warn!(count = errors.len(), "zebra config rejected");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_mask(&self, errors: &mut Vec<ZebraConfigError>) {
        let m = &self.mask;
        validate_finite("mask.center.x", m.center.0, errors);
        validate_finite("mask.center.y", m.center.1, errors);
        validate_finite("mask.inner", m.inner, errors);
        validate_finite("mask.outer", m.outer, errors);
        if m.inner.is_finite() && m.outer.is_finite() && m.inner >= m.outer {
            errors.push(ZebraConfigError::new(
                "mask",
                format!("inner={} outer={}", m.inner, m.outer),
                "inner radius must be smaller than outer radius",
            ));
        }
    }

    /// True when the pipeline applies a hue rotation at all.
    #[inline]
    pub fn hue_enabled(&self) -> bool {
        self.hue_shift != 0.0 || self.hue_spin != 0.0
    }

    /// Short human-readable summary for logs.
    #[must_use]
    pub fn summary_short(&self) -> String {
        format!(
            "zebra: scale={} size={} density={} octaves={} loop={}@{}",
            self.scale, self.size, self.density, self.octaves, self.loop_scale, self.offset
        )
    }
}

fn from_env_with<F>(get: F) -> ZebraConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    apply_overrides(ZebraConfig::default(), get)
}

fn apply_overrides<F>(mut config: ZebraConfig, mut get: F) -> ZebraConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut errors = Vec::new();

    let f64_fields: [(&str, &'static str, &mut f64); 8] = [
        (ENV_SCALE, "scale", &mut config.scale),
        (ENV_SIZE, "size", &mut config.size),
        (ENV_DENSITY, "density", &mut config.density),
        (ENV_LOOP_SCALE, "loop_scale", &mut config.loop_scale),
        (ENV_OFFSET, "offset", &mut config.offset),
        (ENV_AMPLITUDE, "amplitude", &mut config.amplitude),
        (ENV_HUE_SHIFT, "hue_shift", &mut config.hue_shift),
        (ENV_HUE_SPIN, "hue_spin", &mut config.hue_spin),
    ];
    for (key, field, slot) in f64_fields {
        if let Some(value) = get(key) {
            match parse_f64(&value) {
                Some(parsed) => *slot = parsed,
                None => errors.push(ZebraConfigError::new(field, value, "expected number")),
            }
        }
    }

    if let Some(value) = get(ENV_OCTAVES) {
        match value.trim().parse::<u32>() {
            Ok(parsed) => config.octaves = parsed,
            Err(_) => errors.push(ZebraConfigError::new(
                "octaves",
                value,
                "expected positive integer",
            )),
        }
    }

    ZebraConfigParse { config, errors }
}

fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn validate_finite(field: &'static str, value: f64, errors: &mut Vec<ZebraConfigError>) {
    if !value.is_finite() {
        errors.push(ZebraConfigError::new(
            field,
            value.to_string(),
            "must be finite",
        ));
    }
}

fn validate_nonzero(field: &'static str, value: f64, errors: &mut Vec<ZebraConfigError>) {
    if !value.is_finite() || value == 0.0 {
        errors.push(ZebraConfigError::new(
            field,
            value.to_string(),
            "must be finite and non-zero",
        ));
    }
}

fn validate_positive(field: &'static str, value: f64, errors: &mut Vec<ZebraConfigError>) {
    if !value.is_finite() || value <= 0.0 {
        errors.push(ZebraConfigError::new(
            field,
            value.to_string(),
            "must be finite and > 0",
        ));
    }
}
