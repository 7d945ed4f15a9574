#![forbid(unsafe_code)]

//! Looping banded-noise texture core.
//!
//! Computes the color of one pixel of a seamlessly looping animated texture:
//! a simplex noise field crossfaded over time, quantized into soft "zebra"
//! bands, mapped through a multi-stop gradient and faded with a radial
//! alpha mask.
//!
//! The crate is pure computation. Frame scheduling, canvases, compositing
//! over a background and image output belong to the host (see the
//! `zebra-render` crate).
//!
//! ```
//! use zebra_core::{FrameContext, Uv, ZebraConfig, ZebraShader};
//!
//! let shader = ZebraShader::new(ZebraConfig::default()).expect("default config is valid");
//! let rgba = shader.shade(Uv::new(0.5, 0.5), &FrameContext::at(0.0));
//! assert_eq!(rgba.a, 1.0);
//! ```
//!
//! # Feature flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`ZebraConfig`] and its parts.
//! - `tracing`: configuration-time events through the `tracing` facade.

pub mod banding;
pub mod color;
pub mod config;
pub mod gradient;
pub mod looping;
pub mod mask;
pub mod math;
pub mod noise;
pub mod sampling;
pub mod shader;

pub use banding::{BandQuantizer, EdgeWidth, FALLBACK_FWIDTH, zebra_band};
pub use color::{PackedRgba, Rgb, Rgba, rotate_hue};
pub use config::{ZebraConfig, ZebraConfigError, ZebraConfigParse};
pub use gradient::{GradientDefect, GradientMap};
pub use looping::{LoopingField, loop_noise};
pub use mask::RadialMask;
pub use noise::{NoiseSource, Simplex3, simplex3};
pub use sampling::{Uv, UvGrid, pixel_to_uv};
pub use shader::{FrameContext, ShadeSample, ZebraShader};
