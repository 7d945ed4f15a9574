#![forbid(unsafe_code)]

//! Color types: floating-point shading colors and packed 8-bit output pixels.

use crate::math::mix;

/// Linear RGB color with components nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Component-wise `mix(self, other, t)`. `t` is not clamped.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            r: mix(self.r, other.r, t),
            g: mix(self.g, other.g, t),
            b: mix(self.b, other.b, t),
        }
    }

    #[inline]
    pub fn clamp01(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// True when every component is finite and inside `[0, 1]`.
    #[inline]
    pub fn is_normalized(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Quantize to 8-bit channels (rounded, clamped).
    #[inline]
    pub fn to_u8(self) -> (u8, u8, u8) {
        (unit_to_u8(self.r), unit_to_u8(self.g), unit_to_u8(self.b))
    }

    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::from_u8(r, g, b))
            }
            _ => None,
        }
    }
}

/// Straight (non-premultiplied) RGBA shading output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    #[inline]
    pub const fn new(rgb: Rgb, a: f64) -> Self {
        Self { rgb, a }
    }

    /// Source-over composite onto an opaque background.
    #[inline]
    pub fn over(self, background: Rgb) -> Rgb {
        let a = self.a.clamp(0.0, 1.0);
        background.lerp(self.rgb, a)
    }
}

#[inline]
fn unit_to_u8(c: f64) -> u8 {
    // NaN clamps to 0 via the saturating float-to-int cast.
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// 8-bit RGBA pixel packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = Self(0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }
}

impl From<Rgb> for PackedRgba {
    fn from(c: Rgb) -> Self {
        let (r, g, b) = c.to_u8();
        Self::rgb(r, g, b)
    }
}

/// Rotate the hue of `rgb` by `angle` radians.
///
/// YIQ-style rotation around the luma axis. Luma weights are
/// `(0.299, 0.587, 0.114)`; the result is clamped to `[0, 1]`. The matrix at
/// `angle = 0` is only approximately the identity, so callers that want an
/// untouched color should skip the call rather than pass zero.
pub fn rotate_hue(rgb: Rgb, angle: f64) -> Rgb {
    const LUMA: [f64; 3] = [0.299, 0.587, 0.114];
    const COS: [[f64; 3]; 3] = [
        [0.701, -0.587, -0.114],
        [-0.299, 0.413, -0.114],
        [-0.300, -0.588, 0.886],
    ];
    const SIN: [[f64; 3]; 3] = [
        [0.168, 0.330, -0.497],
        [-0.328, 0.035, 0.292],
        [1.250, -1.050, -0.203],
    ];

    let (s, c) = angle.sin_cos();
    let p = [rgb.r, rgb.g, rgb.b];
    let mut out = [0.0f64; 3];
    for (row, o) in out.iter_mut().enumerate() {
        *o = (0..3)
            .map(|col| p[col] * (LUMA[col] + COS[row][col] * c + SIN[row][col] * s))
            .sum();
    }
    Rgb::new(out[0], out[1], out[2]).clamp01()
}
