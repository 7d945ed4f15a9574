#![forbid(unsafe_code)]

//! Pixel to normalized-coordinate mapping.
//!
//! Pixels are sampled at their centers. The vertical axis follows GL
//! conventions: `v = 0` is the bottom row of the image, so row 0 (top)
//! maps to `v = 1 - 0.5 / height`.

/// Normalized canvas coordinate, nominally in `[0, 1]²`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uv {
    pub u: f64,
    pub v: f64,
}

impl Uv {
    pub const CENTER: Self = Self::new(0.5, 0.5);

    #[inline]
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Shift by `(du, dv)`.
    #[inline]
    pub fn offset(self, du: f64, dv: f64) -> Self {
        Self::new(self.u + du, self.v + dv)
    }
}

/// Normalized coordinate of the center of pixel `index` along an axis of
/// `total` pixels. Returns 0.5 for an empty axis.
#[inline]
pub fn pixel_center(index: u32, total: u32) -> f64 {
    if total == 0 {
        0.5
    } else {
        (f64::from(index) + 0.5) / f64::from(total)
    }
}

/// Map pixel `(x, y)` (row 0 at the top) to a [`Uv`] with `v = 0` at the bottom.
#[inline]
pub fn pixel_to_uv(x: u32, y: u32, width: u32, height: u32) -> Uv {
    Uv::new(pixel_center(x, width), 1.0 - pixel_center(y, height))
}

/// Pre-computed coordinates for a whole canvas.
///
/// Frames at a fixed size reuse the same grid; only the playhead changes.
#[derive(Debug, Clone)]
pub struct UvGrid {
    us: Vec<f64>,
    vs: Vec<f64>,
    texel: (f64, f64),
}

impl UvGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let us = (0..width).map(|x| pixel_center(x, width)).collect();
        let vs = (0..height).map(|y| 1.0 - pixel_center(y, height)).collect();
        let texel = (
            if width == 0 { 0.0 } else { 1.0 / f64::from(width) },
            if height == 0 { 0.0 } else { 1.0 / f64::from(height) },
        );
        Self { us, vs, texel }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.us.len() as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.vs.len() as u32
    }

    /// Size of one pixel in normalized units.
    #[inline]
    pub fn texel(&self) -> (f64, f64) {
        self.texel
    }

    /// Coordinate of pixel `(x, y)`; out-of-range indices map to the center.
    #[inline]
    pub fn uv(&self, x: u32, y: u32) -> Uv {
        Uv::new(
            self.us.get(x as usize).copied().unwrap_or(0.5),
            self.vs.get(y as usize).copied().unwrap_or(0.5),
        )
    }
}
