#![forbid(unsafe_code)]

//! Row-major RGBA pixel buffer.

use zebra_core::PackedRgba;

use crate::error::RenderError;

/// Largest accepted canvas edge, in pixels.
pub const MAX_EDGE: u32 = 16_384;

/// Row-major pixel buffer; row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl Canvas {
    pub const DEFAULT_SIZE: u32 = 1600;

    /// Allocate a canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: PackedRgba) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || width > MAX_EDGE || height > MAX_EDGE {
            return Err(RenderError::Usage(format!(
                "canvas size {width}x{height} outside 1..={MAX_EDGE}"
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [PackedRgba] {
        &mut self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<PackedRgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Flatten to `RGBA8` bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&p.to_bytes());
        }
        out
    }
}
