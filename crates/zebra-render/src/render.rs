#![forbid(unsafe_code)]

//! Frame rendering: shade every pixel and composite over the background.
//!
//! The canvas is split into horizontal stripes of whole rows, one per worker,
//! and each stripe is shaded on a scoped thread. Shading is a pure function
//! of `(pixel, playhead)`, so the output is bit-identical for any thread
//! count.

use std::num::NonZeroUsize;
use std::thread;

use tracing::debug_span;
use zebra_core::{
    FrameContext, NoiseSource, PackedRgba, Rgb, Simplex3, UvGrid, ZebraConfig, ZebraShader,
};

use crate::canvas::Canvas;
use crate::error::RenderError;

/// Reference background fill (`#0a043c`).
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(10.0 / 255.0, 4.0 / 255.0, 60.0 / 255.0);

/// Host-side render settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Worker threads; 0 picks the available parallelism.
    pub threads: usize,
    /// Opaque fill the shader output is composited over.
    pub background: Rgb,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl RenderOptions {
    /// Concrete worker count for a canvas of `rows` rows.
    pub fn effective_threads(&self, rows: u32) -> usize {
        let wanted = if self.threads == 0 {
            thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            self.threads
        };
        wanted.clamp(1, (rows as usize).max(1))
    }
}

/// Renders frames of one shader configuration.
#[derive(Debug, Clone)]
pub struct FrameRenderer<N: NoiseSource = Simplex3> {
    shader: ZebraShader<N>,
    options: RenderOptions,
}

impl FrameRenderer<Simplex3> {
    /// Validate `config` and build a renderer around the reference noise.
    pub fn new(config: ZebraConfig, options: RenderOptions) -> Result<Self, RenderError> {
        Ok(Self::with_shader(ZebraShader::new(config)?, options))
    }
}

impl<N: NoiseSource> FrameRenderer<N> {
    pub fn with_shader(shader: ZebraShader<N>, options: RenderOptions) -> Self {
        Self { shader, options }
    }

    #[inline]
    pub fn shader(&self) -> &ZebraShader<N> {
        &self.shader
    }

    #[inline]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Allocate a canvas pre-filled with the background.
    pub fn blank_canvas(&self, width: u32, height: u32) -> Result<Canvas, RenderError> {
        Canvas::new(width, height, PackedRgba::from(self.options.background))
    }

    /// Shade every pixel of `canvas` for `playhead`.
    pub fn render_frame(&self, canvas: &mut Canvas, playhead: f64) {
        let (width, height) = (canvas.width(), canvas.height());
        let threads = self.options.effective_threads(height);
        let _span = debug_span!("render_frame", playhead, width, height, threads).entered();

        let grid = UvGrid::new(width, height);
        let ctx = FrameContext::for_raster(playhead, width, height);
        let pixels = canvas.pixels_mut();

        if threads <= 1 {
            self.shade_stripe(&grid, &ctx, pixels, 0);
            return;
        }

        let rows_per_thread = height as usize / threads;
        let remainder = height as usize % threads;
        let row_len = width as usize;

        let mut stripes = Vec::with_capacity(threads);
        let mut remaining = pixels;
        let mut start_y = 0u32;
        for i in 0..threads {
            let rows = rows_per_thread + usize::from(i < remainder);
            let (stripe, rest) = remaining.split_at_mut(rows * row_len);
            stripes.push((stripe, start_y));
            remaining = rest;
            start_y += rows as u32;
        }

        thread::scope(|s| {
            for (stripe, start_y) in stripes {
                let grid = &grid;
                let ctx = &ctx;
                s.spawn(move || self.shade_stripe(grid, ctx, stripe, start_y));
            }
        });
    }

    /// Render a fresh canvas for `playhead`.
    pub fn render(&self, width: u32, height: u32, playhead: f64) -> Result<Canvas, RenderError> {
        let mut canvas = self.blank_canvas(width, height)?;
        self.render_frame(&mut canvas, playhead);
        Ok(canvas)
    }

    fn shade_stripe(
        &self,
        grid: &UvGrid,
        ctx: &FrameContext,
        stripe: &mut [PackedRgba],
        start_y: u32,
    ) {
        let width = grid.width() as usize;
        if width == 0 {
            return;
        }
        let background = self.options.background;
        for (dy, row) in stripe.chunks_exact_mut(width).enumerate() {
            let y = start_y + dy as u32;
            for (x, px) in row.iter_mut().enumerate() {
                let rgba = self.shader.shade(grid.uv(x as u32, y), ctx);
                *px = PackedRgba::from(rgba.over(background));
            }
        }
    }
}
