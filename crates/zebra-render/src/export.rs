#![forbid(unsafe_code)]

//! PNG export of rendered frames.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::canvas::Canvas;
use crate::error::RenderError;

/// Encode `canvas` as an RGBA PNG at `path`.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), RenderError> {
    let image = RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_rgba8())
        .ok_or_else(|| RenderError::Image("pixel buffer does not match canvas size".into()))?;
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Writes a numbered frame sequence (`frame_0000.png`, `frame_0001.png`, ...).
#[derive(Debug, Clone)]
pub struct FrameSequenceWriter {
    dir: PathBuf,
    digits: usize,
}

impl FrameSequenceWriter {
    /// Writer into `dir`, creating it if needed. `total_frames` sets the
    /// zero-padding width (at least four digits).
    pub fn create(dir: impl Into<PathBuf>, total_frames: u64) -> Result<Self, RenderError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let digits = total_frames.saturating_sub(1).max(1).ilog10() as usize + 1;
        Ok(Self {
            dir,
            digits: digits.max(4),
        })
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Output path for sequence position `index`.
    pub fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!(
            "frame_{:0width$}.png",
            index,
            width = self.digits
        ))
    }

    /// Encode `canvas` as sequence position `index`.
    pub fn write(&self, canvas: &Canvas, index: u64) -> Result<PathBuf, RenderError> {
        let path = self.path_for(index);
        write_png(canvas, &path)?;
        info!(frame = index, path = %path.display(), "frame exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zebra_core::PackedRgba;

    #[test]
    fn sequence_names_are_zero_padded() {
        let dir = tempfile::tempdir().unwrap();
        let w = FrameSequenceWriter::create(dir.path(), 300).unwrap();
        assert_eq!(w.path_for(7), dir.path().join("frame_0007.png"));
        let w = FrameSequenceWriter::create(dir.path(), 123_456).unwrap();
        assert_eq!(w.path_for(7), dir.path().join("frame_000007.png"));
    }

    #[test]
    fn writes_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let mut canvas = Canvas::new(3, 2, PackedRgba::rgb(10, 4, 60)).unwrap();
        canvas.pixels_mut()[4] = PackedRgba::rgb(200, 100, 50);
        let path = dir.path().join("out.png");
        write_png(&canvas, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 4, 60, 255]);
        assert_eq!(decoded.get_pixel(1, 1).0, [200, 100, 50, 255]);
    }

    #[test]
    fn create_makes_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let w = FrameSequenceWriter::create(&nested, 1).unwrap();
        assert!(w.dir().is_dir());
    }
}
