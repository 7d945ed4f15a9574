#![forbid(unsafe_code)]

//! Loop timeline: frame indices and playheads.
//!
//! The reference animation runs 6 seconds at 50 fps, so one loop is 300
//! frames. Frame `i` shows playhead `i / 300`; the playhead never reaches
//! 1.0 because frame 300 is frame 0 of the next loop.
//!
//! When `duration * fps` is not integral the frame count is rounded and the
//! playhead always advances by `1 / total_frames`; the loop then runs a
//! little shorter or longer than `duration`.

/// Loop duration and frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopTimeline {
    duration_secs: f64,
    fps: u32,
    total_frames: u32,
}

impl LoopTimeline {
    pub const DEFAULT_DURATION_SECS: f64 = 6.0;
    pub const DEFAULT_FPS: u32 = 50;

    /// Timeline of `duration_secs` at `fps`. Returns `None` when the
    /// combination yields no frames or is not finite.
    pub fn new(duration_secs: f64, fps: u32) -> Option<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 || fps == 0 {
            return None;
        }
        let frames = (duration_secs * f64::from(fps)).round();
        if frames < 1.0 || frames > f64::from(u32::MAX) {
            return None;
        }
        Some(Self {
            duration_secs,
            fps,
            total_frames: frames as u32,
        })
    }

    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Frames in one loop.
    #[inline]
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Playhead increment per frame.
    #[inline]
    pub fn step(&self) -> f64 {
        1.0 / f64::from(self.total_frames)
    }

    /// Playhead in `[0, 1)` for frame `frame`, wrapping past the loop end.
    #[inline]
    pub fn playhead(&self, frame: u64) -> f64 {
        let index = frame % u64::from(self.total_frames);
        index as f64 / f64::from(self.total_frames)
    }

    /// Iterate frames starting at `start`.
    pub fn clock(&self, start: u64) -> FrameClock {
        FrameClock {
            timeline: *self,
            frame: start,
        }
    }
}

impl Default for LoopTimeline {
    fn default() -> Self {
        Self {
            duration_secs: Self::DEFAULT_DURATION_SECS,
            fps: Self::DEFAULT_FPS,
            total_frames: 300,
        }
    }
}

/// One tick of a [`FrameClock`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Absolute frame number since the clock started counting.
    pub frame: u64,
    /// Position inside the current loop.
    pub index: u32,
    pub playhead: f64,
}

/// Endless frame iterator; the playhead wraps at the end of each loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    timeline: LoopTimeline,
    frame: u64,
}

impl Iterator for FrameClock {
    type Item = FrameTick;

    fn next(&mut self) -> Option<FrameTick> {
        let frame = self.frame;
        self.frame = self.frame.wrapping_add(1);
        Some(FrameTick {
            frame,
            index: (frame % u64::from(self.timeline.total_frames)) as u32,
            playhead: self.timeline.playhead(frame),
        })
    }
}
