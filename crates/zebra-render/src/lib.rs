#![forbid(unsafe_code)]

//! Reference host for `zebra-core`.
//!
//! Owns everything the per-pixel core leaves out: the loop timeline, the
//! pixel canvas, threaded frame rendering with compositing over an opaque
//! background, frame timing and hashing, PNG export and the command line.

pub mod canvas;
pub mod cli;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod frame_harness;
pub mod render;
#[cfg(feature = "export")]
pub mod session;
pub mod timeline;

pub use canvas::Canvas;
pub use error::RenderError;
pub use frame_harness::{FrameRecord, FrameTimeCollector, SessionReport, stable_frame_hash};
pub use render::{DEFAULT_BACKGROUND, FrameRenderer, RenderOptions};
pub use timeline::{FrameClock, FrameTick, LoopTimeline};
