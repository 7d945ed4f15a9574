#![forbid(unsafe_code)]

//! Command-line argument parsing for the zebra renderer.
//!
//! Flags take the `--flag=value` form. Canvas size, frame rate, worker count
//! and output paths fall back to `ZEBRA_*` environment variables when the
//! flag is absent; shader knobs come from `--config` and
//! [`zebra_core::ZebraConfig`] overrides instead.

use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use zebra_core::Rgb;

use crate::canvas::Canvas;
use crate::render::DEFAULT_BACKGROUND;
use crate::timeline::LoopTimeline;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
zebra-render: looping banded-noise texture renderer

USAGE:
    zebra-render [OPTIONS]

OPTIONS:
    --width=N            Canvas width in pixels (default: 1600)
    --height=N           Canvas height in pixels (default: 1600)
    --size=WxH           Canvas width and height in one flag
    --frames=N           Frames to render (default: one full loop)
    --start=N            First frame number (default: 0)
    --fps=N              Frames per second (default: 50)
    --duration=SECS      Loop duration in seconds (default: 6)
    --threads=N          Worker threads, 0 = all cores (default: 0)
    --out=DIR            Output directory for PNG frames (default: frames)
    --config=PATH        JSON shader configuration (partial files allowed)
    --background=#HEX    Background fill (default: #0a043c)
    --report=PATH        Write a JSON timing report; per-frame JSONL goes
                         next to it with a .jsonl extension
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    ZEBRA_WIDTH / ZEBRA_HEIGHT   Override --width / --height
    ZEBRA_CANVAS                 Override --size (e.g., 800x800)
    ZEBRA_FRAMES                 Override --frames
    ZEBRA_START                  Override --start
    ZEBRA_FPS                    Override --fps
    ZEBRA_DURATION               Override --duration
    ZEBRA_THREADS                Override --threads
    ZEBRA_OUT                    Override --out
    ZEBRA_CONFIG                 Override --config
    ZEBRA_BACKGROUND             Override --background
    ZEBRA_REPORT                 Override --report
    ZEBRA_LOG_JSON               Emit logs as JSON lines (1/true)
    RUST_LOG                     Log filter (default: info)

SHADER OVERRIDES (applied on top of --config):
    ZEBRA_SCALE ZEBRA_SIZE ZEBRA_DENSITY ZEBRA_LOOP_SCALE ZEBRA_OFFSET
    ZEBRA_AMPLITUDE ZEBRA_OCTAVES ZEBRA_HUE_SHIFT ZEBRA_HUE_SPIN";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub width: u32,
    pub height: u32,
    /// Frames to render; `None` renders one full loop.
    pub frames: Option<u64>,
    /// First frame number.
    pub start: u64,
    pub fps: u32,
    /// Loop duration in seconds.
    pub duration: f64,
    /// Worker threads (0 = available parallelism).
    pub threads: usize,
    /// Output directory for PNG frames.
    pub out: PathBuf,
    /// JSON shader configuration file.
    pub config: Option<PathBuf>,
    pub background: Rgb,
    /// JSON timing report path.
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Help => write!(f, "help requested"),
            Self::Version => write!(f, "version requested"),
            Self::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            Self::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl Default for Opts {
    fn default() -> Self {
        Self {
            width: Canvas::DEFAULT_SIZE,
            height: Canvas::DEFAULT_SIZE,
            frames: None,
            start: 0,
            fps: LoopTimeline::DEFAULT_FPS,
            duration: LoopTimeline::DEFAULT_DURATION_SECS,
            threads: 0,
            out: PathBuf::from("frames"),
            config: None,
            background: DEFAULT_BACKGROUND,
            report: None,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("zebra-render {VERSION}");
                process::exit(0);
            }
            Err(err @ ParseError::InvalidValue { .. }) => {
                eprintln!("{err}");
                process::exit(2);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    pub fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment fallbacks first; malformed values are ignored.
        if let Some(val) = get_env("ZEBRA_CANVAS")
            && let Some((w, h)) = parse_size(&val)
        {
            opts.width = w;
            opts.height = h;
        }
        if let Some(val) = get_env("ZEBRA_WIDTH")
            && let Ok(n) = val.trim().parse()
        {
            opts.width = n;
        }
        if let Some(val) = get_env("ZEBRA_HEIGHT")
            && let Ok(n) = val.trim().parse()
        {
            opts.height = n;
        }
        if let Some(val) = get_env("ZEBRA_FRAMES")
            && let Ok(n) = val.trim().parse()
        {
            opts.frames = Some(n);
        }
        if let Some(val) = get_env("ZEBRA_START")
            && let Ok(n) = val.trim().parse()
        {
            opts.start = n;
        }
        if let Some(val) = get_env("ZEBRA_FPS")
            && let Ok(n) = val.trim().parse()
        {
            opts.fps = n;
        }
        if let Some(val) = get_env("ZEBRA_DURATION")
            && let Ok(n) = val.trim().parse()
        {
            opts.duration = n;
        }
        if let Some(val) = get_env("ZEBRA_THREADS")
            && let Ok(n) = val.trim().parse()
        {
            opts.threads = n;
        }
        if let Some(val) = get_env("ZEBRA_OUT")
            && !val.trim().is_empty()
        {
            opts.out = PathBuf::from(val);
        }
        if let Some(val) = get_env("ZEBRA_CONFIG")
            && !val.trim().is_empty()
        {
            opts.config = Some(PathBuf::from(val));
        }
        if let Some(val) = get_env("ZEBRA_BACKGROUND")
            && let Some(rgb) = Rgb::parse_hex(&val)
        {
            opts.background = rgb;
        }
        if let Some(val) = get_env("ZEBRA_REPORT")
            && !val.trim().is_empty()
        {
            opts.report = Some(PathBuf::from(val));
        }

        // Command-line args override env vars.
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                other => {
                    let Some((flag, val)) = other.split_once('=') else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    };
                    match flag {
                        "--width" => opts.width = parse_value("--width", val)?,
                        "--height" => opts.height = parse_value("--height", val)?,
                        "--size" => {
                            let (w, h) = parse_size(val).ok_or_else(|| invalid("--size", val))?;
                            opts.width = w;
                            opts.height = h;
                        }
                        "--frames" => opts.frames = Some(parse_value("--frames", val)?),
                        "--start" => opts.start = parse_value("--start", val)?,
                        "--fps" => opts.fps = parse_value("--fps", val)?,
                        "--duration" => opts.duration = parse_value("--duration", val)?,
                        "--threads" => opts.threads = parse_value("--threads", val)?,
                        "--out" => {
                            if val.trim().is_empty() {
                                return Err(invalid("--out", val));
                            }
                            opts.out = PathBuf::from(val);
                        }
                        "--config" => {
                            if val.trim().is_empty() {
                                return Err(invalid("--config", val));
                            }
                            opts.config = Some(PathBuf::from(val));
                        }
                        "--background" => {
                            opts.background =
                                Rgb::parse_hex(val).ok_or_else(|| invalid("--background", val))?;
                        }
                        "--report" => {
                            if val.trim().is_empty() {
                                return Err(invalid("--report", val));
                            }
                            opts.report = Some(PathBuf::from(val));
                        }
                        _ => return Err(ParseError::UnknownArg(other.to_string())),
                    }
                }
            }
        }

        Ok(opts)
    }

    /// Timeline described by `--duration` / `--fps`.
    pub fn timeline(&self) -> Option<LoopTimeline> {
        LoopTimeline::new(self.duration, self.fps)
    }
}

fn invalid(flag: &'static str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        flag,
        value: value.to_string(),
    }
}

fn parse_value<T: FromStr>(flag: &'static str, value: &str) -> Result<T, ParseError> {
    value.trim().parse().map_err(|_| invalid(flag, value))
}

fn parse_size(raw: &str) -> Option<(u32, u32)> {
    let trimmed = raw.trim();
    let mut parts = trimmed.split(['x', 'X']);
    let width: u32 = parts.next()?.parse().ok()?;
    let height: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((width, height))
}
