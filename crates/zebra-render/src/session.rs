#![forbid(unsafe_code)]

//! End-to-end render session: configuration, frame loop, export and report.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};
use web_time::Instant;
use zebra_core::{ZebraConfig, ZebraConfigParse};

use crate::canvas::Canvas;
use crate::cli::Opts;
use crate::error::RenderError;
use crate::export::FrameSequenceWriter;
use crate::frame_harness::{FrameRecord, FrameTimeCollector, SessionReport, stable_frame_hash};
use crate::render::{FrameRenderer, RenderOptions};

/// Load a shader configuration from a JSON file, then apply `ZEBRA_*`
/// overrides from `get_env`.
///
/// Override parse errors are logged and skipped; constraint violations are
/// reported when the shader is built.
pub fn load_config<F>(path: &Path, get_env: F) -> Result<ZebraConfig, RenderError>
where
    F: FnMut(&str) -> Option<String>,
{
    let text = fs::read_to_string(path)?;
    let base: ZebraConfig = serde_json::from_str(&text).map_err(|e| RenderError::ConfigFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(accept_overrides(base.with_overrides(get_env)))
}

/// Shader configuration for a run without a config file: defaults plus the
/// process environment.
pub fn env_config() -> ZebraConfig {
    accept_overrides(ZebraConfig::from_env_with_diagnostics())
}

/// Log every rejected override and keep the rest.
fn accept_overrides(parse: ZebraConfigParse) -> ZebraConfig {
    for err in &parse.errors {
        warn!(field = err.field, value = %err.value, "ignoring shader override: {}", err.message);
    }
    parse.config
}

/// Render the frames described by `opts` into `opts.out`.
pub fn run(opts: &Opts, config: ZebraConfig) -> Result<SessionReport, RenderError> {
    let timeline = opts.timeline().ok_or_else(|| {
        RenderError::Usage(format!(
            "timeline of {}s at {} fps has no frames",
            opts.duration, opts.fps
        ))
    })?;
    let frames = opts.frames.unwrap_or(u64::from(timeline.total_frames()));

    let renderer = FrameRenderer::new(
        config,
        RenderOptions {
            threads: opts.threads,
            background: opts.background,
        },
    )?;
    let mut canvas: Canvas = renderer.blank_canvas(opts.width, opts.height)?;
    let writer = FrameSequenceWriter::create(&opts.out, frames)?;
    let threads = renderer.options().effective_threads(opts.height);

    let _span = info_span!("session", width = opts.width, height = opts.height, frames, threads)
        .entered();
    info!(
        config = %renderer.shader().config().summary_short(),
        loop_frames = timeline.total_frames(),
        loop_secs = timeline.duration_secs(),
        fps = timeline.fps(),
        out = %writer.dir().display(),
        "rendering"
    );

    let mut collector =
        FrameTimeCollector::new("zebra", opts.width, opts.height).with_threads(threads);
    for (seq, tick) in timeline.clock(opts.start).take(frames as usize).enumerate() {
        let started = Instant::now();
        renderer.render_frame(&mut canvas, tick.playhead);
        let elapsed = started.elapsed();

        let encode_started = Instant::now();
        writer.write(&canvas, seq as u64)?;
        let encode = encode_started.elapsed();

        collector.record_frame(FrameRecord {
            frame: tick.frame,
            playhead: tick.playhead,
            elapsed,
            encode: Some(encode),
            frame_hash: stable_frame_hash(&canvas),
        });
    }

    let report = collector.report();
    info!(
        frames = report.frame_time.count,
        p50_us = report.frame_time.p50_us,
        p99_us = report.frame_time.p99_us,
        mpx_per_sec = report.megapixels_per_sec,
        "session complete"
    );

    if let Some(path) = &opts.report {
        fs::write(path, report.to_json())?;
        fs::write(jsonl_path(path), collector.to_jsonl())?;
    }
    Ok(report)
}

/// Per-frame JSONL path next to the JSON report.
pub fn jsonl_path(report: &Path) -> PathBuf {
    report.with_extension("jsonl")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn config_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zebra.json");
        fs::write(&path, r#"{ "density": 4.0, "scale": 2.0 }"#).unwrap();
        let env: HashMap<&str, &str> = [("ZEBRA_SCALE", "3"), ("ZEBRA_OCTAVES", "x")].into();
        let config = load_config(&path, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.density, 4.0);
        assert_eq!(config.scale, 3.0);
        assert_eq!(config.octaves, 1);
    }

    #[test]
    fn malformed_config_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ density: }").unwrap();
        let err = load_config(&path, |_| None).unwrap_err();
        assert!(matches!(err, RenderError::ConfigFile { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/zebra.json"), |_| None).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn rejected_overrides_leave_defaults() {
        let env: HashMap<&str, &str> =
            [("ZEBRA_DENSITY", "3.5"), ("ZEBRA_SIZE", "wide")].into();
        let parse = ZebraConfig::default().with_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(parse.errors.len(), 1);
        let config = accept_overrides(parse);
        assert_eq!(config.density, 3.5);
        assert_eq!(config.size, ZebraConfig::default().size);
    }

    #[test]
    fn jsonl_sits_next_to_report() {
        assert_eq!(jsonl_path(Path::new("out/report.json")), PathBuf::from("out/report.jsonl"));
    }
}
