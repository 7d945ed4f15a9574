#![forbid(unsafe_code)]

//! Frame-time measurement harness for the zebra renderer.
//!
//! Collects per-frame timings, summarises them as a percentile histogram and
//! exports JSON / JSONL. Frames are fingerprinted with a stable FNV-1a hash
//! so runs can be compared for determinism across thread counts and
//! platforms.
//!
//! # Usage
//!
//! ```ignore
//! let mut collector = FrameTimeCollector::new("zebra_run", 1600, 1600);
//!
//! for tick in timeline.clock(0).take(300) {
//!     let start = Instant::now();
//!     renderer.render_frame(&mut canvas, tick.playhead);
//!     collector.record_frame(FrameRecord {
//!         frame: tick.frame,
//!         playhead: tick.playhead,
//!         elapsed: start.elapsed(),
//!         encode: None,
//!         frame_hash: stable_frame_hash(&canvas),
//!     });
//! }
//!
//! println!("{}", collector.report().to_json());
//! ```

use serde::Serialize;
use web_time::Duration;

use crate::canvas::Canvas;

const JSONL_SCHEMA_VERSION: &str = "zebra-frames-v1";
const FRAME_HASH_ALGO: &str = "fnv1a64";
const FNV64_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01B3;

/// A single frame's measurements.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    /// Absolute frame number.
    pub frame: u64,
    pub playhead: f64,
    /// Wall-clock shading time.
    pub elapsed: Duration,
    /// PNG encode + write time, when the frame was exported.
    pub encode: Option<Duration>,
    /// [`stable_frame_hash`] of the rendered canvas.
    pub frame_hash: String,
}

/// Collects per-frame records and produces summary statistics.
pub struct FrameTimeCollector {
    run_id: String,
    width: u32,
    height: u32,
    threads: usize,
    records: Vec<FrameRecord>,
}

impl FrameTimeCollector {
    #[must_use]
    pub fn new(run_id: &str, width: u32, height: u32) -> Self {
        Self {
            run_id: run_id.to_string(),
            width,
            height,
            threads: 1,
            records: Vec::with_capacity(300),
        }
    }

    /// Record the worker count used for the run.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn record_frame(&mut self, record: FrameRecord) {
        self.records.push(record);
    }

    /// Produce a summary report from all recorded frames.
    #[must_use]
    pub fn report(&self) -> SessionReport {
        let mut times_us: Vec<u64> = self
            .records
            .iter()
            .map(|r| r.elapsed.as_micros() as u64)
            .collect();
        times_us.sort_unstable();
        let mut encode_us: Vec<u64> = self
            .records
            .iter()
            .filter_map(|r| r.encode.map(|d| d.as_micros() as u64))
            .collect();
        encode_us.sort_unstable();

        let pixels_per_frame = u64::from(self.width) * u64::from(self.height);
        let total_us: u64 = times_us.iter().sum();
        let megapixels_per_sec = if total_us > 0 {
            (pixels_per_frame * times_us.len() as u64) as f64 / total_us as f64
        } else {
            0.0
        };

        SessionReport {
            run_id: self.run_id.clone(),
            width: self.width,
            height: self.height,
            threads: self.threads,
            frame_time: histogram_or_default(&times_us),
            encode_time: optional_histogram(&encode_us),
            megapixels_per_sec,
            sequence_hash: sequence_hash(self.records.iter().map(|r| r.frame_hash.as_str())),
        }
    }

    /// Emit per-frame JSONL records to a string.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for r in &self.records {
            let row = JsonlFrameRecord {
                schema_version: JSONL_SCHEMA_VERSION,
                run_id: &self.run_id,
                width: self.width,
                height: self.height,
                frame_idx: r.frame,
                playhead: r.playhead,
                elapsed_us: r.elapsed.as_micros() as u64,
                encode_us: r.encode.map(|d| d.as_micros() as u64),
                hash_algo: FRAME_HASH_ALGO,
                frame_hash: &r.frame_hash,
            };
            if let Ok(line) = serde_json::to_string(&row) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}

#[derive(Debug, Serialize)]
struct JsonlFrameRecord<'a> {
    schema_version: &'static str,
    run_id: &'a str,
    width: u32,
    height: u32,
    frame_idx: u64,
    playhead: f64,
    elapsed_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    encode_us: Option<u64>,
    hash_algo: &'static str,
    frame_hash: &'a str,
}

/// Percentile histogram of frame times.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FrameTimeHistogram {
    pub count: u64,
    pub min_us: u64,
    pub max_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub mean_us: u64,
}

/// Complete session report.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub run_id: String,
    pub width: u32,
    pub height: u32,
    pub threads: usize,
    pub frame_time: FrameTimeHistogram,
    pub encode_time: Option<FrameTimeHistogram>,
    /// Shading throughput over the whole run.
    pub megapixels_per_sec: f64,
    /// Hash over all frame hashes, in order.
    pub sequence_hash: String,
}

impl SessionReport {
    /// Serialize to a JSON string (machine-readable for CI gating).
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[must_use]
fn fnv1a64_extend(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV64_PRIME);
    }
    hash
}

/// Deterministic hash over canvas size and pixel payload.
///
/// Stable across runs, platforms and thread counts for identical pixels.
#[must_use]
pub fn stable_frame_hash(canvas: &Canvas) -> String {
    let mut hash = FNV64_OFFSET_BASIS;
    hash = fnv1a64_extend(hash, &canvas.width().to_le_bytes());
    hash = fnv1a64_extend(hash, &canvas.height().to_le_bytes());
    for p in canvas.pixels() {
        hash = fnv1a64_extend(hash, &p.to_bytes());
    }
    format!("{FRAME_HASH_ALGO}:{hash:016x}")
}

fn sequence_hash<'a>(hashes: impl Iterator<Item = &'a str>) -> String {
    let mut hash = FNV64_OFFSET_BASIS;
    for h in hashes {
        hash = fnv1a64_extend(hash, h.as_bytes());
        hash = fnv1a64_extend(hash, b"\n");
    }
    format!("{FRAME_HASH_ALGO}:{hash:016x}")
}

fn percentile(sorted: &[u64], p: f64) -> u64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

fn histogram_or_default(samples: &[u64]) -> FrameTimeHistogram {
    if samples.is_empty() {
        return FrameTimeHistogram::default();
    }
    FrameTimeHistogram {
        count: samples.len() as u64,
        min_us: samples[0],
        max_us: samples[samples.len() - 1],
        p50_us: percentile(samples, 0.50),
        p95_us: percentile(samples, 0.95),
        p99_us: percentile(samples, 0.99),
        mean_us: samples.iter().sum::<u64>() / samples.len() as u64,
    }
}

fn optional_histogram(samples: &[u64]) -> Option<FrameTimeHistogram> {
    if samples.is_empty() {
        None
    } else {
        Some(histogram_or_default(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zebra_core::PackedRgba;

    fn record(frame: u64, us: u64) -> FrameRecord {
        FrameRecord {
            frame,
            playhead: frame as f64 / 300.0,
            elapsed: Duration::from_micros(us),
            encode: None,
            frame_hash: format!("fnv1a64:{frame:016x}"),
        }
    }

    #[test]
    fn empty_collector_produces_zero_report() {
        let c = FrameTimeCollector::new("test", 16, 16);
        let r = c.report();
        assert_eq!(r.frame_time.count, 0);
        assert_eq!(r.megapixels_per_sec, 0.0);
        assert!(r.encode_time.is_none());
    }

    #[test]
    fn histogram_percentiles() {
        let mut c = FrameTimeCollector::new("test", 100, 100);
        for i in 1..=100u64 {
            c.record_frame(record(i, i));
        }
        let r = c.report();
        assert_eq!(r.frame_time.count, 100);
        assert_eq!(r.frame_time.min_us, 1);
        assert_eq!(r.frame_time.max_us, 100);
        assert!(r.frame_time.p50_us >= 49 && r.frame_time.p50_us <= 51);
        assert!(r.frame_time.p95_us >= 94 && r.frame_time.p95_us <= 96);
        assert!(r.frame_time.p99_us >= 98 && r.frame_time.p99_us <= 100);
    }

    #[test]
    fn throughput_is_pixels_per_microsecond() {
        let mut c = FrameTimeCollector::new("test", 1000, 1000);
        c.record_frame(record(0, 500_000));
        c.record_frame(record(1, 500_000));
        // 2 Mpx in 1 s.
        assert!((c.report().megapixels_per_sec - 2.0).abs() < 1e-12);
    }

    #[test]
    fn encode_histogram_present_when_recorded() {
        let mut c = FrameTimeCollector::new("test", 8, 8);
        let mut r = record(0, 10);
        r.encode = Some(Duration::from_micros(40));
        c.record_frame(r);
        let report = c.report();
        assert_eq!(report.encode_time.map(|h| h.max_us), Some(40));
    }

    #[test]
    fn jsonl_has_one_valid_line_per_frame() {
        let mut c = FrameTimeCollector::new("run \"quoted\"", 8, 8);
        for i in 0..5 {
            c.record_frame(record(i, 100));
        }
        let jsonl = c.to_jsonl();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 5);
        for (i, line) in lines.iter().enumerate() {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["frame_idx"], i as u64);
            assert_eq!(v["hash_algo"], "fnv1a64");
            assert_eq!(v["run_id"], "run \"quoted\"");
            assert!(v.get("encode_us").is_none());
        }
    }

    #[test]
    fn report_json_is_valid() {
        let mut c = FrameTimeCollector::new("test", 8, 8).with_threads(4);
        c.record_frame(record(0, 123));
        let v: serde_json::Value = serde_json::from_str(&c.report().to_json()).unwrap();
        assert_eq!(v["threads"], 4);
        assert_eq!(v["frame_time"]["p50_us"], 123);
    }

    #[test]
    fn frame_hash_is_deterministic_and_sensitive() {
        let a = Canvas::new(4, 4, PackedRgba::rgb(1, 2, 3)).unwrap();
        let mut b = a.clone();
        assert_eq!(stable_frame_hash(&a), stable_frame_hash(&b));
        assert!(stable_frame_hash(&a).starts_with("fnv1a64:"));
        b.pixels_mut()[5] = PackedRgba::rgb(1, 2, 4);
        assert_ne!(stable_frame_hash(&a), stable_frame_hash(&b));
        let c = Canvas::new(2, 8, PackedRgba::rgb(1, 2, 3)).unwrap();
        assert_ne!(stable_frame_hash(&a), stable_frame_hash(&c));
    }
}
