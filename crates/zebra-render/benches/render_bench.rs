//! Benchmarks for frame rendering.
//!
//! Performance budgets (release, 8 threads):
//! - 200x200 frame: < 15ms
//! - 400x400 frame: < 60ms
//! - stable_frame_hash 400x400: < 1ms
//!
//! Run with: cargo bench -p zebra-render --bench render_bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use zebra_core::ZebraConfig;
use zebra_render::{FrameRenderer, LoopTimeline, RenderOptions, stable_frame_hash};

fn renderer(threads: usize) -> FrameRenderer {
    FrameRenderer::new(
        ZebraConfig::default(),
        RenderOptions {
            threads,
            ..RenderOptions::default()
        },
    )
    .unwrap()
}

// =============================================================================
// Frame Benchmarks
// =============================================================================

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("zebra_render/frame");
    group.sample_size(10);
    let timeline = LoopTimeline::default();

    for size in [200u32, 400] {
        for threads in [1usize, 8] {
            let r = renderer(threads);
            let mut canvas = r.blank_canvas(size, size).unwrap();
            let mut frame = 0u64;
            group.bench_function(format!("{size}x{size}_t{threads}"), |b| {
                b.iter(|| {
                    frame += 1;
                    r.render_frame(&mut canvas, timeline.playhead(frame));
                    black_box(canvas.pixels());
                })
            });
        }
    }

    group.finish();
}

// =============================================================================
// Hash Benchmarks
// =============================================================================

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("zebra_render/hash");
    let canvas = renderer(0).render(400, 400, 0.0).unwrap();
    group.bench_function("stable_frame_hash_400x400", |b| {
        b.iter(|| black_box(stable_frame_hash(black_box(&canvas))))
    });
    group.finish();
}

criterion_group!(benches, bench_frames, bench_hash);
criterion_main!(benches);
