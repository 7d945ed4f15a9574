//! Property-based invariant tests for the loop timeline and frame renderer.
//!
//! 1. Playheads always lie in [0, 1).
//! 2. Playheads repeat every loop.
//! 3. Clock ticks advance by one frame and agree with `playhead`.
//! 4. Consecutive frames inside a loop are `1 / total_frames` apart.
//! 5. Stripe rendering is independent of the worker count.

use proptest::prelude::*;
use zebra_core::ZebraConfig;
use zebra_render::{FrameRenderer, LoopTimeline, RenderOptions, stable_frame_hash};

// ── Helpers ─────────────────────────────────────────────────────────────

fn timeline_strategy() -> impl Strategy<Value = LoopTimeline> {
    (0.1f64..30.0, 1u32..=240)
        .prop_filter_map("timeline needs at least one frame", |(d, fps)| {
            LoopTimeline::new(d, fps)
        })
}

proptest! {
    #[test]
    fn playhead_in_unit_interval(
        timeline in timeline_strategy(),
        frame in 0u64..10_000_000,
    ) {
        let p = timeline.playhead(frame);
        prop_assert!((0.0..1.0).contains(&p), "playhead({frame}) = {p}");
    }

    #[test]
    fn playhead_repeats_every_loop(
        timeline in timeline_strategy(),
        frame in 0u64..1_000_000,
        loops in 1u64..100,
    ) {
        let total = u64::from(timeline.total_frames());
        prop_assert_eq!(timeline.playhead(frame), timeline.playhead(frame + loops * total));
    }

    #[test]
    fn clock_agrees_with_playhead(
        timeline in timeline_strategy(),
        start in 0u64..100_000,
        n in 1usize..64,
    ) {
        let ticks: Vec<_> = timeline.clock(start).take(n).collect();
        for (i, tick) in ticks.iter().enumerate() {
            prop_assert_eq!(tick.frame, start + i as u64);
            prop_assert_eq!(tick.playhead, timeline.playhead(tick.frame));
            prop_assert!(tick.index < timeline.total_frames());
        }
    }

    #[test]
    fn frames_advance_by_one_step(
        timeline in timeline_strategy(),
        loops in 0u64..1_000,
        index in 0u32..u32::MAX,
    ) {
        let total = timeline.total_frames();
        prop_assume!(total > 1);
        let index = u64::from(index % (total - 1));
        let frame = loops * u64::from(total) + index;
        let delta = timeline.playhead(frame + 1) - timeline.playhead(frame);
        prop_assert!((delta - timeline.step()).abs() < 1e-12, "delta={delta}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn stripes_do_not_change_pixels(
        width in 1u32..24,
        height in 1u32..24,
        threads in 2usize..9,
        playhead in 0.0f64..1.0,
    ) {
        let serial = FrameRenderer::new(
            ZebraConfig::default(),
            RenderOptions { threads: 1, ..RenderOptions::default() },
        )
        .unwrap();
        let parallel = FrameRenderer::new(
            ZebraConfig::default(),
            RenderOptions { threads, ..RenderOptions::default() },
        )
        .unwrap();
        let a = serial.render(width, height, playhead).unwrap();
        let b = parallel.render(width, height, playhead).unwrap();
        prop_assert_eq!(stable_frame_hash(&a), stable_frame_hash(&b));
    }
}
