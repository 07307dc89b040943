use super::*;
use crate::progress::bands::BandKind;

fn segmenter() -> ProgressSegmenter {
    ProgressSegmenter::new(SegmenterParams::default())
}

#[test]
fn zero_countdown_is_a_single_empty_segment() {
    let segs = segmenter().plan_segments(0.0, 5.0, 30.0, 800).unwrap();
    assert_eq!(
        segs,
        vec![ProgressSegment {
            start: 0.0,
            end: 5.0,
            width: 0,
            x_start: 800,
            color_spans: vec![],
            corner_radius: 0.0,
        }]
    );
}

#[test]
fn degenerate_inputs_plan_nothing() {
    let s = segmenter();
    assert!(s.plan_segments(10.0, 12.0, 0.0, 800).unwrap().is_empty());
    assert!(s.plan_segments(10.0, 12.0, -30.0, 800).unwrap().is_empty());
    assert!(s.plan_segments(10.0, 12.0, f64::NAN, 800).unwrap().is_empty());
    assert!(s.plan_segments(10.0, 12.0, 30.0, 0).unwrap().is_empty());
}

#[test]
fn negative_countdown_is_invalid() {
    let err = segmenter().plan_segments(-1.0, 5.0, 30.0, 800).unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfiguration(_)));
}

#[test]
fn bar_shrinks_from_the_right_through_the_bands() {
    let segs = segmenter().plan_segments(2.0, 5.0, 2.0, 100).unwrap();
    assert_eq!(segs.len(), 5);

    let summary: Vec<(f64, f64, u32, u32)> = segs
        .iter()
        .map(|s| (s.start, s.end, s.width, s.x_start))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0.0, 0.5, 100, 0),
            (0.5, 1.0, 75, 25),
            (1.0, 1.5, 50, 50),
            (1.5, 2.0, 25, 75),
            (2.0, 5.0, 0, 100),
        ]
    );

    let kinds = |i: usize| -> Vec<BandKind> { segs[i].color_spans.iter().map(|c| c.kind).collect() };
    assert_eq!(kinds(0), vec![BandKind::Safe, BandKind::Warn, BandKind::Danger]);
    assert_eq!(kinds(2), vec![BandKind::Warn, BandKind::Danger]);
    assert_eq!(kinds(3), vec![BandKind::Danger]);
    assert!(kinds(4).is_empty());
    assert_eq!(segs[3].color_spans[0].start, 75);
    assert_eq!(segs[3].color_spans[0].end, 100);
    assert_eq!(segs[3].corner_radius, 12.0);
}

#[test]
fn narrow_bar_keeps_one_pixel_until_countdown_ends() {
    let segs = segmenter().plan_segments(10.0, 10.0, 30.0, 1).unwrap();
    assert_eq!(segs.len(), 301);
    assert!(segs[..300].iter().all(|s| s.width == 1 && s.x_start == 0));
    assert_eq!(segs[300].width, 0);
    assert_eq!(segs[299].corner_radius, 0.5);
}

#[test]
fn widths_are_monotonic_and_zero_is_absorbing() {
    let s = segmenter();
    for width in [1u32, 2, 3, 7, 50, 333, 1800] {
        for countdown in [0.3, 1.0, 2.7, 10.0] {
            for fps in [1.0, 24.0, 29.97, 60.0] {
                let segs = s.plan_segments(countdown, countdown + 2.0, fps, width).unwrap();
                let mut seen_zero = false;
                for pair in segs.windows(2) {
                    assert!(pair[1].width <= pair[0].width);
                    assert_eq!(pair[0].end, pair[1].start);
                }
                for seg in &segs {
                    if seen_zero {
                        assert_eq!(seg.width, 0);
                    }
                    seen_zero |= seg.width == 0;
                    let covered: u32 = seg.color_spans.iter().map(|c| c.end - c.start).sum();
                    assert_eq!(covered, seg.width);
                }
                assert_eq!(
                    segs.last().unwrap().end,
                    crate::foundation::math::round6(countdown + 2.0)
                );
            }
        }
    }
}

#[test]
fn time_boundaries_are_rounded_to_micro_seconds() {
    let segs = segmenter().plan_segments(1.0, 1.0, 3.0, 90).unwrap();
    let starts: Vec<f64> = segs.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0.0, 0.333_333, 0.666_667, 1.0]);
    assert_eq!(segs[2].end, 1.0);
}

#[test]
fn short_total_duration_clamps_trailing_segment() {
    let segs = segmenter().plan_segments(2.0, 1.0, 1.0, 10).unwrap();
    let last = segs.last().unwrap();
    assert_eq!((last.start, last.end), (2.0, 2.0));
}

#[test]
fn identical_inputs_give_identical_bytes() {
    let a = segmenter().plan_segments(7.3, 9.0, 30.0, 1720).unwrap();
    let b = segmenter().plan_segments(7.3, 9.0, 30.0, 1720).unwrap();
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}

#[test]
fn band_masks_are_cached_per_width() {
    let s = segmenter();
    let a = s.band_mask(640);
    let b = s.band_mask(640);
    assert!(Arc::ptr_eq(&a, &b));
    s.band_mask(320);
    assert_eq!(s.cached_widths(), 2);
}

#[test]
fn concurrent_planning_shares_the_cache() {
    let s = segmenter();
    let expected = s.plan_segments(3.0, 4.0, 30.0, 999).unwrap();
    let fresh = segmenter();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| fresh.plan_segments(3.0, 4.0, 30.0, 999).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
    assert_eq!(fresh.cached_widths(), 1);
}

#[test]
fn segment_lookup_by_time() {
    let segs = segmenter().plan_segments(2.0, 5.0, 2.0, 100).unwrap();
    assert_eq!(segment_at(&segs, 0.0).unwrap().width, 100);
    assert_eq!(segment_at(&segs, 0.49).unwrap().width, 100);
    assert_eq!(segment_at(&segs, 0.5).unwrap().width, 75);
    assert_eq!(segment_at(&segs, 3.0).unwrap().width, 0);
    assert_eq!(segment_at(&segs, 5.0).unwrap().width, 0);
    assert!(segment_at(&segs, 5.1).is_none());
    assert!(segment_at(&segs, -0.1).is_none());
    assert!(segment_at(&[], 0.0).is_none());
}

#[test]
fn step_count_is_bounded() {
    let s = segmenter();
    let err = s.plan_segments(1e12, 1e12, 30.0, 800).unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfiguration(_)), "{err}");
    let err = s.plan_segments(10.0, 12.0, 1e9, 800).unwrap_err();
    assert!(matches!(err, ReelError::InvalidConfiguration(_)), "{err}");
}
