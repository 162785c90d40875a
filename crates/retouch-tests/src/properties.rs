//! Replay properties of the compositor, checked end to end.

use retouch_core::{CropRect, PixelBuffer};
use retouch_edit::{CompositeOptions, CompositionEngine, Edit, EditHistory, EditSession, Timestamp};
use retouch_ops::pixel::quantize;
use retouch_ops::{AdjustmentParams, FilterType, Resample};

use crate::{buffer_digest, init_tracing, test_pattern};

fn engine() -> CompositionEngine {
    CompositionEngine::default()
}

fn stamped(millis: u64, edit: Edit) -> Edit {
    edit.with_created_at(Timestamp::from_millis(millis))
}

fn single(edit: Edit) -> EditHistory {
    [edit].into_iter().collect()
}

#[test]
fn empty_history_is_identity() {
    init_tracing();
    for (w, h) in [(1, 1), (4, 4), (17, 9)] {
        let original = test_pattern(w, h);
        let out = engine().composite_full(&original, &EditHistory::new()).unwrap();
        assert_eq!(out, original);
    }
}

#[test]
fn none_filter_never_changes_samples() {
    init_tracing();
    let original = test_pattern(12, 7);
    for intensity in [0.0, 1.0, 37.5, 100.0, 1e9, f64::NAN] {
        let out = engine()
            .composite_full(&original, &single(Edit::filter(FilterType::None, intensity)))
            .unwrap();
        assert_eq!(out, original, "intensity {intensity}");
    }
}

#[test]
fn zero_intensity_is_identity_for_every_filter() {
    init_tracing();
    let original = test_pattern(9, 9);
    for filter in FilterType::ALL {
        let out = engine()
            .composite_full(&original, &single(Edit::filter(filter, 0.0)))
            .unwrap();
        assert_eq!(out, original, "{filter}");
    }
}

#[test]
fn full_intensity_applies_transform_unblended() {
    init_tracing();
    let original = test_pattern(9, 5);
    for filter in FilterType::ALL {
        let out = engine()
            .composite_full(&original, &single(Edit::filter(filter, 100.0)))
            .unwrap();
        for (src, dst) in original.samples().chunks_exact(4).zip(out.samples().chunks_exact(4)) {
            let rgb = [f64::from(src[0]), f64::from(src[1]), f64::from(src[2])];
            let t = filter.transform(rgb);
            assert_eq!(dst, [quantize(t[0]), quantize(t[1]), quantize(t[2]), src[3]], "{filter}");
        }
    }
}

#[test]
fn replay_order_ignores_append_order() {
    init_tracing();
    let original = test_pattern(16, 12);
    let edits = [
        stamped(100, Edit::crop(CropRect::new(2, 1, 11, 9))),
        stamped(200, Edit::rotate(25.0)),
        stamped(300, Edit::filter(FilterType::Vintage, 65.0)),
        stamped(
            400,
            Edit::adjustment(AdjustmentParams {
                brightness: 12.0,
                contrast: -20.0,
                saturation: 35.0,
                blur: 1.2,
            }),
        ),
    ];

    let forward: EditHistory = edits.iter().cloned().collect();
    let reversed: EditHistory = edits.iter().rev().cloned().collect();
    let shuffled: EditHistory = [2, 0, 3, 1].iter().map(|&i| edits[i].clone()).collect();

    let expected = buffer_digest(&engine().composite_full(&original, &forward).unwrap());
    assert_eq!(buffer_digest(&engine().composite_full(&original, &reversed).unwrap()), expected);
    assert_eq!(buffer_digest(&engine().composite_full(&original, &shuffled).unwrap()), expected);
    // Same call twice gives the same pixels
    assert_eq!(buffer_digest(&engine().composite_full(&original, &forward).unwrap()), expected);
}

#[test]
fn changing_created_at_changes_result() {
    init_tracing();
    let original = test_pattern(16, 12);
    let crop_first: EditHistory = [
        stamped(1, Edit::crop(CropRect::new(0, 0, 8, 12))),
        stamped(2, Edit::rotate(90.0)),
    ]
    .into_iter()
    .collect();
    let rotate_first: EditHistory = [
        stamped(2, Edit::crop(CropRect::new(0, 0, 8, 12))),
        stamped(1, Edit::rotate(90.0)),
    ]
    .into_iter()
    .collect();

    let a = engine().composite_full(&original, &crop_first).unwrap();
    let b = engine().composite_full(&original, &rotate_first).unwrap();
    assert_ne!(buffer_digest(&a), buffer_digest(&b));
}

#[test]
fn incremental_matches_full_replay() {
    init_tracing();
    let original = test_pattern(14, 10);
    let steps = [
        Edit::filter(FilterType::Sepia, 40.0),
        Edit::rotate(-15.0),
        Edit::crop(CropRect::new(3, 2, 9, 7)),
        Edit::adjustment(AdjustmentParams {
            saturation: -60.0,
            blur: 2.5,
            ..Default::default()
        }),
        Edit::filter(FilterType::Noir, 80.0),
    ];

    for resample in [Resample::Nearest, Resample::Bilinear] {
        let engine = CompositionEngine::new(CompositeOptions::default().with_resample(resample));
        let mut history = EditHistory::new();
        let mut current = original.clone();
        for step in &steps {
            current = engine.composite_incremental(&current, step);
            history.append(step.clone());
            assert_eq!(current, engine.composite_full(&original, &history).unwrap(), "{resample}");
        }
    }
}

#[test]
fn session_stays_consistent_through_edits_and_removal() {
    init_tracing();
    let original = test_pattern(10, 10);
    let mut session = EditSession::new(engine(), original.clone()).unwrap();

    let filter = Edit::filter(FilterType::Blueprint, 90.0);
    let filter_id = filter.id().to_string();
    session.apply(filter).unwrap();
    session.apply(Edit::rotate(33.0)).unwrap();
    session.apply(stamped(0, Edit::crop(CropRect::new(1, 1, 6, 6)))).unwrap();
    session.remove(&filter_id).unwrap();

    let expected = engine().composite_full(&original, session.history()).unwrap();
    assert_eq!(session.composite(), &expected);
    assert_eq!(session.composite().dimensions(), (6, 6));

    session.clear();
    assert!(!session.is_edited());
    assert_eq!(session.composite(), &original);
}

#[test]
fn oversized_crop_is_clamped() {
    init_tracing();
    let original = test_pattern(8, 8);
    let out = engine()
        .composite_full(&original, &single(Edit::crop(CropRect::new(5, -3, 40, 6))))
        .unwrap();
    assert_eq!(out.dimensions(), (3, 3));
    assert_eq!(out.get(0, 0).unwrap(), original.get(5, 0).unwrap());
    assert_eq!(out.get(2, 2).unwrap(), original.get(7, 2).unwrap());
}

#[test]
fn empty_crop_degrades_to_single_pixel() {
    init_tracing();
    let original = test_pattern(8, 8);
    let history: EditHistory = [
        stamped(1, Edit::crop(CropRect::new(20, 20, 4, 4))),
        stamped(2, Edit::filter(FilterType::Invert, 100.0)),
    ]
    .into_iter()
    .collect();
    let out = engine().composite_full(&original, &history).unwrap();
    assert_eq!(out.dimensions(), (1, 1));
    // Inverting transparent black leaves alpha alone
    assert_eq!(out.get(0, 0).unwrap(), [255, 255, 255, 0]);
}

#[test]
fn extreme_adjustments_clamp_channels() {
    init_tracing();
    let original = test_pattern(12, 12);
    let extremes = [-100.0, 100.0];
    for &b in &extremes {
        for &c in &extremes {
            for &s in &extremes {
                let params = AdjustmentParams {
                    brightness: b,
                    contrast: c,
                    saturation: s,
                    blur: 20.0,
                };
                let out = engine()
                    .composite_full(&original, &single(Edit::adjustment(params)))
                    .unwrap();
                assert_eq!(out.dimensions(), original.dimensions());

                // Zero contrast factor collapses everything to mid-gray; otherwise
                // full brightness saturates to white and zero brightness to black.
                let expected = if c < 0.0 {
                    128
                } else if b > 0.0 {
                    255
                } else {
                    0
                };
                for px in out.samples().chunks_exact(4) {
                    assert_eq!(px, [expected, expected, expected, 255], "b={b} c={c} s={s}");
                }
            }
        }
    }
}

#[test]
fn saturated_channels_do_not_wrap() {
    init_tracing();
    let red = PixelBuffer::filled(3, 3, [255, 0, 0, 255]);
    let cases = [
        (AdjustmentParams { saturation: 100.0, ..Default::default() }, [255, 0, 0, 255]),
        (AdjustmentParams { saturation: -100.0, ..Default::default() }, [76, 76, 76, 255]),
        (AdjustmentParams { brightness: 100.0, ..Default::default() }, [255, 255, 255, 255]),
        (AdjustmentParams { brightness: -100.0, ..Default::default() }, [0, 0, 0, 255]),
        (AdjustmentParams { contrast: 100.0, ..Default::default() }, [255, 0, 0, 255]),
    ];
    for (params, expected) in cases {
        let out = engine().composite_full(&red, &single(Edit::adjustment(params))).unwrap();
        assert_eq!(out, PixelBuffer::filled(3, 3, expected), "{params:?}");
    }

    let mixed = PixelBuffer::filled(1, 1, [10, 200, 250, 255]);
    let out = engine()
        .composite_full(
            &mixed,
            &single(Edit::adjustment(AdjustmentParams {
                contrast: 100.0,
                ..Default::default()
            })),
        )
        .unwrap();
    // ((c / 255 - 0.5) * 2 + 0.5) * 255: 10 -> -107.5, 200 -> 272.5, 250 -> 372.5
    assert_eq!(out.get(0, 0).unwrap(), [0, 255, 255, 255]);
}

#[test]
fn red_grayscale_scenario() {
    init_tracing();
    let original = PixelBuffer::filled(4, 4, [255, 0, 0, 255]);
    let out = engine()
        .composite_full(&original, &single(Edit::filter(FilterType::Grayscale, 100.0)))
        .unwrap();
    assert_eq!(out, PixelBuffer::filled(4, 4, [85, 85, 85, 255]));
}

#[test]
fn zero_rotation_scenario() {
    init_tracing();
    let original = test_pattern(10, 10);
    for resample in [Resample::Nearest, Resample::Bilinear] {
        let engine = CompositionEngine::new(CompositeOptions::default().with_resample(resample));
        let out = engine.composite_full(&original, &single(Edit::rotate(0.0))).unwrap();
        assert_eq!(out, original);
    }
}

#[test]
fn top_left_quadrant_crop_scenario() {
    init_tracing();
    let original = test_pattern(4, 4);
    let out = engine()
        .composite_full(&original, &single(Edit::crop(CropRect::new(0, 0, 2, 2))))
        .unwrap();
    assert_eq!(out.dimensions(), (2, 2));
    for y in 0..2 {
        let src = original.row(y).map(|r| &r[..8]);
        assert_eq!(out.row(y), src);
    }
}
