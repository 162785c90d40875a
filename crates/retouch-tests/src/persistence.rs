//! Stored histories: JSON shape and replay after reload.

use retouch_core::CropRect;
use retouch_edit::{CompositeOptions, CompositionEngine, Edit, EditHistory, EditKind, Timestamp};
use retouch_ops::{AdjustmentParams, FilterType, Resample};
use serde_json::json;

use crate::{buffer_digest, init_tracing, test_pattern};

fn sample_history() -> EditHistory {
    [
        Edit::crop(CropRect::new(1, 2, 10, 8)).with_created_at(Timestamp::from_millis(1_700_000_000_000)),
        Edit::rotate(12.0).with_created_at(Timestamp::from_millis(1_700_000_000_500)),
        Edit::filter(FilterType::Sepia, 55.0).with_created_at(Timestamp::from_millis(1_700_000_001_000)),
        Edit::adjustment(AdjustmentParams {
            brightness: -10.0,
            blur: 0.8,
            ..Default::default()
        })
        .with_created_at(Timestamp::from_millis(1_700_000_002_000)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn reloaded_history_composites_identically() {
    init_tracing();
    let original = test_pattern(14, 12);
    let history = sample_history();
    let stored = serde_json::to_string(&history).unwrap();
    let reloaded: EditHistory = serde_json::from_str(&stored).unwrap();

    assert_eq!(reloaded, history);
    let engine = CompositionEngine::default();
    assert_eq!(
        buffer_digest(&engine.composite_full(&original, &reloaded).unwrap()),
        buffer_digest(&engine.composite_full(&original, &history).unwrap())
    );
}

#[test]
fn history_is_a_plain_array_of_records() {
    let value = serde_json::to_value(sample_history()).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["type"], "crop");
    assert_eq!(
        records[0]["parameters"],
        json!({ "cropX": 1, "cropY": 2, "cropWidth": 10, "cropHeight": 8 })
    );
    assert_eq!(records[0]["description"], "Crop (10x8 from 1,2)");
    assert_eq!(records[1]["parameters"], json!({ "angle": 12.0 }));
    assert_eq!(records[2]["parameters"]["filterType"], "sepia");
    assert_eq!(records[3]["parameters"]["brightness"], -10.0);
    assert_eq!(records[3]["createdAt"], "2023-11-14T22:13:22.000Z");
}

#[test]
fn unknown_records_load_and_are_skipped() {
    init_tracing();
    let stored = json!([
        {
            "id": "a",
            "type": "filter",
            "parameters": { "filterType": "invert", "intensity": 100 },
            "createdAt": 10,
            "description": "Filter: Invert (100%)"
        },
        {
            "id": "b",
            "type": "perspective",
            "parameters": { "skew": 0.4 },
            "createdAt": 5,
            "description": "Perspective"
        }
    ]);
    let history: EditHistory = serde_json::from_value(stored).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.get("b").and_then(Edit::kind), None);
    assert_eq!(history.get("a").and_then(Edit::kind), Some(EditKind::Filter));

    let original = test_pattern(5, 5);
    let out = CompositionEngine::default().composite_full(&original, &history).unwrap();
    let inverted: Vec<u8> = original
        .samples()
        .chunks_exact(4)
        .flat_map(|px| [255 - px[0], 255 - px[1], 255 - px[2], px[3]])
        .collect();
    assert_eq!(out.samples(), inverted.as_slice());
}

#[test]
fn one_bad_filter_record_does_not_block_the_history() {
    init_tracing();
    let stored = json!([
        { "id": "a", "type": "filter", "parameters": { "filterType": "invert" }, "createdAt": 1 },
        { "id": "b", "type": "filter", "parameters": { "filterType": "posterize" }, "createdAt": 2 }
    ]);
    let history: EditHistory = serde_json::from_value(stored).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.get("b").and_then(Edit::kind), None);

    let original = test_pattern(6, 4);
    let out = CompositionEngine::default().composite_full(&original, &history).unwrap();
    let only_invert: EditHistory = [Edit::filter(FilterType::Invert, 100.0)].into_iter().collect();
    assert_eq!(out, CompositionEngine::default().composite_full(&original, &only_invert).unwrap());
}

#[test]
fn loads_histories_with_text_dates() {
    init_tracing();
    // Out of order on purpose: replay follows createdAt, not array order
    let stored = json!([
        {
            "id": "rot",
            "type": "rotate",
            "parameters": { "angle": 90 },
            "createdAt": "2024-05-01T10:00:05.000Z",
            "description": "Rotate (90°)"
        },
        {
            "id": "crop",
            "type": "crop",
            "parameters": { "cropX": 0, "cropY": 0, "cropWidth": 8, "cropHeight": 12 },
            "createdAt": "2024-05-01T10:00:00.000Z",
            "description": "Crop (8x12 from 0,0)"
        }
    ]);
    let history: EditHistory = serde_json::from_value(stored).unwrap();
    let order: Vec<&str> = history.ordered_for_replay().iter().map(|e| e.id()).collect();
    assert_eq!(order, ["crop", "rot"]);
    assert_eq!(
        history.get("crop").map(Edit::created_at),
        Some(Timestamp::from_millis(1_714_557_600_000))
    );

    let original = test_pattern(16, 12);
    let expected: EditHistory = [
        Edit::crop(CropRect::new(0, 0, 8, 12)).with_created_at(Timestamp::from_millis(1)),
        Edit::rotate(90.0).with_created_at(Timestamp::from_millis(2)),
    ]
    .into_iter()
    .collect();
    let engine = CompositionEngine::default();
    assert_eq!(
        engine.composite_full(&original, &history).unwrap(),
        engine.composite_full(&original, &expected).unwrap()
    );
}

#[test]
fn incomplete_crop_record_leaves_image_alone() {
    init_tracing();
    let stored = json!([{ "id": "c", "type": "crop", "parameters": { "cropX": 5, "cropY": 5 } }]);
    let history: EditHistory = serde_json::from_value(stored).unwrap();
    let original = test_pattern(16, 16);
    let out = CompositionEngine::default().composite_full(&original, &history).unwrap();
    assert_eq!(out, original);
}

#[test]
fn options_round_trip() {
    let options = CompositeOptions::default()
        .with_resample(Resample::Nearest)
        .with_blur_passes(5);
    let value = serde_json::to_value(options).unwrap();
    assert_eq!(value, json!({ "resample": "nearest", "blurPasses": 5 }));

    let partial: CompositeOptions = serde_json::from_value(json!({ "blurPasses": 2 })).unwrap();
    assert_eq!(partial.resample, Resample::Bilinear);
    assert_eq!(partial.blur_passes, 2);
}
