use super::*;
use crate::geometry::paint::ColorMode;

#[test]
fn empty_object_is_reference_tuning() {
    let cfg = BrushConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, BrushConfig::default());
    assert_eq!(cfg.width.min_width, 16.0);
    assert_eq!(cfg.width.max_width, 100.0);
    assert_eq!(cfg.taper.speed_threshold, 500.0);
    assert_eq!(cfg.taper.min_segments_for_taper, 3);
    assert_eq!(cfg.snap.snap_distance, 30.0);
    assert_eq!(cfg.snap.correction_strength, 0.7);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = BrushConfig::from_json_str(
        r#"{ "paint": { "mode": "heatmap" }, "taper": { "speed_threshold": 650.0 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.paint.mode, ColorMode::Heatmap);
    assert_eq!(cfg.taper.speed_threshold, 650.0);
    assert_eq!(cfg.taper.base_extension, 30.0);
    assert_eq!(cfg.width, WidthModel::default());
}

#[test]
fn unknown_sections_are_rejected() {
    assert!(BrushConfig::from_json_str(r#"{ "colour": {} }"#).is_err());
}

#[test]
fn invalid_values_fail_validation() {
    let err = BrushConfig::from_json_str(r#"{ "snap": { "correction_strength": 1.5 } }"#)
        .unwrap_err();
    assert!(matches!(err, BrushError::Validation(_)));

    let err = BrushConfig::from_json_str(r#"{ "width": { "exponent": 0.0 } }"#).unwrap_err();
    assert!(matches!(err, BrushError::Validation(_)));
}
