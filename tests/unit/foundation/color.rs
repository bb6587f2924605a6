use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::new(255, 0, 0, 255));

    let c: Rgba8 = serde_json::from_value(json!("0000FF80")).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 255, 128));

    assert!(serde_json::from_value::<Rgba8>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<Rgba8>(json!("#zz0000")).is_err());
}

#[test]
fn parses_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 10, "g": 20, "b": 30})).unwrap();
    assert_eq!(c, Rgba8::new(10, 20, 30, 255));

    let c: Rgba8 = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
    assert_eq!(c, Rgba8::new(1, 2, 3, 4));

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn hsv_primary_hues() {
    assert_eq!(hsv_to_rgba8(0.0, 1.0, 1.0), Rgba8::new(255, 0, 0, 255));
    assert_eq!(hsv_to_rgba8(120.0, 1.0, 1.0), Rgba8::new(0, 255, 0, 255));
    assert_eq!(hsv_to_rgba8(240.0, 1.0, 1.0), Rgba8::new(0, 0, 255, 255));
    assert_eq!(hsv_to_rgba8(360.0, 1.0, 1.0), Rgba8::new(255, 0, 0, 255));
}

#[test]
fn hsv_zero_saturation_is_gray() {
    let c = hsv_to_rgba8(200.0, 0.0, 0.5);
    assert_eq!(c.r, c.g);
    assert_eq!(c.g, c.b);
}
