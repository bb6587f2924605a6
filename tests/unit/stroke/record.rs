use super::*;
use serde_json::json;

#[test]
fn record_uses_flat_camel_case_keys() {
    let p = SamplePoint {
        position: Point::new(1.0, 2.0),
        timestamp: 0.25,
        pressure: 0.5,
        speed: 120.0,
        computed_width: 40.0,
        tilt_altitude: 0.8,
        tilt_azimuth: 0.3,
        azimuth_unit: Vec2::new(0.6, 0.8),
    };
    let stroke = Stroke::from_points(vec![p], 0.25).unwrap();
    let drawing = Drawing::from_strokes(vec![stroke], 0.0).unwrap();

    let v = serde_json::to_value(drawing.to_record()).unwrap();
    let point = &v["strokes"][0]["points"][0];
    assert_eq!(point["x"], json!(1.0));
    assert_eq!(point["tiltX"], json!(0.6));
    assert_eq!(point["tiltY"], json!(0.8));
    assert_eq!(point["brushWidth"], json!(40.0));
    assert_eq!(point["altitude"], json!(0.8));
    assert_eq!(point["azimuth"], json!(0.3));
    assert_eq!(point["speed"], json!(120.0));
    assert_eq!(v["strokes"][0]["createdAt"], json!(0.25));
}

#[test]
fn from_json_rejects_empty_stroke() {
    let err = Drawing::from_json_str(r#"{"strokes":[{"points":[]}]}"#).unwrap_err();
    assert!(err.to_string().contains("stroke 0"));
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = Drawing::from_json_str("{").unwrap_err();
    assert!(matches!(err, BrushError::Serde(_)));
}

#[test]
fn json_round_trip_preserves_drawing() {
    let json = r#"{
      "createdAt": 10.0,
      "strokes": [{
        "createdAt": 11.0,
        "points": [
          {"x":0,"y":0,"pressure":1,"timestamp":11.0,"tiltX":1,"tiltY":0,"azimuth":0,"altitude":1.5,"brushWidth":17,"speed":0},
          {"x":5,"y":0,"pressure":1,"timestamp":11.1,"tiltX":1,"tiltY":0,"azimuth":0,"altitude":1.5,"brushWidth":17,"speed":50}
        ]
      }]
    }"#;
    let d = Drawing::from_json_str(json).unwrap();
    assert_eq!(d.created_at(), 10.0);
    assert_eq!(d.strokes()[0].len(), 2);
    let again = Drawing::from_json_str(&d.to_json_string().unwrap()).unwrap();
    assert_eq!(again, d);
}
