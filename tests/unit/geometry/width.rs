use super::*;

#[test]
fn endpoints_match_min_and_max() {
    let m = WidthModel::default();
    assert!((m.width_for_altitude(0.0) - 100.0).abs() < 1e-9);
    assert!((m.width_for_altitude(FRAC_PI_2) - 16.0).abs() < 1e-9);
}

#[test]
fn width_is_non_increasing_in_altitude() {
    let m = WidthModel::default();
    let mut prev = f64::INFINITY;
    for i in 0..=200 {
        let a = FRAC_PI_2 * (i as f64) / 200.0;
        let w = m.width_for_altitude(a);
        assert!(w <= prev + 1e-12, "width rose at altitude {a}");
        prev = w;
    }
}

#[test]
fn midpoint_uses_exponent_curve() {
    let m = WidthModel::default();
    let expected = 16.0 + 84.0 * (1.0 - 0.5f64.powf(1.5));
    assert!((m.width_for_altitude(FRAC_PI_2 / 2.0) - expected).abs() < 1e-9);
}

#[test]
fn out_of_range_altitudes_clamp() {
    let m = WidthModel::default();
    assert_eq!(m.width_for_altitude(-1.0), m.width_for_altitude(0.0));
    assert_eq!(m.width_for_altitude(5.0), m.width_for_altitude(FRAC_PI_2));
    assert_eq!(m.width_for_altitude(f64::NAN), m.width_for_altitude(FRAC_PI_2));
}

#[test]
fn validate_rejects_inverted_range() {
    assert!(WidthModel::default().validate().is_ok());
    let m = WidthModel {
        min_width: 50.0,
        max_width: 10.0,
        exponent: 1.5,
    };
    assert!(m.validate().is_err());
}
