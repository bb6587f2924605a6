use super::*;

fn stroke_with_speeds(speeds: &[f64]) -> Vec<SamplePoint> {
    speeds
        .iter()
        .enumerate()
        .map(|(i, &speed)| SamplePoint {
            position: Point::new(10.0 * i as f64, 0.0),
            timestamp: 0.01 * i as f64,
            pressure: 1.0,
            speed,
            computed_width: 20.0,
            tilt_altitude: std::f64::consts::FRAC_PI_2,
            tilt_azimuth: 0.0,
            azimuth_unit: Vec2::new(1.0, 0.0),
        })
        .collect()
}

#[test]
fn no_fast_points_means_no_taper() {
    let pts = stroke_with_speeds(&[0.0, 100.0, 200.0, 300.0, 400.0]);
    assert!(flagged_segments(&pts, &TaperConfig::default()).is_empty());
    assert_eq!(classify_taper(&pts, &TaperConfig::default()), None);
}

#[test]
fn only_last_segment_fast_flags_it_and_its_predecessor() {
    for len in 4..10 {
        let mut speeds = vec![50.0; len];
        speeds[0] = 0.0;
        speeds[len - 1] = 800.0;
        let pts = stroke_with_speeds(&speeds);
        let flagged = flagged_segments(&pts, &TaperConfig::default());
        assert_eq!(flagged.len(), 2, "len {len}");
        assert!(flagged.contains(&(len - 2)));
        assert!(flagged.contains(&(len - 3)));
    }
}

#[test]
fn fast_points_outside_the_window_are_ignored() {
    let pts = stroke_with_speeds(&[0.0, 900.0, 900.0, 50.0, 50.0, 50.0]);
    assert!(flagged_segments(&pts, &TaperConfig::default()).is_empty());
}

#[test]
fn reference_release_yields_two_segment_region() {
    let pts = stroke_with_speeds(&[0.0, 50.0, 80.0, 600.0, 650.0]);
    let region = classify_taper(&pts, &TaperConfig::default()).unwrap();
    assert_eq!(region, TaperRegion::new([2, 3]).unwrap());
    assert_eq!(region.segment_count(), 2);
    assert!(!region.contains(1));
}

#[test]
fn wide_window_keeps_gaps_between_flagged_segments() {
    let cfg = TaperConfig {
        min_segments_for_taper: 6,
        ..TaperConfig::default()
    };
    let pts = stroke_with_speeds(&[0.0, 50.0, 900.0, 50.0, 50.0, 50.0, 900.0]);
    let region = classify_taper(&pts, &cfg).unwrap();
    assert_eq!(region.segments(), &[1, 4, 5]);
    assert_eq!((region.first(), region.last()), (1, 5));
    assert!(!region.contains(2));
    assert!(!region.contains(3));
    assert_eq!(region.segment_count(), 3);
}

#[test]
fn short_strokes() {
    let cfg = TaperConfig::default();
    assert!(flagged_segments(&stroke_with_speeds(&[0.0]), &cfg).is_empty());
    let two = stroke_with_speeds(&[0.0, 700.0]);
    assert_eq!(classify_taper(&two, &cfg), TaperRegion::new([0]));
}

#[test]
fn polygon_corners_follow_direction_and_extension() {
    let pts = stroke_with_speeds(&[0.0, 50.0, 80.0, 600.0, 1200.0]);
    let cfg = TaperConfig::default();
    let region = classify_taper(&pts, &cfg).unwrap();
    let quad = taper_polygon(&pts, &region, &cfg).unwrap();

    // start = (20, 0), end = (40, 0), direction +x, perp +y.
    assert_eq!(quad[0], Point::new(20.0, 10.0));
    assert!((quad[1].x - 40.0).abs() < 1e-9);
    assert!((quad[1].y - 2.0).abs() < 1e-9);
    // Speed 1200 saturates the ratio: 30 + 50.
    assert!((quad[2].x - 120.0).abs() < 1e-9);
    assert!(quad[2].y.abs() < 1e-9);
    assert_eq!(quad[3], Point::new(20.0, -10.0));
}

#[test]
fn extension_scales_with_release_speed() {
    let cfg = TaperConfig::default();
    let pts = stroke_with_speeds(&[0.0, 50.0, 80.0, 600.0, 750.0]);
    let region = classify_taper(&pts, &cfg).unwrap();
    let quad = taper_polygon(&pts, &region, &cfg).unwrap();
    // 30 + (250 / 500) * 50 = 55 past the end point at x = 40.
    assert!((quad[2].x - 95.0).abs() < 1e-9);
}

#[test]
fn zero_distance_taper_is_degenerate() {
    let mut pts = stroke_with_speeds(&[0.0, 50.0, 80.0, 600.0, 650.0]);
    for p in &mut pts {
        p.position = Point::new(5.0, 5.0);
    }
    let cfg = TaperConfig::default();
    let region = classify_taper(&pts, &cfg).unwrap();
    assert_eq!(taper_polygon(&pts, &region, &cfg), None);
}

#[test]
fn holds_require_minimum_duration() {
    // timestamps step 0.01s; 40 slow points span 0.39s.
    let mut speeds = vec![300.0; 60];
    for s in speeds.iter_mut().take(50).skip(10) {
        *s = 5.0;
    }
    let pts = stroke_with_speeds(&speeds);
    let holds = detect_holds(&pts, &HoldConfig::default());
    assert_eq!(holds.len(), 1);
    assert_eq!(holds[0].first, 10);
    assert_eq!(holds[0].last, 49);
    assert!((holds[0].duration - 0.39).abs() < 1e-9);

    let short = detect_holds(
        &pts,
        &HoldConfig {
            min_duration: 0.5,
            ..HoldConfig::default()
        },
    );
    assert!(short.is_empty());
}

#[test]
fn trailing_hold_is_closed_at_stroke_end() {
    let mut speeds = vec![300.0; 5];
    speeds.extend(std::iter::repeat_n(0.0, 40));
    let pts = stroke_with_speeds(&speeds);
    let holds = detect_holds(&pts, &HoldConfig::default());
    assert_eq!(holds.len(), 1);
    assert_eq!(holds[0].last, 44);
}

#[test]
fn taper_config_validation() {
    assert!(TaperConfig::default().validate().is_ok());
    let cfg = TaperConfig {
        speed_ratio_span: 0.0,
        ..TaperConfig::default()
    };
    assert!(cfg.validate().is_err());
}
