use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(
        Canvas::new(3, 4).unwrap(),
        Canvas {
            width: 3,
            height: 4
        }
    );
}

#[test]
fn canvas_u16_bounds() {
    assert_eq!(Canvas::new(640, 480).unwrap().to_u16().unwrap(), (640, 480));
    assert!(Canvas::new(70_000, 10).unwrap().to_u16().is_err());
}

#[test]
fn with_alpha_clamps_and_rounds() {
    assert_eq!(Rgba8::BLACK.with_alpha(0.5).a, 128);
    assert_eq!(Rgba8::BLACK.with_alpha(2.0).a, 255);
    assert_eq!(Rgba8::BLACK.with_alpha(-1.0).a, 0);
}
