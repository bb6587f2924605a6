use super::*;
use crate::{
    capture::repaint::RepaintCounter,
    foundation::core::Point,
    geometry::primitive::Primitive,
    stroke::sample::PointerSample,
};

fn at(x: f64, y: f64, t: f64) -> PointerSample {
    PointerSample::at(Point::new(x, y), t)
}

fn session() -> CaptureSession {
    CaptureSession::headless(
        &BrushConfig::default(),
        Canvas::new(64, 64).unwrap(),
        &RenderSettings {
            clear_rgba: Some([255, 255, 255, 255]),
        },
    )
    .unwrap()
}

#[test]
fn draw_list_includes_stroke_in_progress() {
    let mut s = session();
    s.handle(&PointerEvent::down(at(10.0, 10.0, 0.0)));
    s.handle(&PointerEvent::up(at(10.0, 10.0, 0.1)));
    s.handle(&PointerEvent::down(at(20.0, 20.0, 0.2)));
    s.handle(&PointerEvent::moved(at(30.0, 20.0, 0.3)));

    let list = s.draw_list();
    assert_eq!(list.disc_count(), 1);
    assert_eq!(list.segment_count(), 1);
    assert!(matches!(list.primitives[0], Primitive::Disc { .. }));
    assert_eq!(s.drawing().strokes().len(), 1);
}

#[test]
fn render_draws_on_background() {
    let mut s = session();
    s.handle(&PointerEvent::down(at(32.0, 32.0, 0.0)));
    let frame = s.render().unwrap();
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(32, 32), Some([0, 0, 0, 255]));
}

#[test]
fn finish_hands_off_committed_strokes() {
    let mut s = session();
    s.handle(&PointerEvent::down(at(1.0, 1.0, 0.0)));
    s.handle(&PointerEvent::moved(at(2.0, 1.0, 0.1)));
    s.handle(&PointerEvent::up(at(2.0, 1.0, 0.2)));
    s.handle(&PointerEvent::down(at(5.0, 5.0, 0.3)));
    let drawing = s.finish();
    assert_eq!(drawing.strokes().len(), 1);
    assert_eq!(drawing.point_count(), 2);
}

#[test]
fn clear_empties_the_canvas() {
    let mut s = session();
    s.handle(&PointerEvent::down(at(1.0, 1.0, 0.0)));
    s.handle(&PointerEvent::up(at(1.0, 1.0, 0.1)));
    s.clear();
    assert!(s.draw_list().primitives.is_empty());
}

#[test]
fn repaint_hook_is_forwarded() {
    let counter = RepaintCounter::default();
    let mut s = CaptureSession::new(
        &BrushConfig::default(),
        Canvas::new(8, 8).unwrap(),
        &RenderSettings::default(),
        || counter.request_repaint(),
    )
    .unwrap();
    s.handle(&PointerEvent::down(at(1.0, 1.0, 0.0)));
    s.handle(&PointerEvent::moved(at(2.0, 1.0, 0.1)));
    assert_eq!(counter.count(), 2);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = BrushConfig::default();
    config.width.min_width = 200.0;
    let canvas = Canvas::new(8, 8).unwrap();
    let err = CaptureSession::headless(&config, canvas, &RenderSettings::default());
    assert!(err.is_err());
}

#[test]
fn reference_enables_snapping() {
    let mut reference = session();
    reference.handle(&PointerEvent::down(at(10.0, 10.0, 0.0)));
    reference.handle(&PointerEvent::up(at(10.0, 10.0, 0.1)));
    let reference = reference.finish();

    let config = BrushConfig::default();
    let mut s = session().with_reference(&reference, &config);
    s.handle(&PointerEvent::down(at(20.0, 10.0, 0.0)));
    let list = s.draw_list();
    let Primitive::Disc { center, .. } = &list.primitives[0] else {
        panic!("expected disc");
    };
    assert!((center.x - 13.0).abs() < 1e-9);
}
