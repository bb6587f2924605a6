use super::*;
use crate::{geometry::primitive::DrawList, render::draw::execute_draw_list};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn white_backend() -> CpuBackend {
    CpuBackend::new(RenderSettings {
        clear_rgba: Some(WHITE),
    })
}

fn list(primitives: Vec<Primitive>) -> DrawList {
    let mut list = DrawList::new(Canvas::new(32, 32).unwrap());
    list.primitives = primitives;
    list
}

#[test]
fn empty_list_is_background() {
    let frame = white_backend().render(&list(vec![])).unwrap();
    assert_eq!((frame.width, frame.height), (32, 32));
    assert_eq!(frame.data.len(), 32 * 32 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some(WHITE));
    assert_eq!(frame.pixel(31, 31), Some(WHITE));
}

#[test]
fn transparent_without_clear_color() {
    let frame = CpuBackend::new(RenderSettings::default())
        .render(&list(vec![]))
        .unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn segment_covers_its_centerline() {
    let frame = white_backend()
        .render(&list(vec![Primitive::Segment {
            from: Point::new(4.0, 16.0),
            to: Point::new(28.0, 16.0),
            width: 6.0,
            color: Rgba8::BLACK,
        }]))
        .unwrap();
    assert_eq!(frame.pixel(16, 16), Some(BLACK));
    assert_eq!(frame.pixel(16, 2), Some(WHITE));
}

#[test]
fn polygon_and_disc_are_filled() {
    let red = Rgba8::new(255, 0, 0, 255);
    let frame = white_backend()
        .render(&list(vec![
            Primitive::Polygon {
                points: vec![
                    Point::new(0.0, 0.0),
                    Point::new(12.0, 0.0),
                    Point::new(12.0, 12.0),
                    Point::new(0.0, 12.0),
                ],
                color: red,
            },
            Primitive::Disc {
                center: Point::new(24.0, 24.0),
                diameter: 10.0,
                color: Rgba8::BLACK,
            },
        ]))
        .unwrap();
    assert_eq!(frame.pixel(5, 5), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(24, 24), Some(BLACK));
    assert_eq!(frame.pixel(5, 24), Some(WHITE));
}

#[test]
fn zero_length_segment_draws_nothing() {
    let p = Point::new(16.0, 16.0);
    let frame = white_backend()
        .render(&list(vec![Primitive::Segment {
            from: p,
            to: p,
            width: 8.0,
            color: Rgba8::BLACK,
        }]))
        .unwrap();
    assert_eq!(frame.pixel(16, 16), Some(WHITE));
}

#[test]
fn backend_is_reusable_across_sizes() {
    let mut backend = white_backend();
    let a = execute_draw_list(&mut backend, &list(vec![])).unwrap();
    let small = DrawList::new(Canvas::new(8, 4).unwrap());
    let b = execute_draw_list(&mut backend, &small).unwrap();
    let c = execute_draw_list(&mut backend, &list(vec![])).unwrap();
    assert_eq!(b.data.len(), 8 * 4 * 4);
    assert_eq!(a, c);
}

#[test]
fn draw_before_begin_is_an_error() {
    let mut backend = white_backend();
    let err = backend
        .draw(&Primitive::Disc {
            center: Point::new(1.0, 1.0),
            diameter: 1.0,
            color: Rgba8::BLACK,
        })
        .unwrap_err();
    assert!(matches!(err, BrushError::Render(_)));
}

#[test]
fn oversized_canvas_is_rejected() {
    let mut backend = white_backend();
    let canvas = Canvas::new(70_000, 10).unwrap();
    assert!(backend.begin(canvas).is_err());
}
