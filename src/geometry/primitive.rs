use crate::foundation::core::{Canvas, Point, Rgba8};

/// One drawable item emitted by the stroke engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Straight line with round caps and joins.
    Segment {
        from: Point,
        to: Point,
        width: f64,
        color: Rgba8,
    },
    /// Closed filled polygon (taper quadrilaterals).
    Polygon { points: Vec<Point>, color: Rgba8 },
    /// Filled circle, used for single-point strokes.
    Disc {
        center: Point,
        diameter: f64,
        color: Rgba8,
    },
}

/// Primitives for one paint cycle, in emission order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DrawList {
    pub canvas: Canvas,
    pub primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            primitives: Vec::new(),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Segment { .. }))
    }

    pub fn polygon_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Polygon { .. }))
    }

    pub fn disc_count(&self) -> usize {
        self.count(|p| matches!(p, Primitive::Disc { .. }))
    }

    fn count(&self, pred: impl Fn(&Primitive) -> bool) -> usize {
        self.primitives.iter().filter(|p| pred(p)).count()
    }
}
