use crate::{
    config::BrushConfig,
    foundation::core::{Canvas, Point},
    foundation::math::midpoint_width,
    geometry::classify::{
        Hold, HoldConfig, TaperConfig, TaperRegion, classify_taper, detect_holds, taper_polygon,
    },
    geometry::paint::PaintConfig,
    geometry::primitive::{DrawList, Primitive},
    stroke::model::{Drawing, Stroke},
    stroke::sample::SamplePoint,
};

/// Turns strokes into drawable primitives.
///
/// Shared by live capture, trace correction and playback so every view renders a stroke
/// identically.
#[derive(Clone, Debug, Default)]
pub struct StrokeEngine {
    paint: PaintConfig,
    taper: TaperConfig,
    hold: HoldConfig,
}

/// Classification summary of one stroke.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokeAnalysis {
    pub points: usize,
    pub taper: Option<TaperRegion>,
    pub holds: Vec<Hold>,
    pub max_speed: f64,
}

impl StrokeEngine {
    pub fn new(paint: PaintConfig, taper: TaperConfig, hold: HoldConfig) -> Self {
        Self { paint, taper, hold }
    }

    pub fn from_config(config: &BrushConfig) -> Self {
        Self::new(config.paint, config.taper, config.hold)
    }

    pub fn paint(&self) -> &PaintConfig {
        &self.paint
    }

    /// Same engine with a different paint configuration.
    pub fn with_paint(mut self, paint: PaintConfig) -> Self {
        self.paint = paint;
        self
    }

    /// Append the primitives for one stroke's points to `out`.
    ///
    /// Every adjacent pair of points is covered exactly once, either by a segment or by
    /// the taper polygon. A lone point becomes a disc.
    pub fn emit_points(&self, points: &[SamplePoint], out: &mut Vec<Primitive>) {
        match points {
            [] => {}
            [only] => out.push(Primitive::Disc {
                center: only.position,
                diameter: only.computed_width,
                color: self.paint.color_for_speed(only.speed),
            }),
            _ => {
                let taper = self.taper_for(points);
                for i in 0..points.len() - 1 {
                    if let Some((region, quad)) = &taper
                        && region.contains(i)
                    {
                        if i == region.first() {
                            let end = &points[region.last() + 1];
                            out.push(Primitive::Polygon {
                                points: quad.to_vec(),
                                color: self.paint.color_for_speed(end.speed),
                            });
                        }
                        continue;
                    }

                    let (a, b) = (&points[i], &points[i + 1]);
                    out.push(Primitive::Segment {
                        from: a.position,
                        to: b.position,
                        width: midpoint_width(a.computed_width, b.computed_width),
                        color: self.paint.color_for_speed(b.speed),
                    });
                }
            }
        }
    }

    fn taper_for(&self, points: &[SamplePoint]) -> Option<(TaperRegion, [Point; 4])> {
        let region = classify_taper(points, &self.taper)?;
        match taper_polygon(points, &region, &self.taper) {
            Some(quad) => Some((region, quad)),
            None => {
                tracing::debug!(
                    first = region.first(),
                    last = region.last(),
                    "degenerate taper region; drawing plain segments"
                );
                None
            }
        }
    }

    /// Primitives for a single stroke.
    pub fn stroke_primitives(&self, stroke: &Stroke) -> Vec<Primitive> {
        let mut out = Vec::with_capacity(stroke.len());
        self.emit_points(stroke.points(), &mut out);
        out
    }

    /// Primitives for every stroke of `drawing`, in stroke order.
    #[tracing::instrument(skip_all, fields(strokes = drawing.strokes().len()))]
    pub fn compile_drawing(&self, drawing: &Drawing, canvas: Canvas) -> DrawList {
        let mut list = DrawList::new(canvas);
        list.primitives.reserve(drawing.point_count());
        for stroke in drawing.strokes() {
            self.emit_points(stroke.points(), &mut list.primitives);
        }
        list
    }

    /// Taper region, holds and peak speed of one stroke.
    pub fn analyze(&self, stroke: &Stroke) -> StrokeAnalysis {
        let points = stroke.points();
        StrokeAnalysis {
            points: points.len(),
            taper: classify_taper(points, &self.taper),
            holds: detect_holds(points, &self.hold),
            max_speed: points.iter().map(|p| p.speed).fold(0.0, f64::max),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/engine.rs"]
mod tests;
