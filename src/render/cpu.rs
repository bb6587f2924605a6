use kurbo::Shape;

use crate::{
    foundation::core::{BezPath, Canvas, Point, Rgba8},
    foundation::error::{BrushError, BrushResult},
    foundation::math::is_finite_point,
    geometry::primitive::Primitive,
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::draw::PrimitiveBackend,
};

/// Software rasterizer built on `vello_cpu`.
///
/// Produces premultiplied RGBA8 frames. The render context is kept between frames and only
/// rebuilt when the canvas size changes.
pub struct CpuBackend {
    settings: RenderSettings,
    target: Option<CpuTarget>,
}

struct CpuTarget {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            target: None,
        }
    }

    fn target_mut(&mut self) -> BrushResult<&mut CpuTarget> {
        self.target
            .as_mut()
            .ok_or_else(|| BrushError::render("draw called before begin"))
    }
}

impl PrimitiveBackend for CpuBackend {
    fn begin(&mut self, canvas: Canvas) -> BrushResult<()> {
        let (width, height) = canvas.to_u16()?;
        match &mut self.target {
            Some(t) if t.width == width && t.height == height => {
                t.ctx.reset();
                t.canvas = canvas;
            }
            _ => {
                self.target = Some(CpuTarget {
                    canvas,
                    width,
                    height,
                    ctx: vello_cpu::RenderContext::new(width, height),
                });
            }
        }

        let clear = self.settings.clear_rgba;
        let t = self.target_mut()?;
        t.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        if let Some([r, g, b, a]) = clear
            && a > 0
        {
            t.ctx
                .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            t.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }
        Ok(())
    }

    fn draw(&mut self, primitive: &Primitive) -> BrushResult<()> {
        let t = self.target_mut()?;
        draw_primitive(&mut t.ctx, primitive);
        Ok(())
    }

    fn finish(&mut self) -> BrushResult<FrameRGBA> {
        let t = self.target_mut()?;
        let mut pixmap = vello_cpu::Pixmap::new(t.width, t.height);
        t.ctx.flush();
        t.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: t.canvas.width,
            height: t.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl RenderBackend for CpuBackend {
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn draw_primitive(ctx: &mut vello_cpu::RenderContext, primitive: &Primitive) {
    match primitive {
        Primitive::Segment {
            from,
            to,
            width,
            color,
        } => {
            if !is_finite_point(*from) || !is_finite_point(*to) || !width.is_finite() {
                tracing::debug!("skipping non-finite segment");
                return;
            }
            if from == to || *width <= 0.0 {
                tracing::debug!(x = from.x, y = from.y, "skipping zero-length segment");
                return;
            }
            let mut path = BezPath::new();
            path.move_to(*from);
            path.line_to(*to);
            ctx.set_paint(paint_for(*color));
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(*width)
                    .with_caps(vello_cpu::kurbo::Cap::Round)
                    .with_join(vello_cpu::kurbo::Join::Round),
            );
            ctx.stroke_path(&bezpath_to_cpu(&path));
        }
        Primitive::Polygon { points, color } => {
            if points.len() < 3 || !points.iter().all(|p| is_finite_point(*p)) {
                tracing::debug!(points = points.len(), "skipping degenerate polygon");
                return;
            }
            ctx.set_paint(paint_for(*color));
            ctx.fill_path(&bezpath_to_cpu(&polygon_path(points)));
        }
        Primitive::Disc {
            center,
            diameter,
            color,
        } => {
            if !is_finite_point(*center) || !diameter.is_finite() || *diameter <= 0.0 {
                tracing::debug!("skipping degenerate disc");
                return;
            }
            let circle = kurbo::Circle::new(*center, diameter * 0.5);
            let path = circle.to_path(0.1);
            ctx.set_paint(paint_for(*color));
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
    }
}

fn paint_for(color: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
