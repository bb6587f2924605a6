use crate::{
    capture::controller::{CaptureController, CaptureOutcome, PointerEvent},
    capture::repaint::{NoRepaint, RepaintRequester},
    capture::snap::SnapCorrector,
    config::BrushConfig,
    foundation::core::{Canvas, unix_time_secs},
    foundation::error::BrushResult,
    geometry::engine::StrokeEngine,
    geometry::primitive::DrawList,
    render::backend::{BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend},
    stroke::model::Drawing,
};

/// Everything one capture session needs: controller, stroke engine and render backend.
///
/// Constructed explicitly and owned by the host; [`CaptureSession::finish`] hands the drawing
/// off for persistence.
pub struct CaptureSession<R = NoRepaint> {
    controller: CaptureController<R>,
    engine: StrokeEngine,
    backend: Box<dyn RenderBackend>,
    canvas: Canvas,
}

impl CaptureSession<NoRepaint> {
    /// Session without a repaint hook.
    pub fn headless(
        config: &BrushConfig,
        canvas: Canvas,
        settings: &RenderSettings,
    ) -> BrushResult<Self> {
        Self::new(config, canvas, settings, NoRepaint)
    }
}

impl<R: RepaintRequester> CaptureSession<R> {
    pub fn new(
        config: &BrushConfig,
        canvas: Canvas,
        settings: &RenderSettings,
        repaint: R,
    ) -> BrushResult<Self> {
        config.validate()?;
        Ok(Self {
            controller: CaptureController::new(config.width, unix_time_secs(), repaint),
            engine: StrokeEngine::from_config(config),
            backend: create_backend(BackendKind::Cpu, settings)?,
            canvas,
        })
    }

    /// Trace mode: captured positions are corrected toward `reference`.
    pub fn with_reference(mut self, reference: &Drawing, config: &BrushConfig) -> Self {
        self.controller = self
            .controller
            .with_snap(SnapCorrector::new(reference, config.snap));
        self
    }

    pub fn handle(&mut self, event: &PointerEvent) -> CaptureOutcome {
        self.controller.handle(event)
    }

    /// Committed strokes followed by the stroke in progress.
    pub fn draw_list(&self) -> DrawList {
        let mut list = self
            .engine
            .compile_drawing(self.controller.drawing(), self.canvas);
        if let Some(active) = self.controller.active_stroke() {
            self.engine
                .emit_points(active.points(), &mut list.primitives);
        }
        list
    }

    #[tracing::instrument(skip_all)]
    pub fn render(&mut self) -> BrushResult<FrameRGBA> {
        let list = self.draw_list();
        self.backend.render(&list)
    }

    pub fn clear(&mut self) {
        self.controller.clear();
    }

    pub fn drawing(&self) -> &Drawing {
        self.controller.drawing()
    }

    pub fn engine(&self) -> &StrokeEngine {
        &self.engine
    }

    /// End the session and take ownership of the committed drawing.
    pub fn finish(self) -> Drawing {
        self.controller.into_drawing()
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
