use crate::{
    foundation::error::BrushResult,
    foundation::math::unpremul_u8,
    geometry::primitive::DrawList,
    render::draw::{PrimitiveBackend, execute_draw_list},
};

/// A rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, four bytes per pixel.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored. `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Pixels converted to straight alpha, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let a = px[3];
            out.extend_from_slice(&[
                unpremul_u8(px[0], a),
                unpremul_u8(px[1], a),
                unpremul_u8(px[2], a),
                a,
            ]);
        }
        out
    }
}

pub trait RenderBackend: PrimitiveBackend {
    fn render(&mut self, list: &DrawList) -> BrushResult<FrameRGBA> {
        execute_draw_list(self, list)
    }

    /// Settings for building an identical backend on a worker thread.
    ///
    /// Backends that cannot be replicated return `None` and only render sequentially.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Cpu,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSettings {
    /// Straight-alpha background; transparent when unset.
    pub clear_rgba: Option<[u8; 4]>,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> BrushResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
