use crate::{
    foundation::core::Canvas,
    foundation::error::BrushResult,
    geometry::primitive::{DrawList, Primitive},
    render::backend::FrameRGBA,
};

/// Low-level drawing surface driven by [`execute_draw_list`].
pub trait PrimitiveBackend {
    /// Prepare a cleared target of the given size.
    fn begin(&mut self, canvas: Canvas) -> BrushResult<()>;

    fn draw(&mut self, primitive: &Primitive) -> BrushResult<()>;

    /// Rasterize everything drawn since `begin` and read the pixels back.
    fn finish(&mut self) -> BrushResult<FrameRGBA>;
}

/// Draw every primitive of `list` in order and return the finished frame.
pub fn execute_draw_list<B: PrimitiveBackend + ?Sized>(
    backend: &mut B,
    list: &DrawList,
) -> BrushResult<FrameRGBA> {
    backend.begin(list.canvas)?;
    for primitive in &list.primitives {
        backend.draw(primitive)?;
    }
    backend.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
