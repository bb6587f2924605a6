use crate::foundation::error::{BrushError, BrushResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Output raster dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> BrushResult<Self> {
        if width == 0 || height == 0 {
            return Err(BrushError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Dimensions as `u16`, which is what the CPU rasterizer accepts.
    pub fn to_u16(self) -> BrushResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| BrushError::validation("canvas width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| BrushError::validation("canvas height exceeds u16"))?;
        Ok((w, h))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (not premultiplied into r/g/b).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black, the default ink.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Replace the alpha channel with `alpha` in `0..=1`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Wall-clock seconds since the Unix epoch, used for drawing and stroke creation times.
pub(crate) fn unix_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
