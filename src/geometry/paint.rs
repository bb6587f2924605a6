use crate::{
    foundation::color::hsv_to_rgba8,
    foundation::core::Rgba8,
    foundation::error::{BrushError, BrushResult},
    foundation::math::{clamp01, lerp},
};

/// How segment colors are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Every primitive uses the ink color.
    #[default]
    Solid,
    /// Speed mapped onto a blue (slow) to red (fast) hue.
    Heatmap,
    /// Ink color with alpha falling off as speed rises.
    SpeedAlpha,
}

/// Heatmap hue curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapParams {
    /// Speed mapped to the fast hue.
    pub max_speed: f64,
    /// Power applied to normalized speed before the hue lerp.
    pub sensitivity: f64,
    /// Hue in degrees at speed 0.
    pub slow_hue: f64,
    /// Hue in degrees at `max_speed` and above.
    pub fast_hue: f64,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            max_speed: 1000.0,
            sensitivity: 0.6,
            slow_hue: 240.0,
            fast_hue: 0.0,
        }
    }
}

/// Linear alpha ramp between two speeds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeedAlphaParams {
    /// At or below this speed alpha is `max_alpha`.
    pub slow_speed: f64,
    /// At or above this speed alpha is `min_alpha`.
    pub fast_speed: f64,
    pub max_alpha: f64,
    pub min_alpha: f64,
}

impl Default for SpeedAlphaParams {
    fn default() -> Self {
        Self {
            slow_speed: 100.0,
            fast_speed: 500.0,
            max_alpha: 1.0,
            min_alpha: 0.3,
        }
    }
}

/// Color section of the brush configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaintConfig {
    pub mode: ColorMode,
    /// Base ink color for `Solid` and `SpeedAlpha`.
    pub ink: Rgba8,
    pub heatmap: HeatmapParams,
    pub speed_alpha: SpeedAlphaParams,
}

impl PaintConfig {
    /// Same config with a different mode.
    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Color for a primitive whose motion is described by `speed`.
    pub fn color_for_speed(&self, speed: f64) -> Rgba8 {
        match self.mode {
            ColorMode::Solid => self.ink,
            ColorMode::Heatmap => hsv_to_rgba8(heatmap_hue(speed, &self.heatmap), 1.0, 1.0),
            ColorMode::SpeedAlpha => {
                let alpha = speed_alpha(speed, &self.speed_alpha);
                self.ink.with_alpha(alpha * f64::from(self.ink.a) / 255.0)
            }
        }
    }

    pub(crate) fn validate(&self) -> BrushResult<()> {
        let h = &self.heatmap;
        if !h.max_speed.is_finite() || h.max_speed <= 0.0 {
            return Err(BrushError::validation("paint.heatmap.max_speed must be > 0"));
        }
        if !h.sensitivity.is_finite() || h.sensitivity <= 0.0 {
            return Err(BrushError::validation("paint.heatmap.sensitivity must be > 0"));
        }
        let a = &self.speed_alpha;
        if !a.slow_speed.is_finite() || !a.fast_speed.is_finite() || a.fast_speed <= a.slow_speed
        {
            return Err(BrushError::validation(
                "paint.speed_alpha.fast_speed must be > slow_speed",
            ));
        }
        for (name, v) in [("max_alpha", a.max_alpha), ("min_alpha", a.min_alpha)] {
            if !(0.0..=1.0).contains(&v) {
                return Err(BrushError::validation(format!(
                    "paint.speed_alpha.{name} must be within [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Heatmap hue in degrees: `slow_hue` at rest, `fast_hue` at `max_speed` and beyond.
pub fn heatmap_hue(speed: f64, params: &HeatmapParams) -> f64 {
    let normalized = clamp01(speed / params.max_speed);
    let curved = normalized.powf(params.sensitivity);
    lerp(params.slow_hue, params.fast_hue, curved)
}

/// Alpha in `[min_alpha, max_alpha]`; slower strokes are more opaque.
pub fn speed_alpha(speed: f64, params: &SpeedAlphaParams) -> f64 {
    let normalized =
        clamp01((speed - params.slow_speed) / (params.fast_speed - params.slow_speed));
    params.max_alpha - normalized * (params.max_alpha - params.min_alpha)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/paint.rs"]
mod tests;
