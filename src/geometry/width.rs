use std::f64::consts::FRAC_PI_2;

use crate::foundation::error::{BrushError, BrushResult};

/// Tilt-driven brush width.
///
/// `width = min + (max - min) * (1 - (altitude / (π/2))^exponent)`: a pen held upright
/// draws the thinnest line, a pen laid flat the widest.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidthModel {
    /// Width at altitude π/2.
    pub min_width: f64,
    /// Width at altitude 0.
    pub max_width: f64,
    /// Curve exponent applied to the normalized altitude.
    pub exponent: f64,
}

impl Default for WidthModel {
    fn default() -> Self {
        Self {
            min_width: 16.0,
            max_width: 100.0,
            exponent: 1.5,
        }
    }
}

impl WidthModel {
    /// Width for an altitude angle in radians; the angle is clamped to `[0, π/2]`.
    pub fn width_for_altitude(&self, altitude: f64) -> f64 {
        let altitude = if altitude.is_finite() {
            altitude.clamp(0.0, FRAC_PI_2)
        } else {
            FRAC_PI_2
        };
        let ratio = altitude / FRAC_PI_2;
        self.min_width + (self.max_width - self.min_width) * (1.0 - ratio.powf(self.exponent))
    }

    pub(crate) fn validate(&self) -> BrushResult<()> {
        if !self.min_width.is_finite() || self.min_width < 0.0 {
            return Err(BrushError::validation("width.min_width must be finite and >= 0"));
        }
        if !self.max_width.is_finite() || self.max_width < self.min_width {
            return Err(BrushError::validation(
                "width.max_width must be finite and >= min_width",
            ));
        }
        if !self.exponent.is_finite() || self.exponent <= 0.0 {
            return Err(BrushError::validation("width.exponent must be finite and > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/width.rs"]
mod tests;
