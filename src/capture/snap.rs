use crate::{
    foundation::core::Point,
    foundation::error::{BrushError, BrushResult},
    stroke::model::Drawing,
};

/// Tuning for trace correction against a reference drawing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapConfig {
    /// Reference points farther than this (canvas units) leave the input untouched.
    pub snap_distance: f64,
    /// Fraction of the way the input moves toward the reference point, in `[0, 1]`.
    pub correction_strength: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_distance: 30.0,
            correction_strength: 0.7,
        }
    }
}

impl SnapConfig {
    pub(crate) fn validate(&self) -> BrushResult<()> {
        if !self.snap_distance.is_finite() || self.snap_distance < 0.0 {
            return Err(BrushError::validation(
                "snap.snap_distance must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.correction_strength) {
            return Err(BrushError::validation(
                "snap.correction_strength must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Pulls raw pointer positions toward the closest point of a reference drawing.
#[derive(Clone, Debug)]
pub struct SnapCorrector {
    reference: Vec<Point>,
    cfg: SnapConfig,
}

impl SnapCorrector {
    pub fn new(reference: &Drawing, cfg: SnapConfig) -> Self {
        let reference = reference
            .strokes()
            .iter()
            .flat_map(|s| s.points().iter().map(|p| p.position))
            .collect();
        Self { reference, cfg }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.cfg
    }

    /// Closest reference point and its distance. Ties resolve to the earliest point.
    pub fn nearest(&self, raw: Point) -> Option<(Point, f64)> {
        self.reference
            .iter()
            .map(|&p| (p, p.distance(raw)))
            .fold(None, |best, cand| match best {
                Some((_, d)) if d <= cand.1 => best,
                _ => Some(cand),
            })
    }

    /// Corrected position for `raw`.
    pub fn correct(&self, raw: Point) -> Point {
        match self.nearest(raw) {
            Some((target, dist)) if dist <= self.cfg.snap_distance => {
                raw.lerp(target, self.cfg.correction_strength)
            }
            _ => raw,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/snap.rs"]
mod tests;
