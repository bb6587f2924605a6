use crate::{
    foundation::error::{BrushError, BrushResult},
    foundation::math::is_finite_point,
    stroke::sample::SamplePoint,
};

/// An ordered, non-empty run of sample points captured between pointer-down and pointer-up.
///
/// Points can only be appended by the capture controller; a stroke handed out through a
/// [`Drawing`] is read-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<SamplePoint>,
    created_at: f64,
}

impl Stroke {
    pub(crate) fn begin(first: SamplePoint, created_at: f64) -> Self {
        Self {
            points: vec![first],
            created_at,
        }
    }

    /// Build a sealed stroke from already-captured points.
    pub fn from_points(points: Vec<SamplePoint>, created_at: f64) -> BrushResult<Self> {
        if points.is_empty() {
            return Err(BrushError::validation("stroke must contain at least one point"));
        }
        let stroke = Self { points, created_at };
        stroke.validate()?;
        Ok(stroke)
    }

    pub(crate) fn push(&mut self, point: SamplePoint) {
        self.points.push(point);
    }

    /// Points in capture order.
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Last captured point.
    pub fn last(&self) -> &SamplePoint {
        // `points` is never empty: every constructor seeds at least one point.
        &self.points[self.points.len() - 1]
    }

    /// Creation time in seconds.
    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of adjacent point pairs.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    fn validate(&self) -> BrushResult<()> {
        let mut prev_t = f64::NEG_INFINITY;
        for (idx, p) in self.points.iter().enumerate() {
            if !is_finite_point(p.position) || !p.timestamp.is_finite() {
                return Err(BrushError::validation(format!(
                    "point {idx} has a non-finite position or timestamp"
                )));
            }
            if p.timestamp < prev_t {
                return Err(BrushError::validation(format!(
                    "point {idx} timestamp {} precedes previous {prev_t}",
                    p.timestamp
                )));
            }
            if !(0.0..=1.0).contains(&p.pressure) {
                return Err(BrushError::validation(format!(
                    "point {idx} pressure {} outside [0, 1]",
                    p.pressure
                )));
            }
            if !p.computed_width.is_finite() || p.computed_width < 0.0 {
                return Err(BrushError::validation(format!(
                    "point {idx} width must be finite and >= 0"
                )));
            }
            prev_t = p.timestamp;
        }
        Ok(())
    }

    fn truncated_at(&self, t: f64) -> Option<Self> {
        let keep = self.points.partition_point(|p| p.timestamp <= t);
        if keep == 0 {
            return None;
        }
        Some(Self {
            points: self.points[..keep].to_vec(),
            created_at: self.created_at,
        })
    }
}

/// Root aggregate: every stroke captured during a session, in commit order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Drawing {
    strokes: Vec<Stroke>,
    created_at: f64,
}

impl Drawing {
    /// Empty drawing created at `created_at` seconds.
    pub fn new(created_at: f64) -> Self {
        Self {
            strokes: Vec::new(),
            created_at,
        }
    }

    /// Drawing from sealed strokes, validated.
    pub fn from_strokes(strokes: Vec<Stroke>, created_at: f64) -> BrushResult<Self> {
        let drawing = Self {
            strokes,
            created_at,
        };
        drawing.validate()?;
        Ok(drawing)
    }

    /// Committed strokes in order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Creation time in seconds.
    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// Total number of sample points across strokes.
    pub fn point_count(&self) -> usize {
        self.strokes.iter().map(Stroke::len).sum()
    }

    /// `true` when no stroke has been committed.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub(crate) fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub(crate) fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Check invariants of a drawing that came from outside the capture controller.
    pub fn validate(&self) -> BrushResult<()> {
        for (idx, stroke) in self.strokes.iter().enumerate() {
            if stroke.points.is_empty() {
                return Err(BrushError::validation(format!("stroke {idx} is empty")));
            }
            stroke
                .validate()
                .map_err(|e| BrushError::validation(format!("stroke {idx}: {e}")))?;
        }
        Ok(())
    }

    /// First and last sample timestamps, `None` for an empty drawing.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let first = self.strokes.first()?.points.first()?.timestamp;
        let last = self
            .strokes
            .iter()
            .filter_map(|s| s.points.last())
            .map(|p| p.timestamp)
            .fold(first, f64::max);
        Some((first, last))
    }

    /// Prefix of the drawing containing only points with `timestamp <= t`.
    ///
    /// Strokes with no point at or before `t` are dropped.
    pub fn truncated_at(&self, t: f64) -> Self {
        Self {
            strokes: self
                .strokes
                .iter()
                .filter_map(|s| s.truncated_at(t))
                .collect(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/model.rs"]
mod tests;
