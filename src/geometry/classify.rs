//! Speed classification over a stroke's sample sequence.
//!
//! Two detectors live here:
//!
//! - **Taper ("flick")**: a fast release at the end of a stroke is drawn as one tapered
//!   polygon instead of individual segments.
//! - **Hold**: a run of near-stationary samples where the brush rested on the paper.

use std::collections::BTreeSet;

use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{BrushError, BrushResult},
    stroke::sample::SamplePoint,
};

/// Taper detection and polygon shape.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaperConfig {
    /// A segment qualifies when its end point is faster than this.
    pub speed_threshold: f64,
    /// Size of the trailing window, counted in sample points.
    pub min_segments_for_taper: usize,
    /// Tip extension at exactly the threshold speed.
    pub base_extension: f64,
    /// Additional tip extension reached at `threshold + speed_ratio_span`.
    pub extension_range: f64,
    pub speed_ratio_span: f64,
    /// Fraction of the end half-width kept at the near-end corner.
    pub end_width_factor: f64,
}

impl Default for TaperConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 500.0,
            min_segments_for_taper: 3,
            base_extension: 30.0,
            extension_range: 50.0,
            speed_ratio_span: 500.0,
            end_width_factor: 0.2,
        }
    }
}

impl TaperConfig {
    pub(crate) fn validate(&self) -> BrushResult<()> {
        if !self.speed_threshold.is_finite() || self.speed_threshold < 0.0 {
            return Err(BrushError::validation(
                "taper.speed_threshold must be finite and >= 0",
            ));
        }
        if !self.speed_ratio_span.is_finite() || self.speed_ratio_span <= 0.0 {
            return Err(BrushError::validation("taper.speed_ratio_span must be > 0"));
        }
        for (name, v) in [
            ("base_extension", self.base_extension),
            ("extension_range", self.extension_range),
            ("end_width_factor", self.end_width_factor),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(BrushError::validation(format!(
                    "taper.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Flagged segment indices drawn as one taper polygon.
///
/// Segment `i` joins point `i` and point `i + 1`. The polygon spans from the first flagged
/// segment to the end of the last one; unflagged segments between them (possible with a
/// wide window) are still drawn as plain segments.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TaperRegion {
    segments: Vec<usize>,
}

impl TaperRegion {
    /// Region over `segments`, or `None` when empty.
    pub fn new(segments: impl IntoIterator<Item = usize>) -> Option<Self> {
        let segments: Vec<usize> = segments
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        (!segments.is_empty()).then_some(Self { segments })
    }

    /// Flagged indices, ascending.
    pub fn segments(&self) -> &[usize] {
        &self.segments
    }

    /// Lowest flagged segment index.
    pub fn first(&self) -> usize {
        self.segments[0]
    }

    /// Highest flagged segment index.
    pub fn last(&self) -> usize {
        self.segments[self.segments.len() - 1]
    }

    pub fn contains(&self, segment: usize) -> bool {
        self.segments.binary_search(&segment).is_ok()
    }

    /// Number of segments folded into the polygon.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

/// Segment indices flagged for tapering.
///
/// A segment is flagged when it lies in the trailing window and its end point is faster
/// than the threshold. Each flagged segment also flags its predecessor when that one is
/// still inside the window.
pub fn flagged_segments(points: &[SamplePoint], cfg: &TaperConfig) -> BTreeSet<usize> {
    let mut flagged = BTreeSet::new();
    let n = points.len();
    if n < 2 {
        return flagged;
    }

    let window_start = n.saturating_sub(cfg.min_segments_for_taper);
    for i in window_start..n - 1 {
        if points[i + 1].speed > cfg.speed_threshold {
            flagged.insert(i);
            if i > window_start {
                flagged.insert(i - 1);
            }
        }
    }
    flagged
}

/// The taper region of a stroke, or `None` when nothing qualifies.
pub fn classify_taper(points: &[SamplePoint], cfg: &TaperConfig) -> Option<TaperRegion> {
    TaperRegion::new(flagged_segments(points, cfg))
}

/// Quadrilateral covering a taper region.
///
/// Corners, in path order: start + perp·w₀/2, the narrowed near-end corner, the extended
/// tip, start − perp·w₀/2. Returns `None` when start and end coincide.
pub fn taper_polygon(
    points: &[SamplePoint],
    region: &TaperRegion,
    cfg: &TaperConfig,
) -> Option<[Point; 4]> {
    let start = points.get(region.first())?;
    let end = points.get(region.last() + 1)?;

    let delta = end.position - start.position;
    let distance = delta.hypot();
    if !distance.is_finite() || distance <= 0.0 {
        return None;
    }
    let direction = delta / distance;
    let perp = Vec2::new(-direction.y, direction.x);

    let speed_ratio =
        ((end.speed - cfg.speed_threshold) / cfg.speed_ratio_span).clamp(0.0, 1.0);
    let extension = cfg.base_extension + speed_ratio * cfg.extension_range;

    let start_half = start.computed_width / 2.0;
    let end_half = end.computed_width / 2.0 * cfg.end_width_factor;

    Some([
        start.position + perp * start_half,
        end.position + perp * end_half,
        end.position + direction * extension,
        start.position - perp * start_half,
    ])
}

/// Hold detection thresholds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoldConfig {
    /// Points slower than this count as stationary.
    pub speed_threshold: f64,
    /// Minimum stationary time, in seconds, for a run to count as a hold.
    pub min_duration: f64,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            speed_threshold: 20.0,
            min_duration: 0.25,
        }
    }
}

impl HoldConfig {
    pub(crate) fn validate(&self) -> BrushResult<()> {
        if !self.speed_threshold.is_finite() || self.speed_threshold < 0.0 {
            return Err(BrushError::validation(
                "hold.speed_threshold must be finite and >= 0",
            ));
        }
        if !self.min_duration.is_finite() || self.min_duration < 0.0 {
            return Err(BrushError::validation(
                "hold.min_duration must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// A stretch of the stroke where the brush rested.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Hold {
    /// First point index of the run.
    pub first: usize,
    /// Last point index of the run.
    pub last: usize,
    /// Timestamp of the first point.
    pub start: f64,
    /// Seconds between the first and last point.
    pub duration: f64,
}

/// Maximal runs of slow points lasting at least `min_duration`.
pub fn detect_holds(points: &[SamplePoint], cfg: &HoldConfig) -> Vec<Hold> {
    let mut holds = Vec::new();
    let mut run_start: Option<usize> = None;

    let close_run = |first: usize, last: usize, holds: &mut Vec<Hold>| {
        let duration = points[last].timestamp - points[first].timestamp;
        if last > first && duration >= cfg.min_duration {
            holds.push(Hold {
                first,
                last,
                start: points[first].timestamp,
                duration,
            });
        }
    };

    for (idx, p) in points.iter().enumerate() {
        if p.speed < cfg.speed_threshold {
            run_start.get_or_insert(idx);
        } else if let Some(first) = run_start.take() {
            close_run(first, idx - 1, &mut holds);
        }
    }
    if let Some(first) = run_start {
        close_run(first, points.len() - 1, &mut holds);
    }
    holds
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/classify.rs"]
mod tests;
