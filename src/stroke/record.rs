//! Flat persistence records handed to the template/upload service.
//!
//! The wire shape is one record per point with camelCase keys:
//! `{x, y, pressure, timestamp, tiltX, tiltY, azimuth, altitude, brushWidth, speed}`.
//! `tiltX`/`tiltY` carry the azimuth unit vector.

use std::path::Path;

use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{BrushError, BrushResult},
    stroke::model::{Drawing, Stroke},
    stroke::sample::SamplePoint,
};

/// One serialized sample point.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
    pub timestamp: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub azimuth: f64,
    pub altitude: f64,
    pub brush_width: f64,
    pub speed: f64,
}

/// One serialized stroke.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeRecord {
    #[serde(default)]
    pub created_at: f64,
    pub points: Vec<PointRecord>,
}

/// One serialized drawing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingRecord {
    #[serde(default)]
    pub created_at: f64,
    pub strokes: Vec<StrokeRecord>,
}

impl From<&SamplePoint> for PointRecord {
    fn from(p: &SamplePoint) -> Self {
        Self {
            x: p.position.x,
            y: p.position.y,
            pressure: p.pressure,
            timestamp: p.timestamp,
            tilt_x: p.azimuth_unit.x,
            tilt_y: p.azimuth_unit.y,
            azimuth: p.tilt_azimuth,
            altitude: p.tilt_altitude,
            brush_width: p.computed_width,
            speed: p.speed,
        }
    }
}

impl From<&PointRecord> for SamplePoint {
    fn from(r: &PointRecord) -> Self {
        Self {
            position: Point::new(r.x, r.y),
            timestamp: r.timestamp,
            pressure: r.pressure,
            speed: r.speed,
            computed_width: r.brush_width,
            tilt_altitude: r.altitude,
            tilt_azimuth: r.azimuth,
            azimuth_unit: Vec2::new(r.tilt_x, r.tilt_y),
        }
    }
}

impl Drawing {
    /// Flatten into the persistence record shape.
    pub fn to_record(&self) -> DrawingRecord {
        DrawingRecord {
            created_at: self.created_at(),
            strokes: self
                .strokes()
                .iter()
                .map(|s| StrokeRecord {
                    created_at: s.created_at(),
                    points: s.points().iter().map(PointRecord::from).collect(),
                })
                .collect(),
        }
    }

    /// Rebuild a drawing from its record, validating every stroke.
    pub fn from_record(record: &DrawingRecord) -> BrushResult<Self> {
        let mut strokes = Vec::with_capacity(record.strokes.len());
        for (idx, s) in record.strokes.iter().enumerate() {
            let points = s.points.iter().map(SamplePoint::from).collect();
            let stroke = Stroke::from_points(points, s.created_at)
                .map_err(|e| BrushError::validation(format!("stroke {idx}: {e}")))?;
            strokes.push(stroke);
        }
        Drawing::from_strokes(strokes, record.created_at)
    }

    /// Serialize as pretty JSON in the record shape.
    pub fn to_json_string(&self) -> BrushResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// Parse and validate a JSON drawing record.
    pub fn from_json_str(json: &str) -> BrushResult<Self> {
        let record: DrawingRecord = serde_json::from_str(json)?;
        Self::from_record(&record)
    }

    /// Read and validate a JSON drawing record from disk.
    pub fn from_json_path(path: &Path) -> BrushResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BrushError::Other(anyhow::Error::new(e).context(format!(
                "read drawing '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/record.rs"]
mod tests;
