use std::f64::consts::FRAC_PI_2;

use crate::{
    foundation::core::{Point, Vec2},
    foundation::math::clamp01,
    geometry::width::WidthModel,
};

/// Raw pointer sample as delivered by the host's touch/pen event system.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    /// Identifies the pointer track; only one track is captured at a time.
    #[serde(default)]
    pub pointer_id: u64,
    /// Position in canvas units.
    pub position: Point,
    /// Normalized pressure; out-of-range values are clamped on capture.
    #[serde(default)]
    pub pressure: f64,
    /// Pen altitude angle in radians (0 = flat on the surface, π/2 = perpendicular).
    #[serde(default = "default_altitude")]
    pub altitude: f64,
    /// Pen azimuth angle in radians.
    #[serde(default)]
    pub azimuth: f64,
    /// Azimuth as a unit vector; derived from `azimuth` when absent.
    #[serde(default)]
    pub azimuth_unit: Option<Vec2>,
    /// Event time in seconds.
    pub timestamp: f64,
}

fn default_altitude() -> f64 {
    FRAC_PI_2
}

impl PointerSample {
    /// A finger-style sample: full pressure, pen perpendicular, no azimuth.
    pub fn at(position: Point, timestamp: f64) -> Self {
        Self {
            pointer_id: 0,
            position,
            pressure: 1.0,
            altitude: FRAC_PI_2,
            azimuth: 0.0,
            azimuth_unit: None,
            timestamp,
        }
    }

    /// Same sample with a different altitude angle.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = altitude;
        self
    }

    /// Same sample attributed to a different pointer track.
    pub fn with_pointer(mut self, pointer_id: u64) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    pub(crate) fn azimuth_unit_vector(&self) -> Vec2 {
        self.azimuth_unit
            .unwrap_or_else(|| Vec2::new(self.azimuth.cos(), self.azimuth.sin()))
    }
}

/// One recorded point of a stroke. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    /// Position in canvas units.
    pub position: Point,
    /// Time in seconds; non-decreasing within a stroke.
    pub timestamp: f64,
    /// Pressure in `[0, 1]`.
    pub pressure: f64,
    /// Distance per second from the previous point of the same stroke.
    pub speed: f64,
    /// Brush width computed from tilt when the point was captured.
    pub computed_width: f64,
    /// Altitude angle in radians, within `[0, π/2]`.
    pub tilt_altitude: f64,
    /// Azimuth angle in radians.
    pub tilt_azimuth: f64,
    /// Azimuth as a unit vector.
    pub azimuth_unit: Vec2,
}

impl SamplePoint {
    /// Build a point from a raw sample. `position` overrides the sample position (snapping);
    /// speed and timestamp ordering are derived from `previous`.
    pub(crate) fn capture(
        sample: &PointerSample,
        position: Point,
        previous: Option<&SamplePoint>,
        width: &WidthModel,
    ) -> Self {
        let altitude = clamp_altitude(sample.altitude);
        let (timestamp, speed) = match previous {
            None => (sample.timestamp, 0.0),
            Some(prev) => {
                let timestamp = sample.timestamp.max(prev.timestamp);
                (timestamp, derive_speed(prev, position, timestamp))
            }
        };

        Self {
            position,
            timestamp,
            pressure: clamp01(sample.pressure),
            speed,
            computed_width: width.width_for_altitude(altitude),
            tilt_altitude: altitude,
            tilt_azimuth: sample.azimuth,
            azimuth_unit: sample.azimuth_unit_vector(),
        }
    }
}

/// Distance over elapsed time from `prev`; 0 when no time has elapsed.
pub fn derive_speed(prev: &SamplePoint, position: Point, timestamp: f64) -> f64 {
    let dt = timestamp - prev.timestamp;
    if dt <= 0.0 || !dt.is_finite() {
        return 0.0;
    }
    prev.position.distance(position) / dt
}

pub(crate) fn clamp_altitude(altitude: f64) -> f64 {
    if altitude.is_finite() {
        altitude.clamp(0.0, FRAC_PI_2)
    } else {
        FRAC_PI_2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/sample.rs"]
mod tests;
