use std::path::Path;

use crate::{
    capture::snap::SnapConfig,
    foundation::error::{BrushError, BrushResult},
    geometry::classify::{HoldConfig, TaperConfig},
    geometry::paint::PaintConfig,
    geometry::width::WidthModel,
};

/// Every tunable of the capture and rendering pipeline.
///
/// All sections default to the reference tuning, so a config file only needs to name the
/// values it changes:
///
/// ```json
/// { "paint": { "mode": "heatmap" }, "snap": { "snap_distance": 24.0 } }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrushConfig {
    pub width: WidthModel,
    pub paint: PaintConfig,
    pub taper: TaperConfig,
    pub hold: HoldConfig,
    pub snap: SnapConfig,
}

impl BrushConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> BrushResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> BrushResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BrushError::Other(
                anyhow::Error::new(e).context(format!("read config '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> BrushResult<()> {
        self.width.validate()?;
        self.paint.validate()?;
        self.taper.validate()?;
        self.hold.validate()?;
        self.snap.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
