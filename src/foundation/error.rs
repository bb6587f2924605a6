/// Convenience result type used across brushstroke.
pub type BrushResult<T> = Result<T, BrushError>;

/// Top-level error taxonomy used by library APIs.
///
/// Degenerate geometry never surfaces here; it is skipped while compiling primitives.
#[derive(thiserror::Error, Debug)]
pub enum BrushError {
    /// Invalid user-provided drawing, config, or canvas data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while rasterizing a draw list.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing records and configs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BrushError {
    /// Build a [`BrushError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BrushError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for BrushError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
