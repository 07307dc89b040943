/// Convenience result type used across wordreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by layout and timeline APIs.
///
/// Only fatal conditions are errors. Missing glyphs and degenerate numeric input (zero fps,
/// zero width) are reported inside successful results instead.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Configuration that cannot produce a valid clip (negative countdown, fades longer than the
    /// clip, reveal beyond the clip end, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The text metrics provider failed to measure a run of text.
    #[error("measurement failure: {0}")]
    Measurement(String),

    /// Elements could not be placed without overlapping or leaving the canvas.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when reading loose configuration maps.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidConfiguration`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`ReelError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`ReelError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
