//! Error types for synthesis operations.

use thiserror::Error;

/// Result type alias for synthesis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for synthesis operations.
///
/// The variants follow the three collaborator phases: fetching weight
/// artifacts, constructing/loading the model, and generating audio.
#[derive(Debug, Error)]
pub enum Error {
    /// The weight store could not produce a local weight artifact.
    #[error("weight fetch failed: {0}")]
    Fetch(String),

    /// The model could not be constructed or its weights loaded.
    #[error("model load failed: {0}")]
    Load(String),

    /// The model failed to synthesize audio.
    #[error("generation failed: {0}")]
    Generation(String),
}

impl Error {
    /// Wraps a weight-store failure.
    pub fn fetch(err: impl std::fmt::Display) -> Self {
        Error::Fetch(err.to_string())
    }

    /// Wraps a model construction/loading failure.
    pub fn load(err: impl std::fmt::Display) -> Self {
        Error::Load(err.to_string())
    }

    /// Wraps an inference failure.
    pub fn generation(err: impl std::fmt::Display) -> Self {
        Error::Generation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::fetch("404 not found");
        assert_eq!(err.to_string(), "weight fetch failed: 404 not found");

        let err = Error::Generation("empty output".to_string());
        assert!(err.to_string().contains("empty output"));
    }
}
