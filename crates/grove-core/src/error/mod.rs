//! Error types and result aliases for the I/O side of Grove.
//!
//! Decoding failures have their own taxonomy in `grove-config`; this type
//! covers everything around it: reading files, running the evaluator and
//! handling the JSON contract.

use thiserror::Error;

/// Error raised while locating, reading or evaluating a manifest
#[derive(Error, Debug)]
pub enum GroveError {
    #[error("No manifest found: looked for {candidates} in {searched} and its parents")]
    ManifestNotFound { searched: String, candidates: String },

    #[error("Expression evaluator '{program}' not found: {reason}")]
    EvaluatorNotFound { program: String, reason: String },

    #[error("Expression evaluator '{program}' failed:\n{stderr}")]
    Evaluator { program: String, stderr: String },

    #[error("Evaluator produced a value that is not a normal-form expression: {message}")]
    NotNormalForm { message: String },

    #[error("JSON error: {message}")]
    Json { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Grove I/O operations
pub type GroveResult<T> = Result<T, GroveError>;

impl GroveError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            GroveError::ManifestNotFound { .. } => {
                Some("Run grove from your project directory or pass --manifest <PATH>")
            },
            GroveError::EvaluatorNotFound { .. } => {
                Some("Install the dhall interpreter or point GROVE_DHALL at the dhall binary")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_keeps_source() {
        let err = GroveError::io(
            "Failed to read grove.json".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "IO error: Failed to read grove.json");
        assert!(err.source().is_some());
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn test_suggestions() {
        let err = GroveError::ManifestNotFound {
            searched: "/tmp/project".to_string(),
            candidates: "grove.dhall, grove.json".to_string(),
        };
        assert!(err.suggestion().is_some());
        assert!(err.to_string().contains("grove.dhall, grove.json"));
    }
}
