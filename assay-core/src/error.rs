//! Error types for the Assay validation engine.
//!
//! All failure modes in the crate are represented by the [`AssayError`] enum,
//! built with `thiserror`. Per-expectation faults discovered during a
//! validation run are NOT errors at this level: they are recorded in the
//! corresponding [`ValidationOutcome`](crate::core::ValidationOutcome) so one
//! bad expectation never aborts the run. Only whole-run failures (an
//! unreadable source, malformed suite input) surface here.

use thiserror::Error;

/// The main error type for the Assay library.
#[derive(Error, Debug)]
pub enum AssayError {
    /// An expectation was declared with malformed parameters, e.g. a range
    /// whose `min` exceeds its `max` or an empty format pattern.
    #[error("Invalid expectation configuration: {detail}")]
    InvalidExpectationConfig {
        /// What was wrong with the parameters
        detail: String,
    },

    /// A structurally identical expectation was added twice to a suite built
    /// in strict-uniqueness mode.
    #[error("Duplicate expectation in suite '{suite}': {expectation}")]
    DuplicateExpectation {
        /// Name of the suite being built
        suite: String,
        /// Display form of the offending expectation
        expectation: String,
    },

    /// The record source could not be read. Fatal to the whole run: no
    /// partial result is produced.
    #[error("Record source '{identifier}' could not be read: {detail}")]
    SourceExhausted {
        /// The source's self-reported identifier
        identifier: String,
        /// Detailed error message
        detail: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Row data handed to a source does not fit its declared schema.
    #[error("Malformed source data: {detail}")]
    MalformedSource {
        /// What was wrong with the rows
        detail: String,
    },

    /// Error from serialization/deserialization of suites or results.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, AssayError>`, used throughout the crate.
pub type Result<T> = std::result::Result<T, AssayError>;

impl AssayError {
    /// Creates a new invalid-configuration error.
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidExpectationConfig {
            detail: detail.into(),
        }
    }

    /// Creates a new source exhaustion error.
    pub fn source_exhausted(identifier: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SourceExhausted {
            identifier: identifier.into(),
            detail: detail.into(),
            source: None,
        }
    }

    /// Creates a new source exhaustion error wrapping an underlying error.
    pub fn source_exhausted_with_source(
        identifier: impl Into<String>,
        detail: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::SourceExhausted {
            identifier: identifier.into(),
            detail: detail.into(),
            source: Some(source),
        }
    }
}

impl From<serde_json::Error> for AssayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AssayError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let base = e.into();
            AssayError::Internal(format!("{}: {}", msg, base))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let base = e.into();
            AssayError::Internal(format!("{}: {}", f(), base))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_config_error() {
        let err = AssayError::invalid_config("min 10 exceeds max 5");
        assert_eq!(
            err.to_string(),
            "Invalid expectation configuration: min 10 exceeds max 5"
        );
    }

    #[test]
    fn test_source_exhausted_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "file vanished");
        let err = AssayError::source_exhausted_with_source(
            "players.csv",
            "stream ended early",
            Box::new(io),
        );
        assert!(err.source().is_some());
        assert!(err.to_string().contains("players.csv"));
    }

    #[test]
    fn test_error_context() {
        fn failing() -> Result<()> {
            Err(AssayError::Internal("boom".to_string()))
        }

        let err = failing().context("while validating").unwrap_err();
        assert!(err.to_string().contains("while validating"));
    }
}
