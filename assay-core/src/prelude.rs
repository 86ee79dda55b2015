//! Prelude for commonly used types and traits in assay-core.

pub use crate::core::{
    Expectation, ExpectationSuite, ExpectedType, UnexpectedValue, ValidationOutcome,
    ValidationResult, Value,
};
pub use crate::engine::{EngineOptions, ValidationEngine};
pub use crate::error::{AssayError, ErrorContext, Result};
pub use crate::logging::LogConfig;
pub use crate::sources::{MemorySource, RecordSource, Row};
