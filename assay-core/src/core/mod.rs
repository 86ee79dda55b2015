//! Core data model: values, expectations, suites, and results.
//!
//! ```text
//! ExpectationSuite
//!     ├── Expectation (column_exists)
//!     ├── Expectation (values_not_null)
//!     └── Expectation (values_between {min, max})
//! ```
//!
//! Everything here is an immutable value object; the only component with
//! real logic is the [`engine`](crate::engine), which consumes a suite and
//! a record source and produces one [`ValidationResult`].

mod expectation;
pub mod format;
mod result;
mod suite;
mod value;

pub use expectation::{Expectation, ExpectationKind, ExpectedType};
pub use result::{UnexpectedValue, ValidationOutcome, ValidationResult, ValidationStatistics};
pub use suite::{ExpectationSuite, ExpectationSuiteBuilder};
pub use value::Value;
