//! Expectation suites: ordered, named collections of expectations.

use crate::core::expectation::Expectation;
use crate::core::result::ValidationResult;
use crate::engine::ValidationEngine;
use crate::error::{AssayError, Result};
use crate::sources::RecordSource;
use serde::{Deserialize, Serialize};

/// An ordered, named collection of [`Expectation`]s.
///
/// Suites are created once, before validation, and never mutated during a
/// run. Duplicate expectations are allowed by default and evaluated
/// independently; opt into rejection with
/// [`strict_uniqueness`](ExpectationSuiteBuilder::strict_uniqueness).
///
/// # Examples
///
/// ```rust
/// use assay_core::core::{Expectation, ExpectationSuite, ExpectedType};
///
/// let suite = ExpectationSuite::builder("player_stats")
///     .expect(Expectation::column_exists("points"))
///     .expect(Expectation::values_of_type("points", ExpectedType::Integer))
///     .expect(Expectation::values_between("points", 0.0, 100.0)?)
///     .build()?;
///
/// assert_eq!(suite.name(), "player_stats");
/// assert_eq!(suite.len(), 3);
/// # Ok::<(), assay_core::error::AssayError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationSuite {
    name: String,
    expectations: Vec<Expectation>,
}

impl ExpectationSuite {
    /// Creates a new builder for constructing a suite.
    pub fn builder(name: impl Into<String>) -> ExpectationSuiteBuilder {
        ExpectationSuiteBuilder::new(name)
    }

    /// Returns the name of the suite.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expectations in declaration order.
    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    /// Returns the number of expectations in the suite.
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Returns true if the suite holds no expectations.
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Runs this suite against a record source with a default-configured
    /// engine. Equivalent to `ValidationEngine::new().validate(self, source)`.
    pub fn validate(&self, source: &dyn RecordSource) -> Result<ValidationResult> {
        ValidationEngine::new().validate(self, source)
    }

    /// Serializes the suite to JSON, one record per expectation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a suite from JSON.
    ///
    /// Parameter validity is not re-checked here; the engine re-validates
    /// each expectation before evaluation and records failures per-outcome.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builder for [`ExpectationSuite`] instances.
#[derive(Debug)]
pub struct ExpectationSuiteBuilder {
    name: String,
    expectations: Vec<Expectation>,
    strict_uniqueness: bool,
}

impl ExpectationSuiteBuilder {
    /// Creates a new suite builder with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expectations: Vec::new(),
            strict_uniqueness: false,
        }
    }

    /// Appends an expectation to the suite.
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    /// Appends multiple expectations in iteration order.
    pub fn expectations<I>(mut self, expectations: I) -> Self
    where
        I: IntoIterator<Item = Expectation>,
    {
        self.expectations.extend(expectations);
        self
    }

    /// Rejects structurally identical duplicates at [`build`](Self::build)
    /// time. Off by default: duplicates then run twice and double-count in
    /// the result statistics.
    pub fn strict_uniqueness(mut self, enabled: bool) -> Self {
        self.strict_uniqueness = enabled;
        self
    }

    /// Builds the suite, enforcing the duplicate policy.
    pub fn build(self) -> Result<ExpectationSuite> {
        if self.strict_uniqueness {
            for (i, exp) in self.expectations.iter().enumerate() {
                if self.expectations[..i].contains(exp) {
                    return Err(AssayError::DuplicateExpectation {
                        suite: self.name,
                        expectation: exp.to_string(),
                    });
                }
            }
        }
        Ok(ExpectationSuite {
            name: self.name,
            expectations: self.expectations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expectation::ExpectedType;

    #[test]
    fn test_builder_preserves_order() {
        let suite = ExpectationSuite::builder("ordered")
            .expect(Expectation::column_exists("a"))
            .expect(Expectation::values_not_null("b"))
            .expect(Expectation::values_of_type("c", ExpectedType::String))
            .build()
            .unwrap();

        let names: Vec<_> = suite
            .expectations()
            .iter()
            .map(|e| e.kind().name())
            .collect();
        assert_eq!(names, vec!["column_exists", "values_not_null", "values_of_type"]);
    }

    #[test]
    fn test_duplicates_allowed_by_default() {
        let suite = ExpectationSuite::builder("dups")
            .expect(Expectation::values_not_null("a"))
            .expect(Expectation::values_not_null("a"))
            .build()
            .unwrap();
        assert_eq!(suite.len(), 2);
    }

    #[test]
    fn test_strict_uniqueness_rejects_duplicates() {
        let err = ExpectationSuite::builder("dups")
            .strict_uniqueness(true)
            .expect(Expectation::values_not_null("a"))
            .expect(Expectation::values_not_null("a"))
            .build()
            .unwrap_err();
        assert!(matches!(err, AssayError::DuplicateExpectation { .. }));
    }

    #[test]
    fn test_strict_uniqueness_permits_distinct() {
        let suite = ExpectationSuite::builder("distinct")
            .strict_uniqueness(true)
            .expect(Expectation::values_not_null("a"))
            .expect(Expectation::values_not_null("b"))
            .expect(Expectation::values_between("a", 0.0, 1.0).unwrap())
            .build()
            .unwrap();
        assert_eq!(suite.len(), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let suite = ExpectationSuite::builder("persisted")
            .expect(Expectation::column_exists("game_date"))
            .expect(Expectation::values_match_format("game_date", "YYYY-MM-DD").unwrap())
            .build()
            .unwrap();

        let json = suite.to_json().unwrap();
        let back = ExpectationSuite::from_json(&json).unwrap();
        assert_eq!(back, suite);
    }
}
