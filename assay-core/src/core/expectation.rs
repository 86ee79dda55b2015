//! Declarative expectations over tabular data.
//!
//! An [`Expectation`] is an immutable value object identified by
//! `(kind, column, parameters)`. The set of kinds is closed: new checks are
//! added by extending [`ExpectationKind`] and the engine's evaluator table,
//! never by dynamic registration.

use crate::core::format::CompiledFormat;
use crate::error::{AssayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell types an expectation can assert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedType {
    /// The cell parses as an integer without information loss
    Integer,
    /// The cell is textual
    String,
}

impl ExpectedType {
    /// Returns a human-readable name for this type.
    pub fn name(&self) -> &'static str {
        match self {
            ExpectedType::Integer => "integer",
            ExpectedType::String => "string",
        }
    }
}

/// The closed set of expectation kinds and their parameters.
///
/// Serialized adjacently tagged so an expectation round-trips as
/// `{"kind": "values_between", "column": "points", "parameters": {"min": 0.0, "max": 100.0}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "parameters", rename_all = "snake_case")]
pub enum ExpectationKind {
    /// The column is present in the source schema. Table-level: no rows are
    /// scanned.
    ColumnExists,
    /// Every cell is present and non-empty.
    ValuesNotNull,
    /// Every present cell parses as the expected type. Missing values are
    /// exempt; pair with `ValuesNotNull` to reject them too.
    ValuesOfType {
        /// The type every cell must conform to
        expected_type: ExpectedType,
    },
    /// Every cell is numeric and within `[min, max]`.
    ValuesBetween {
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
    /// Every cell lexically matches a format template (see
    /// [`CompiledFormat`](crate::core::format::CompiledFormat) for the
    /// template language).
    ValuesMatchFormat {
        /// Format template, e.g. `"YYYY-MM-DD"`
        pattern: String,
        /// Additionally require calendar validity (full-date patterns only)
        #[serde(default)]
        calendar: bool,
    },
}

impl ExpectationKind {
    /// Returns the snake_case name of this kind, as used in serialized form
    /// and log events.
    pub fn name(&self) -> &'static str {
        match self {
            ExpectationKind::ColumnExists => "column_exists",
            ExpectationKind::ValuesNotNull => "values_not_null",
            ExpectationKind::ValuesOfType { .. } => "values_of_type",
            ExpectationKind::ValuesBetween { .. } => "values_between",
            ExpectationKind::ValuesMatchFormat { .. } => "values_match_format",
        }
    }

    /// Returns true for kinds that check the schema once instead of
    /// scanning rows.
    pub fn is_table_level(&self) -> bool {
        matches!(self, ExpectationKind::ColumnExists)
    }
}

/// A single declarative data-quality rule bound to a column.
///
/// Expectations are immutable once constructed and compare structurally:
/// two expectations are equal iff their kind, column and parameters are.
///
/// # Examples
///
/// ```rust
/// use assay_core::core::Expectation;
///
/// let exp = Expectation::values_between("minutes_played", 0.0, 48.0)?;
/// assert_eq!(exp.column(), Some("minutes_played"));
///
/// // Malformed parameters fail fast, not at evaluation time.
/// assert!(Expectation::values_between("points", 10.0, 5.0).is_err());
/// # Ok::<(), assay_core::error::AssayError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expectation {
    #[serde(flatten)]
    kind: ExpectationKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    column: Option<String>,
}

impl Expectation {
    /// Asserts that `column` is present in the source schema.
    pub fn column_exists(column: impl Into<String>) -> Self {
        Self {
            kind: ExpectationKind::ColumnExists,
            column: Some(column.into()),
        }
    }

    /// Asserts that every cell in `column` is present and non-empty.
    pub fn values_not_null(column: impl Into<String>) -> Self {
        Self {
            kind: ExpectationKind::ValuesNotNull,
            column: Some(column.into()),
        }
    }

    /// Asserts that every present cell in `column` parses as
    /// `expected_type` without information loss.
    pub fn values_of_type(column: impl Into<String>, expected_type: ExpectedType) -> Self {
        Self {
            kind: ExpectationKind::ValuesOfType { expected_type },
            column: Some(column.into()),
        }
    }

    /// Asserts that every cell in `column` is numeric and within the
    /// inclusive range `[min, max]`.
    pub fn values_between(column: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        let exp = Self {
            kind: ExpectationKind::ValuesBetween { min, max },
            column: Some(column.into()),
        };
        exp.validate()?;
        Ok(exp)
    }

    /// Asserts that every cell in `column` matches a format template such as
    /// `"YYYY-MM-DD"`.
    pub fn values_match_format(column: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        let exp = Self {
            kind: ExpectationKind::ValuesMatchFormat {
                pattern: pattern.into(),
                calendar: false,
            },
            column: Some(column.into()),
        };
        exp.validate()?;
        Ok(exp)
    }

    /// Like [`values_match_format`](Self::values_match_format), but also
    /// requires each value to be a real calendar date. Only valid for
    /// full-date patterns.
    pub fn values_match_calendar_date(
        column: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<Self> {
        let exp = Self {
            kind: ExpectationKind::ValuesMatchFormat {
                pattern: pattern.into(),
                calendar: true,
            },
            column: Some(column.into()),
        };
        exp.validate()?;
        Ok(exp)
    }

    /// Returns the kind of this expectation.
    pub fn kind(&self) -> &ExpectationKind {
        &self.kind
    }

    /// Returns the target column, if bound to one.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Checks the expectation's parameters.
    ///
    /// Constructors call this so programmatic suites fail fast; the engine
    /// calls it again before evaluation so suites arriving via
    /// deserialization are caught too (recorded per-outcome there, never
    /// aborting the run).
    pub fn validate(&self) -> Result<()> {
        if self.column.is_none() {
            return Err(AssayError::invalid_config(format!(
                "{} expectation is missing its target column",
                self.kind.name()
            )));
        }
        match &self.kind {
            ExpectationKind::ValuesBetween { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(AssayError::invalid_config(format!(
                        "range bounds must be finite, got min={min}, max={max}"
                    )));
                }
                if min > max {
                    return Err(AssayError::invalid_config(format!(
                        "range min {min} exceeds max {max}"
                    )));
                }
                Ok(())
            }
            ExpectationKind::ValuesMatchFormat { pattern, calendar } => {
                CompiledFormat::compile(pattern, *calendar).map(|_| ())
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = self.column.as_deref().unwrap_or("<unbound>");
        match &self.kind {
            ExpectationKind::ColumnExists => write!(f, "column_exists({column})"),
            ExpectationKind::ValuesNotNull => write!(f, "values_not_null({column})"),
            ExpectationKind::ValuesOfType { expected_type } => {
                write!(f, "values_of_type({column}, {})", expected_type.name())
            }
            ExpectationKind::ValuesBetween { min, max } => {
                write!(f, "values_between({column}, min={min}, max={max})")
            }
            ExpectationKind::ValuesMatchFormat { pattern, calendar } => {
                if *calendar {
                    write!(f, "values_match_format({column}, {pattern}, calendar)")
                } else {
                    write!(f, "values_match_format({column}, {pattern})")
                }
            }
        }
    }
}
