//! Per-expectation evaluation state for the engine's single row sweep.

use crate::core::format::CompiledFormat;
use crate::core::{Expectation, ExpectationKind, ExpectedType, UnexpectedValue, ValidationOutcome, Value};
use crate::engine::EngineOptions;
use crate::logging::truncate_field;
use crate::sources::Row;
use tracing::debug;

/// The compiled per-row predicate of a row-scanning expectation.
#[derive(Debug)]
pub(crate) enum Predicate {
    NotNull,
    OfType(ExpectedType),
    Between { min: f64, max: f64 },
    Format(CompiledFormat),
}

impl Predicate {
    /// Applies the predicate to one cell.
    ///
    /// Missing-value policy per kind: missing cells are the failing
    /// condition for `NotNull`, exempt for `OfType`, and unexpected for
    /// `Between` and `Format`.
    fn test(&self, value: &Value) -> bool {
        match self {
            Predicate::NotNull => !value.is_missing(),
            Predicate::OfType(expected) => {
                if value.is_missing() {
                    return true;
                }
                match expected {
                    ExpectedType::Integer => value.as_integer().is_some(),
                    ExpectedType::String => value.as_str().is_some(),
                }
            }
            Predicate::Between { min, max } => match value.as_number() {
                Some(n) => *min <= n && n <= *max,
                None => false,
            },
            Predicate::Format(format) => {
                if value.is_missing() {
                    return false;
                }
                format.matches(&value.to_string())
            }
        }
    }
}

/// Accumulator for one row-scanning expectation.
#[derive(Debug)]
pub(crate) struct ScanState {
    column: String,
    predicate: Predicate,
    unexpected_count: u64,
    examples: Vec<UnexpectedValue>,
    /// First structural gap seen (row missing a cell the schema declares)
    structural_gap: Option<String>,
}

/// Evaluation state for one expectation across the sweep.
///
/// Table-level expectations and faults are resolved at bind time; only
/// `Scan` variants participate in the row loop.
#[derive(Debug)]
pub(crate) enum Evaluator {
    /// Schema-level verdict, decided before any row is read
    Resolved { expectation: Expectation, success: bool },
    /// The expectation could not be evaluated; recorded, never raised
    Faulted { expectation: Expectation, exception: String },
    /// Row-scanning accumulator
    Scan { expectation: Expectation, state: ScanState },
}

impl Evaluator {
    /// Binds an expectation to a source schema, compiling its predicate.
    ///
    /// Invalid parameters (possible for deserialized suites) and schema
    /// mismatches land in the `Faulted` variant so the rest of the suite
    /// still runs.
    pub(crate) fn bind(expectation: Expectation, schema: &[String]) -> Self {
        if let Err(err) = expectation.validate() {
            return Evaluator::Faulted {
                expectation,
                exception: err.to_string(),
            };
        }

        // validate() guarantees a column is present
        let column = expectation.column().expect("validated expectation").to_string();
        let in_schema = schema.iter().any(|c| c == &column);

        if let ExpectationKind::ColumnExists = expectation.kind() {
            return Evaluator::Resolved {
                expectation,
                success: in_schema,
            };
        }

        if !in_schema {
            let exception = format!("column '{column}' not present in source schema");
            return Evaluator::Faulted { expectation, exception };
        }

        let predicate = match expectation.kind() {
            ExpectationKind::ValuesNotNull => Predicate::NotNull,
            ExpectationKind::ValuesOfType { expected_type } => Predicate::OfType(*expected_type),
            ExpectationKind::ValuesBetween { min, max } => Predicate::Between {
                min: *min,
                max: *max,
            },
            ExpectationKind::ValuesMatchFormat { pattern, calendar } => {
                match CompiledFormat::compile(pattern, *calendar) {
                    Ok(format) => Predicate::Format(format),
                    Err(err) => {
                        let exception = err.to_string();
                        return Evaluator::Faulted { expectation, exception };
                    }
                }
            }
            ExpectationKind::ColumnExists => unreachable!("handled above"),
        };

        Evaluator::Scan {
            expectation,
            state: ScanState {
                column,
                predicate,
                unexpected_count: 0,
                examples: Vec::new(),
                structural_gap: None,
            },
        }
    }

    /// Feeds one row to the accumulator.
    pub(crate) fn observe(&mut self, row_index: usize, row: &Row, options: &EngineOptions) {
        let Evaluator::Scan { expectation, state } = self else {
            return;
        };

        let cell = row.get(&state.column);
        if cell.is_none() && state.structural_gap.is_none() {
            state.structural_gap = Some(format!(
                "row {row_index} is missing a cell for column '{}'",
                state.column
            ));
        }
        // an absent cell is evaluated as missing under the kind's policy
        let value = cell.cloned().unwrap_or(Value::Null);

        if !state.predicate.test(&value) {
            state.unexpected_count += 1;
            if state.examples.len() < options.unexpected_sample_limit {
                state.examples.push(UnexpectedValue {
                    row_index,
                    value: value.clone(),
                });
            }
            if options.log.log_expectation_details {
                debug!(
                    expectation = %expectation,
                    row.index = row_index,
                    cell.value = %truncate_field(&value.to_string(), options.log.max_field_length),
                    "Unexpected value"
                );
            }
        }
    }

    /// Finalizes the accumulator into an outcome.
    pub(crate) fn finish(self, row_count: u64) -> ValidationOutcome {
        match self {
            Evaluator::Resolved { expectation, success } => {
                if success {
                    ValidationOutcome::passed(expectation, 1)
                } else {
                    ValidationOutcome::failed(expectation, 1, 0, Vec::new())
                }
            }
            Evaluator::Faulted { expectation, exception } => {
                ValidationOutcome::faulted(expectation, exception)
            }
            Evaluator::Scan { expectation, state } => {
                let outcome = if state.unexpected_count == 0 {
                    ValidationOutcome::passed(expectation, row_count)
                } else {
                    ValidationOutcome::failed(
                        expectation,
                        row_count,
                        state.unexpected_count,
                        state.examples,
                    )
                };
                match state.structural_gap {
                    Some(gap) => outcome.with_exception(gap),
                    None => outcome,
                }
            }
        }
    }
}
