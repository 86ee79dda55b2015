//! The validation engine: evaluates a suite against a record source.
//!
//! The engine makes exactly one row-major pass over the source and feeds
//! every row to every expectation's accumulator, so sources do not need to
//! be replayable and memory stays bounded by the expectation count and the
//! unexpected-example sample cap, never by the row count.

use crate::core::{ExpectationSuite, ValidationResult};
use crate::error::{AssayError, Result};
use crate::logging::LogConfig;
use crate::sources::RecordSource;
use tracing::{debug, info, instrument, warn};

mod evaluator;

use evaluator::Evaluator;

/// Default cap on `unexpected_examples` per outcome.
pub const DEFAULT_UNEXPECTED_SAMPLE_LIMIT: usize = 20;

/// Tuning knobs for a [`ValidationEngine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Maximum number of `(row_index, value)` examples captured per failing
    /// expectation; `unexpected_count` stays exact regardless
    pub unexpected_sample_limit: usize,
    /// Logging behavior during evaluation
    pub log: LogConfig,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            unexpected_sample_limit: DEFAULT_UNEXPECTED_SAMPLE_LIMIT,
            log: LogConfig::default(),
        }
    }
}

impl EngineOptions {
    /// Creates options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-outcome cap on captured unexpected examples.
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.unexpected_sample_limit = limit;
        self
    }

    /// Sets the logging configuration.
    pub fn with_log_config(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

/// Evaluates expectation suites against record sources.
///
/// `validate` is a pure function of the suite and the source contents:
/// identical inputs always produce a structurally identical
/// [`ValidationResult`]. Timestamps belong to downstream report renderers,
/// not to this engine.
///
/// # Examples
///
/// ```rust
/// use assay_core::core::{Expectation, ExpectationSuite};
/// use assay_core::engine::ValidationEngine;
/// use assay_core::sources::MemorySource;
/// use assay_core::core::Value;
///
/// let suite = ExpectationSuite::builder("player_stats")
///     .expect(Expectation::column_exists("points"))
///     .expect(Expectation::values_between("points", 0.0, 100.0)?)
///     .build()?;
///
/// let source = MemorySource::builder("games")
///     .columns(["points"])
///     .row([Value::from(25)])
///     .row([Value::from(31)])
///     .build()?;
///
/// let result = ValidationEngine::new().validate(&suite, &source)?;
/// assert!(result.is_success());
/// # Ok::<(), assay_core::error::AssayError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    options: EngineOptions,
}

impl ValidationEngine {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given options.
    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Runs every expectation in the suite against the source, in suite
    /// order, independently.
    ///
    /// Per-expectation faults (absent column, invalid deserialized
    /// parameters) are recorded in the corresponding outcome and never abort
    /// the run. Only a source read failure is fatal: it surfaces as
    /// [`AssayError::SourceExhausted`] and no partial result is produced.
    #[instrument(skip(self, suite, source), fields(
        suite.name = %suite.name(),
        suite.expectations = suite.len(),
        source.id = %source.identifier()
    ))]
    pub fn validate(
        &self,
        suite: &ExpectationSuite,
        source: &dyn RecordSource,
    ) -> Result<ValidationResult> {
        info!(
            suite.name = %suite.name(),
            suite.expectations = suite.len(),
            source.id = %source.identifier(),
            "Starting validation run"
        );

        let schema = source.schema();
        let mut evaluators: Vec<Evaluator> = suite
            .expectations()
            .iter()
            .map(|expectation| Evaluator::bind(expectation.clone(), schema))
            .collect();

        for evaluator in &evaluators {
            if let Evaluator::Faulted { expectation, exception } = evaluator {
                warn!(
                    expectation = %expectation,
                    exception = %exception,
                    "Expectation cannot be evaluated; recording and continuing"
                );
            }
        }

        let rows = source
            .rows()
            .map_err(|err| Self::fatal_read_error(source.identifier(), err))?;

        let mut row_count: u64 = 0;
        for (row_index, row) in rows.enumerate() {
            let row = row.map_err(|err| Self::fatal_read_error(source.identifier(), err))?;
            row_count += 1;
            for evaluator in evaluators.iter_mut() {
                evaluator.observe(row_index, &row, &self.options);
            }
        }

        if self.options.log.log_source_operations {
            debug!(
                source.id = %source.identifier(),
                source.rows = row_count,
                "Source pass complete"
            );
        }

        let outcomes = evaluators
            .into_iter()
            .map(|evaluator| evaluator.finish(row_count))
            .collect();

        let result = ValidationResult::new(suite.name(), source.identifier(), outcomes);

        info!(
            suite.name = %result.suite_name,
            statistics.evaluated = result.statistics.evaluated_expectations,
            statistics.successful = result.statistics.successful_expectations,
            statistics.unsuccessful = result.statistics.unsuccessful_expectations,
            statistics.success_percent = %format!("{:.2}", result.statistics.success_percent),
            run.result = %if result.success { "passed" } else { "failed" },
            "Validation run completed"
        );

        Ok(result)
    }

    /// Wraps a source read failure, preserving an already-specific
    /// exhaustion error.
    fn fatal_read_error(identifier: &str, err: AssayError) -> AssayError {
        match err {
            exhausted @ AssayError::SourceExhausted { .. } => exhausted,
            other => AssayError::source_exhausted(identifier, other.to_string()),
        }
    }
}
