//! # Assay - Declarative Data Quality for Rust
//!
//! Assay is a tabular data-quality validation engine: you declare
//! expectations over columns, run them against any row-oriented source, and
//! get back a structured per-expectation pass/fail report. It implements
//! the evaluation machinery itself, in a single synchronous pass, without
//! delegating to an external query engine.
//!
//! ## Overview
//!
//! Data arriving from files, pipelines or third parties rarely matches what
//! downstream code assumes. Assay lets you write those assumptions down as
//! an [`ExpectationSuite`](crate::core::ExpectationSuite) and check them before the
//! data travels any further: which columns must exist, which cells may be
//! null, what type and range values must have, what lexical shape a date
//! column follows.
//!
//! ## Quick Start
//!
//! ```rust
//! use assay_core::prelude::*;
//!
//! # fn example() -> Result<()> {
//! // Declare what well-formed data looks like
//! let suite = ExpectationSuite::builder("player_stats")
//!     .expect(Expectation::column_exists("player_name"))
//!     .expect(Expectation::values_not_null("player_name"))
//!     .expect(Expectation::values_of_type("points", ExpectedType::Integer))
//!     .expect(Expectation::values_between("minutes_played", 0.0, 48.0)?)
//!     .expect(Expectation::values_match_format("game_date", "YYYY-MM-DD")?)
//!     .build()?;
//!
//! // Any row-oriented source satisfies the RecordSource contract;
//! // MemorySource covers callers that already hold their rows
//! let source = MemorySource::builder("games_2024_01_15")
//!     .columns(["player_name", "points", "minutes_played", "game_date"])
//!     .row([
//!         Value::from("LeBron James"),
//!         Value::from(25),
//!         Value::from(35),
//!         Value::from("2024-01-15"),
//!     ])
//!     .build()?;
//!
//! // One run produces one immutable result
//! let result = ValidationEngine::new().validate(&suite, &source)?;
//!
//! if !result.is_success() {
//!     for outcome in result.failures() {
//!         println!(
//!             "{}: {} unexpected values",
//!             outcome.expectation, outcome.unexpected_count
//!         );
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Evaluation model
//!
//! - Every expectation is evaluated exactly once, in suite order,
//!   independently: no expectation's outcome depends on another's.
//! - One bad expectation (absent column, malformed deserialized parameters)
//!   is recorded in its own outcome and never prevents the rest of the
//!   suite from running. Only a source read failure aborts the run.
//! - The engine reads the source in a single row-major sweep, so sources do
//!   not need to be replayable and memory use is independent of row count.
//! - Results are a pure function of `(suite, source contents)`: no hidden
//!   state, no randomness, no timestamps.
//!
//! ## Architecture
//!
//! - **`core`**: the data model — [`Value`](crate::core::Value),
//!   [`Expectation`](crate::core::Expectation),
//!   [`ExpectationSuite`](crate::core::ExpectationSuite), and the result types
//! - **`engine`**: the single-pass [`ValidationEngine`](engine::ValidationEngine)
//! - **`sources`**: the [`RecordSource`](sources::RecordSource) contract and
//!   the in-memory implementation
//! - **`error`**: the crate-wide error type and `Result` alias
//! - **`logging`**: structured-logging configuration and setup helpers
//!
//! ## Suite persistence
//!
//! Suites serialize to a self-describing JSON shape, one record per
//! expectation:
//!
//! ```json
//! {
//!   "name": "player_stats",
//!   "expectations": [
//!     {"kind": "column_exists", "column": "points"},
//!     {"kind": "values_between", "column": "points",
//!      "parameters": {"min": 0.0, "max": 100.0}}
//!   ]
//! }
//! ```
//!
//! Deserialized suites are re-validated by the engine before evaluation, so
//! malformed parameters arriving from a file are reported per-outcome
//! instead of panicking mid-run.

pub mod core;
pub mod engine;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod sources;
