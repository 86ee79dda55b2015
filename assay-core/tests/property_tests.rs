//! Property-based tests for the validation engine.
//!
//! These verify the engine's structural contract across a wide range of
//! generated suites and sources:
//! - one outcome per expectation, in suite order
//! - overall success is exactly the conjunction of outcome successes
//! - validation is idempotent over an immutable source
//! - `values_between` respects its inclusive boundaries
//! - counts are exact regardless of the example sample cap

use assay_core::core::{Expectation, ExpectationSuite, ExpectedType, Value};
use assay_core::engine::{EngineOptions, ValidationEngine};
use assay_core::sources::MemorySource;
use proptest::prelude::*;

/// A generated cell for the single-column sources used below.
fn arb_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (-1000i64..1000).prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ]
}

/// One expectation from the closed kind set, bound to the generated
/// source's column `v` (or to the absent column `w`, to exercise the
/// recorded-fault path).
fn arb_expectation() -> impl Strategy<Value = Expectation> {
    prop_oneof![
        Just(Expectation::column_exists("v")),
        Just(Expectation::column_exists("w")),
        Just(Expectation::values_not_null("v")),
        Just(Expectation::values_not_null("w")),
        Just(Expectation::values_of_type("v", ExpectedType::Integer)),
        Just(Expectation::values_of_type("v", ExpectedType::String)),
        (-100i64..100, 0i64..100).prop_map(|(min, span)| {
            Expectation::values_between("v", min as f64, (min + span) as f64).unwrap()
        }),
        Just(Expectation::values_match_format("v", "YYYY-MM-DD").unwrap()),
    ]
}

fn single_column_source(cells: &[Value]) -> MemorySource {
    let mut builder = MemorySource::builder("generated").columns(["v"]);
    for cell in cells {
        builder = builder.row([cell.clone()]);
    }
    builder.build().unwrap()
}

fn suite_of(expectations: Vec<Expectation>) -> ExpectationSuite {
    ExpectationSuite::builder("generated")
        .expectations(expectations)
        .build()
        .unwrap()
}

proptest! {
    /// `validate(S, D).outcomes` has one entry per expectation and
    /// preserves suite order.
    #[test]
    fn outcome_count_and_order_match_suite(
        expectations in prop::collection::vec(arb_expectation(), 0..12),
        cells in prop::collection::vec(arb_cell(), 0..30),
    ) {
        let suite = suite_of(expectations);
        let source = single_column_source(&cells);

        let result = ValidationEngine::new().validate(&suite, &source).unwrap();

        prop_assert_eq!(result.outcomes.len(), suite.len());
        for (outcome, expectation) in result.outcomes.iter().zip(suite.expectations()) {
            prop_assert_eq!(&outcome.expectation, expectation);
        }
    }

    /// `result.success` holds iff every outcome succeeded, and the
    /// statistics agree with the outcomes.
    #[test]
    fn success_is_conjunction_of_outcomes(
        expectations in prop::collection::vec(arb_expectation(), 0..12),
        cells in prop::collection::vec(arb_cell(), 0..30),
    ) {
        let suite = suite_of(expectations);
        let source = single_column_source(&cells);

        let result = ValidationEngine::new().validate(&suite, &source).unwrap();

        let all_passed = result.outcomes.iter().all(|o| o.success);
        prop_assert_eq!(result.success, all_passed);

        let successful = result.outcomes.iter().filter(|o| o.success).count();
        prop_assert_eq!(result.statistics.successful_expectations, successful);
        prop_assert_eq!(
            result.statistics.unsuccessful_expectations,
            result.outcomes.len() - successful
        );
    }

    /// Validating the same immutable source twice yields structurally
    /// equal results.
    #[test]
    fn validation_is_idempotent(
        expectations in prop::collection::vec(arb_expectation(), 0..12),
        cells in prop::collection::vec(arb_cell(), 0..30),
    ) {
        let suite = suite_of(expectations);
        let source = single_column_source(&cells);
        let engine = ValidationEngine::new();

        let first = engine.validate(&suite, &source).unwrap();
        let second = engine.validate(&suite, &source).unwrap();

        prop_assert_eq!(first, second);
    }

    /// `values_between` is inclusive on both ends; missing and non-numeric
    /// cells count as unexpected.
    #[test]
    fn between_counts_match_reference(
        min in -1000i64..1000,
        span in 0i64..500,
        cells in prop::collection::vec(prop::option::of(-2000i64..2000), 0..50),
    ) {
        let max = min + span;
        let suite = suite_of(vec![
            Expectation::values_between("v", min as f64, max as f64).unwrap(),
        ]);
        let values: Vec<Value> = cells.iter().map(|c| Value::from(*c)).collect();
        let source = single_column_source(&values);

        let result = ValidationEngine::new().validate(&suite, &source).unwrap();
        let outcome = &result.outcomes[0];

        let expected_unexpected = cells
            .iter()
            .filter(|c| match c {
                Some(v) => *v < min || *v > max,
                None => true,
            })
            .count() as u64;

        prop_assert_eq!(outcome.unexpected_count, expected_unexpected);
        prop_assert_eq!(outcome.success, expected_unexpected == 0);
        prop_assert_eq!(outcome.observed_count, cells.len() as u64);
    }

    /// The sample cap bounds captured examples, never the exact count.
    #[test]
    fn sample_cap_never_distorts_counts(
        cells in prop::collection::vec(prop::option::of(0i64..10), 0..60),
        limit in 0usize..10,
    ) {
        let suite = suite_of(vec![Expectation::values_not_null("v")]);
        let values: Vec<Value> = cells.iter().map(|c| Value::from(*c)).collect();
        let source = single_column_source(&values);

        let engine = ValidationEngine::with_options(
            EngineOptions::new().with_sample_limit(limit),
        );
        let result = engine.validate(&suite, &source).unwrap();
        let outcome = &result.outcomes[0];

        let nulls = cells.iter().filter(|c| c.is_none()).count() as u64;
        prop_assert_eq!(outcome.unexpected_count, nulls);
        prop_assert_eq!(outcome.unexpected_examples.len(), limit.min(nulls as usize));

        // captured examples appear in row order
        let indices: Vec<usize> = outcome.unexpected_examples.iter().map(|e| e.row_index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        prop_assert_eq!(indices, sorted);
    }
}

mod edge_case_tests {
    use super::*;

    #[test]
    fn empty_source_passes_row_expectations_vacuously() {
        let suite = suite_of(vec![
            Expectation::values_not_null("v"),
            Expectation::values_between("v", 0.0, 1.0).unwrap(),
        ]);
        let source = single_column_source(&[]);

        let result = ValidationEngine::new().validate(&suite, &source).unwrap();

        assert!(result.is_success());
        for outcome in &result.outcomes {
            assert_eq!(outcome.observed_count, 0);
            assert_eq!(outcome.unexpected_count, 0);
        }
    }

    #[test]
    fn empty_suite_is_vacuously_successful() {
        let suite = suite_of(vec![]);
        let source = single_column_source(&[Value::from(1)]);

        let result = ValidationEngine::new().validate(&suite, &source).unwrap();

        assert!(result.is_success());
        assert!(result.outcomes.is_empty());
        assert_eq!(result.statistics.success_percent, 100.0);
    }

    #[test]
    fn degenerate_range_accepts_exactly_one_value() {
        let suite = suite_of(vec![Expectation::values_between("v", 48.0, 48.0).unwrap()]);
        let source = single_column_source(&[
            Value::from(48),
            Value::from("48"),
            Value::from(47),
            Value::from(49),
        ]);

        let result = ValidationEngine::new().validate(&suite, &source).unwrap();
        let outcome = &result.outcomes[0];

        assert_eq!(outcome.unexpected_count, 2);
        let indices: Vec<usize> = outcome.unexpected_examples.iter().map(|e| e.row_index).collect();
        assert_eq!(indices, vec![2, 3]);
    }
}
