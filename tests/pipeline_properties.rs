//! Property-based tests for the risk pipeline
//!
//! These tests verify invariants that should hold for all inputs:
//! - Every record lands in exactly one cleaned category
//! - Running the pipeline twice gives identical results
//! - Entities observed in a single year are always `Other`
//! - Trend counts per year sum to the distinct entities of that year
//! - The snapshot has one representative per entity present that year

use greenrisk::core::EmissionRecord;
use greenrisk::pipeline::{run_pipeline, PipelineSettings};
use greenrisk::risk::{CleanedCategory, RiskCategory};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

const ENTITIES: &[&str] = &["Aramco", "BHP", "Chevron", "Drummond", "Eni"];

/// Emission or production value, sometimes missing or zero.
fn value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(0.0)),
        8 => (0.0f64..1000.0).prop_map(Some),
    ]
}

/// Records with unique (entity, year) keys and sequential row indices.
fn records() -> impl Strategy<Value = Vec<EmissionRecord>> {
    prop::collection::btree_map(
        (0..ENTITIES.len(), 2000i32..2025),
        (value(), value(), value()),
        0..60,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(row, ((entity, year), (prod, s1, s3)))| {
                EmissionRecord::new(row, year, ENTITIES[entity], prod, s1, s3)
            })
            .collect()
    })
}

fn years_by_entity(records: &[EmissionRecord]) -> BTreeMap<String, BTreeSet<i32>> {
    let mut years: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();
    for r in records {
        years.entry(r.parent_entity.clone()).or_default().insert(r.year);
    }
    years
}

proptest! {
    #[test]
    fn prop_cleaned_category_is_one_of_four(input in records()) {
        let output = run_pipeline(input, &PipelineSettings::default());
        for record in &output.classified {
            prop_assert!(CleanedCategory::ALL.contains(&record.risk_category_cleaned));
            prop_assert_eq!(record.risk_category_cleaned, record.risk_category.cleaned());
        }
    }

    #[test]
    fn prop_pipeline_is_idempotent(input in records()) {
        let first = run_pipeline(input.clone(), &PipelineSettings::default());
        let second = run_pipeline(input, &PipelineSettings::default());
        prop_assert_eq!(&first.snapshot_counts, &second.snapshot_counts);
        prop_assert_eq!(&first.trend, &second.trend);
        prop_assert_eq!(&first.raw_distribution, &second.raw_distribution);
    }

    #[test]
    fn prop_single_year_entities_are_other(input in records()) {
        let years = years_by_entity(&input);
        let output = run_pipeline(input, &PipelineSettings::default());
        for record in &output.classified {
            if years[record.parent_entity()].len() == 1 {
                prop_assert_eq!(record.risk_category, RiskCategory::InsufficientData);
                prop_assert_eq!(record.risk_category_cleaned, CleanedCategory::Other);
            }
        }
    }

    #[test]
    fn prop_trend_sums_to_entities_per_year(input in records(), start in 2000i32..2025) {
        let mut expected: BTreeMap<i32, BTreeSet<String>> = BTreeMap::new();
        for r in input.iter().filter(|r| r.year >= start) {
            expected.entry(r.year).or_default().insert(r.parent_entity.clone());
        }

        let settings = PipelineSettings {
            trend_start_year: start,
            ..PipelineSettings::default()
        };
        let output = run_pipeline(input, &settings);

        let mut actual: BTreeMap<i32, usize> = BTreeMap::new();
        for point in &output.trend {
            *actual.entry(point.year).or_default() += point.count;
        }
        let expected: BTreeMap<i32, usize> =
            expected.into_iter().map(|(year, names)| (year, names.len())).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_snapshot_has_one_representative_per_entity(input in records(), year in 2000i32..2025) {
        let present: BTreeSet<&str> = input
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.parent_entity.as_str())
            .collect();
        let expected = present.len();

        let settings = PipelineSettings {
            snapshot_year: year,
            trend_start_year: 2000,
            ..PipelineSettings::default()
        };
        let output = run_pipeline(input.clone(), &settings);

        prop_assert_eq!(output.representatives.len(), expected);
        prop_assert_eq!(output.snapshot_total(), expected);
        prop_assert!(output.representatives.iter().all(|r| r.year() == year));
    }
}
