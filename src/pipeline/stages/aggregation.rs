//! Pure aggregation functions for counting classified records.

use crate::core::{CategoryCount, ClassifiedRecord, TrendPoint};
use crate::risk::{CleanedCategory, RiskCategory};
use std::collections::{BTreeMap, BTreeSet};

/// Count records per cleaned category (pure).
///
/// Only categories that occur are returned, ordered by descending count and
/// then by category order.
pub fn count_by_category<'a, I>(records: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a ClassifiedRecord>,
{
    let mut counts: BTreeMap<CleanedCategory, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.risk_category_cleaned).or_default() += 1;
    }

    let mut result: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
    result
}

/// Count records per raw category, in category order (pure).
pub fn raw_distribution(records: &[ClassifiedRecord]) -> Vec<(RiskCategory, usize)> {
    RiskCategory::ALL
        .iter()
        .map(|category| {
            let count = records
                .iter()
                .filter(|r| r.risk_category == *category)
                .count();
            (*category, count)
        })
        .collect()
}

/// Distinct entities per (year, cleaned category) from `start_year` on (pure).
///
/// Triples are sorted by year, then category. Combinations with no entities
/// are omitted.
pub fn trend_counts(records: &[ClassifiedRecord], start_year: i32) -> Vec<TrendPoint> {
    let mut entities: BTreeMap<(i32, CleanedCategory), BTreeSet<&str>> = BTreeMap::new();

    for record in records.iter().filter(|r| r.year() >= start_year) {
        entities
            .entry((record.year(), record.risk_category_cleaned))
            .or_default()
            .insert(record.parent_entity());
    }

    entities
        .into_iter()
        .map(|((year, category), names)| TrendPoint {
            year,
            category,
            count: names.len(),
        })
        .collect()
}

/// Number of distinct entities in the dataset (pure).
pub fn distinct_entities(records: &[ClassifiedRecord]) -> usize {
    records
        .iter()
        .map(|r| r.parent_entity())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Share of `count` in `total` as a percentage, 0 when `total` is 0 (pure).
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / total as f64
}
