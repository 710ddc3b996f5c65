//! Pure per-entity representative selection for the snapshot year.

use crate::core::ClassifiedRecord;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Group records by entity, keeping only the given year (pure).
///
/// Groups are keyed and iterated in entity order; records inside a group keep
/// their input order.
pub fn group_year_by_entity(
    records: &[ClassifiedRecord],
    year: i32,
) -> BTreeMap<&str, Vec<&ClassifiedRecord>> {
    let mut groups: BTreeMap<&str, Vec<&ClassifiedRecord>> = BTreeMap::new();

    for record in records.iter().filter(|r| r.year() == year) {
        groups.entry(record.parent_entity()).or_default().push(record);
    }

    groups
}

/// Descending Scope 1 intensity, missing intensity last, ties by source row.
fn by_scope1_intensity_desc(a: &&ClassifiedRecord, b: &&ClassifiedRecord) -> Ordering {
    let intensity_order = match (a.scope1_intensity(), b.scope1_intensity()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    intensity_order.then(a.row().cmp(&b.row()))
}

/// Pick the representative record of one entity's group (pure).
///
/// The highest-intensity record wins unless its cleaned category is `Other`,
/// in which case the second-ranked record is taken. Only one fallback is
/// attempted.
pub fn select_representative<'a>(group: &[&'a ClassifiedRecord]) -> Option<&'a ClassifiedRecord> {
    let mut ranked: Vec<&'a ClassifiedRecord> = group.to_vec();
    ranked.sort_by(by_scope1_intensity_desc);

    match ranked.as_slice() {
        [top, second, ..] if top.risk_category_cleaned.is_other() => Some(*second),
        [top, ..] => Some(*top),
        [] => None,
    }
}

/// One representative per entity observed in `year` (pure).
pub fn select_representatives(records: &[ClassifiedRecord], year: i32) -> Vec<&ClassifiedRecord> {
    group_year_by_entity(records, year)
        .values()
        .filter_map(|group| select_representative(group))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeltaRecord, Deltas, EmissionRecord, IntensityRecord};
    use crate::risk::{CleanedCategory, RiskCategory};

    fn classified(
        row: usize,
        entity: &str,
        year: i32,
        scope1_intensity: Option<f64>,
        category: RiskCategory,
    ) -> ClassifiedRecord {
        ClassifiedRecord {
            delta: DeltaRecord {
                intensity: IntensityRecord {
                    record: EmissionRecord::new(row, year, entity, Some(1.0), Some(1.0), Some(1.0)),
                    scope1_intensity,
                    scope3_intensity: Some(1.0),
                },
                deltas: Deltas::missing(),
            },
            risk_category: category,
            risk_category_cleaned: category.cleaned(),
        }
    }

    #[test]
    fn test_falls_back_to_second_row_when_top_is_other() {
        let records = vec![
            classified(0, "A", 2023, Some(9.0), RiskCategory::Unclassified),
            classified(1, "A", 2023, Some(4.0), RiskCategory::TrueReducer),
        ];
        let selected = select_representatives(&records, 2023);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].row(), 1);
    }

    #[test]
    fn test_keeps_top_row_when_definitive() {
        let records = vec![
            classified(0, "A", 2023, Some(4.0), RiskCategory::Unclassified),
            classified(1, "A", 2023, Some(9.0), RiskCategory::OffsetHeavy),
        ];
        let selected = select_representatives(&records, 2023);
        assert_eq!(selected[0].row(), 1);
    }

    #[test]
    fn test_never_looks_past_second_row() {
        let records = vec![
            classified(0, "A", 2023, Some(9.0), RiskCategory::Unclassified),
            classified(1, "A", 2023, Some(8.0), RiskCategory::InsufficientData),
            classified(2, "A", 2023, Some(7.0), RiskCategory::TrueReducer),
        ];
        let selected = select_representatives(&records, 2023);
        assert_eq!(selected[0].row(), 1);
        assert_eq!(selected[0].risk_category_cleaned, CleanedCategory::Other);
    }

    #[test]
    fn test_single_other_row_is_kept() {
        let records = vec![classified(0, "A", 2023, Some(9.0), RiskCategory::Unclassified)];
        let selected = select_representatives(&records, 2023);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].risk_category_cleaned, CleanedCategory::Other);
    }

    #[test]
    fn test_missing_intensity_ranks_last() {
        let records = vec![
            classified(0, "A", 2023, None, RiskCategory::TrueReducer),
            classified(1, "A", 2023, Some(0.5), RiskCategory::OffsetHeavy),
        ];
        let selected = select_representatives(&records, 2023);
        assert_eq!(selected[0].row(), 1);
    }

    #[test]
    fn test_other_years_are_ignored() {
        let records = vec![
            classified(0, "A", 2022, Some(9.0), RiskCategory::TrueReducer),
            classified(1, "B", 2023, Some(1.0), RiskCategory::OffsetHeavy),
        ];
        let selected = select_representatives(&records, 2023);
        let entities: Vec<&str> = selected.iter().map(|r| r.parent_entity()).collect();
        assert_eq!(entities, vec!["B"]);
    }
}
