//! Pure year-over-year delta computation.
//!
//! Records are ordered by (entity, year, source row) and diffed in a single
//! forward pass against the previous record of the same entity.

use crate::core::{DeltaRecord, Deltas, IntensityRecord};

/// Order records by entity, then year, then source row (pure).
pub fn sort_by_entity_and_year(mut records: Vec<IntensityRecord>) -> Vec<IntensityRecord> {
    records.sort_by(|a, b| {
        a.record
            .parent_entity
            .cmp(&b.record.parent_entity)
            .then(a.record.year.cmp(&b.record.year))
            .then(a.record.row.cmp(&b.record.row))
    });
    records
}

fn difference(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    Some(current? - previous?)
}

/// Differences of `current` against `previous` (pure).
///
/// A record without usable intensity gets no deltas, so it always lands in
/// the insufficient-data bucket.
pub fn deltas_between(current: &IntensityRecord, previous: Option<&IntensityRecord>) -> Deltas {
    let Some(previous) = previous else {
        return Deltas::missing();
    };
    if !current.has_intensity() {
        return Deltas::missing();
    }

    let (cur, prev) = (&current.record, &previous.record);
    Deltas {
        scope1: difference(cur.total_operational_emissions, prev.total_operational_emissions),
        scope3: difference(cur.product_emissions, prev.product_emissions),
        production: difference(cur.production_value, prev.production_value),
    }
}

/// Compute deltas for every record (pure).
///
/// Output is grouped by entity and ascending by year within each group. The
/// first record of each entity has all deltas missing.
pub fn compute_deltas(records: Vec<IntensityRecord>) -> Vec<DeltaRecord> {
    let sorted = sort_by_entity_and_year(records);
    let mut output: Vec<DeltaRecord> = Vec::with_capacity(sorted.len());

    for record in sorted {
        let previous = output
            .last()
            .map(|prev| &prev.intensity)
            .filter(|prev| prev.record.parent_entity == record.record.parent_entity);
        let deltas = deltas_between(&record, previous);
        output.push(DeltaRecord {
            intensity: record,
            deltas,
        });
    }

    output
}
