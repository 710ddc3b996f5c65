//! Pure intensity derivation.
//!
//! Emissions are normalized by production value. An unusable denominator
//! produces a missing intensity instead of an error.

use crate::core::{EmissionRecord, IntensityRecord};

/// Divide emissions by production (pure).
///
/// Returns `None` when either operand is missing, production is zero, or the
/// quotient is not finite.
pub fn intensity(emissions: Option<f64>, production: Option<f64>) -> Option<f64> {
    let (emissions, production) = (emissions?, production?);
    if production == 0.0 {
        return None;
    }
    Some(emissions / production).filter(|value| value.is_finite())
}

/// Augment one record with Scope 1 and Scope 3 intensity (pure).
pub fn derive_intensity(record: EmissionRecord) -> IntensityRecord {
    let scope1_intensity = intensity(record.total_operational_emissions, record.production_value);
    let scope3_intensity = intensity(record.product_emissions, record.production_value);

    IntensityRecord {
        record,
        scope1_intensity,
        scope3_intensity,
    }
}

/// Augment every record with intensities, preserving input order (pure).
pub fn derive_intensities(records: Vec<EmissionRecord>) -> Vec<IntensityRecord> {
    records.into_iter().map(derive_intensity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_divides_emissions_by_production() {
        let record = EmissionRecord::new(0, 2023, "A", Some(10.0), Some(80.0), Some(30.0));
        let derived = derive_intensity(record);
        assert_eq!(derived.scope1_intensity, Some(8.0));
        assert_eq!(derived.scope3_intensity, Some(3.0));
        assert!(derived.has_intensity());
    }

    #[test]
    fn test_zero_production_yields_missing_intensity() {
        let record = EmissionRecord::new(0, 2023, "A", Some(0.0), Some(80.0), Some(0.0));
        let derived = derive_intensity(record);
        assert_eq!(derived.scope1_intensity, None);
        assert_eq!(derived.scope3_intensity, None);
        assert!(!derived.has_intensity());
    }

    #[test]
    fn test_missing_operand_yields_missing_intensity() {
        assert_eq!(intensity(None, Some(3.0)), None);
        assert_eq!(intensity(Some(3.0), None), None);
        assert_eq!(intensity(Some(f64::NAN), Some(3.0)), None);
    }

    #[test]
    fn test_derive_intensities_preserves_order() {
        let records = vec![
            EmissionRecord::new(0, 2022, "B", Some(1.0), Some(1.0), Some(1.0)),
            EmissionRecord::new(1, 2021, "A", Some(2.0), Some(1.0), Some(1.0)),
        ];
        let derived = derive_intensities(records);
        let rows: Vec<usize> = derived.iter().map(|r| r.record.row).collect();
        assert_eq!(rows, vec![0, 1]);
    }
}
