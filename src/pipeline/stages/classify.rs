//! Pure classification of delta records.

use crate::core::{ClassifiedRecord, DeltaRecord};
use crate::risk::RiskClassifier;

/// Attach raw and cleaned risk categories to one record (pure).
pub fn classify_record(record: DeltaRecord, classifier: &RiskClassifier) -> ClassifiedRecord {
    let risk_category = classifier.classify(&record.deltas);
    ClassifiedRecord {
        delta: record,
        risk_category,
        risk_category_cleaned: risk_category.cleaned(),
    }
}

/// Classify every record, preserving order (pure).
pub fn classify_records(
    records: Vec<DeltaRecord>,
    classifier: &RiskClassifier,
) -> Vec<ClassifiedRecord> {
    records
        .into_iter()
        .map(|record| classify_record(record, classifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deltas, EmissionRecord};
    use crate::pipeline::stages::intensity::derive_intensity;
    use crate::risk::{CleanedCategory, RiskCategory};

    #[test]
    fn test_cleaned_category_follows_raw_category() {
        let record = DeltaRecord {
            intensity: derive_intensity(EmissionRecord::new(
                0,
                2023,
                "A",
                Some(10.0),
                Some(1.0),
                Some(1.0),
            )),
            deltas: Deltas::missing(),
        };
        let classified = classify_record(record, &RiskClassifier::default());
        assert_eq!(classified.risk_category, RiskCategory::InsufficientData);
        assert_eq!(classified.risk_category_cleaned, CleanedCategory::Other);
    }
}
