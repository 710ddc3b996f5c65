//! Record types flowing through the analysis pipeline.
//!
//! Each stage wraps the previous stage's record rather than copying its
//! fields, so a [`ClassifiedRecord`] still exposes the original
//! [`EmissionRecord`] it was derived from.

use crate::risk::{CleanedCategory, RiskCategory};
use serde::{Deserialize, Serialize};

/// One row of the source table, keyed by (entity, year).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    /// Zero-based data row in the source table (header excluded)
    pub row: usize,
    pub year: i32,
    pub parent_entity: String,
    pub production_value: Option<f64>,
    /// Scope 1, MtCO2e
    pub total_operational_emissions: Option<f64>,
    /// Scope 3, MtCO2
    pub product_emissions: Option<f64>,
}

impl EmissionRecord {
    pub fn new(
        row: usize,
        year: i32,
        parent_entity: impl Into<String>,
        production_value: Option<f64>,
        total_operational_emissions: Option<f64>,
        product_emissions: Option<f64>,
    ) -> Self {
        Self {
            row,
            year,
            parent_entity: parent_entity.into(),
            production_value,
            total_operational_emissions,
            product_emissions,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntensityRecord {
    #[serde(flatten)]
    pub record: EmissionRecord,
    pub scope1_intensity: Option<f64>,
    pub scope3_intensity: Option<f64>,
}

impl IntensityRecord {
    /// Both intensities are defined only when production is usable.
    pub fn has_intensity(&self) -> bool {
        self.scope1_intensity.is_some() && self.scope3_intensity.is_some()
    }
}

/// Year-over-year differences against the entity's previous record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deltas {
    #[serde(rename = "scope1_delta")]
    pub scope1: Option<f64>,
    #[serde(rename = "scope3_delta")]
    pub scope3: Option<f64>,
    #[serde(rename = "production_delta")]
    pub production: Option<f64>,
}

impl Deltas {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.scope1.is_some() && self.scope3.is_some() && self.production.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeltaRecord {
    #[serde(flatten)]
    pub intensity: IntensityRecord,
    #[serde(flatten)]
    pub deltas: Deltas,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub delta: DeltaRecord,
    pub risk_category: RiskCategory,
    pub risk_category_cleaned: CleanedCategory,
}

impl ClassifiedRecord {
    pub fn emission(&self) -> &EmissionRecord {
        &self.delta.intensity.record
    }

    pub fn year(&self) -> i32 {
        self.emission().year
    }

    pub fn parent_entity(&self) -> &str {
        &self.emission().parent_entity
    }

    pub fn row(&self) -> usize {
        self.emission().row
    }

    pub fn scope1_intensity(&self) -> Option<f64> {
        self.delta.intensity.scope1_intensity
    }

    pub fn scope3_intensity(&self) -> Option<f64> {
        self.delta.intensity.scope3_intensity
    }

    pub fn deltas(&self) -> &Deltas {
        &self.delta.deltas
    }
}

/// Count of records falling into one cleaned category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: CleanedCategory,
    pub count: usize,
}

/// Distinct entities in one cleaned category for one year.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub category: CleanedCategory,
    pub count: usize,
}
