//! Greenwashing risk categories and the classifier that assigns them.
//!
//! Classification is a pure function of a record's three year-over-year
//! deltas. The raw category set has five members; the cleaned set folds the
//! two indeterminate ones into [`CleanedCategory::Other`].

use crate::core::Deltas;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Scope 3 drop, in MtCO2, below which a flat-or-rising Scope 1 is
/// considered offset-heavy.
pub const DEFAULT_OFFSET_THRESHOLD: f64 = -5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "True Reducer")]
    TrueReducer, // Scope 1 and Scope 3 both falling
    #[serde(rename = "Offset-Heavy")]
    OffsetHeavy, // Scope 1 flat or rising, Scope 3 dropping sharply
    #[serde(rename = "Potential Greenwasher")]
    PotentialGreenwasher, // Scope 1 flat or rising alongside production growth
    #[serde(rename = "Unclassified")]
    Unclassified,
    #[serde(rename = "Insufficient Data")]
    InsufficientData, // At least one delta missing
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::TrueReducer,
        RiskCategory::OffsetHeavy,
        RiskCategory::PotentialGreenwasher,
        RiskCategory::Unclassified,
        RiskCategory::InsufficientData,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TrueReducer => "True Reducer",
            Self::OffsetHeavy => "Offset-Heavy",
            Self::PotentialGreenwasher => "Potential Greenwasher",
            Self::Unclassified => "Unclassified",
            Self::InsufficientData => "Insufficient Data",
        }
    }

    /// Fold indeterminate categories into `Other`.
    pub fn cleaned(&self) -> CleanedCategory {
        match self {
            Self::TrueReducer => CleanedCategory::TrueReducer,
            Self::OffsetHeavy => CleanedCategory::OffsetHeavy,
            Self::PotentialGreenwasher => CleanedCategory::PotentialGreenwasher,
            Self::Unclassified | Self::InsufficientData => CleanedCategory::Other,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CleanedCategory {
    #[serde(rename = "True Reducer")]
    TrueReducer,
    #[serde(rename = "Offset-Heavy")]
    OffsetHeavy,
    #[serde(rename = "Potential Greenwasher")]
    PotentialGreenwasher,
    #[serde(rename = "Other")]
    Other,
}

impl CleanedCategory {
    pub const ALL: [CleanedCategory; 4] = [
        CleanedCategory::TrueReducer,
        CleanedCategory::OffsetHeavy,
        CleanedCategory::PotentialGreenwasher,
        CleanedCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TrueReducer => "True Reducer",
            Self::OffsetHeavy => "Offset-Heavy",
            Self::PotentialGreenwasher => "Potential Greenwasher",
            Self::Other => "Other",
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, Self::Other)
    }
}

impl fmt::Display for CleanedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Assigns risk categories from year-over-year deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskClassifier {
    /// Scope 3 delta strictly below this marks a record offset-heavy
    pub offset_threshold: f64,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self {
            offset_threshold: DEFAULT_OFFSET_THRESHOLD,
        }
    }
}

impl RiskClassifier {
    pub fn new(offset_threshold: f64) -> Self {
        Self { offset_threshold }
    }

    /// First matching rule wins; every input maps to exactly one category.
    pub fn classify(&self, deltas: &Deltas) -> RiskCategory {
        let (Some(scope1), Some(scope3), Some(production)) =
            (deltas.scope1, deltas.scope3, deltas.production)
        else {
            return RiskCategory::InsufficientData;
        };

        match (scope1, scope3, production) {
            (s1, s3, _) if s1 < 0.0 && s3 < 0.0 => RiskCategory::TrueReducer,
            (s1, s3, _) if s1 >= 0.0 && s3 < self.offset_threshold => RiskCategory::OffsetHeavy,
            (s1, _, p) if p > 0.0 && s1 >= 0.0 => RiskCategory::PotentialGreenwasher,
            _ => RiskCategory::Unclassified,
        }
    }
}
