use serde::{Deserialize, Serialize};

use crate::pipeline::{DEFAULT_SNAPSHOT_YEAR, DEFAULT_TREND_START_YEAR};
use crate::risk::DEFAULT_OFFSET_THRESHOLD;

/// Root configuration structure for greenrisk
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GreenriskConfig {
    /// Source column names
    #[serde(default)]
    pub columns: Option<ColumnsConfig>,

    /// Classification rule parameters
    #[serde(default)]
    pub classification: Option<ClassificationConfig>,

    /// Snapshot and trend year settings
    #[serde(default)]
    pub analysis: Option<AnalysisSettings>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// Header names of the required source columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnsConfig {
    #[serde(default = "default_year_column")]
    pub year: String,

    #[serde(default = "default_entity_column")]
    pub parent_entity: String,

    #[serde(default = "default_production_column")]
    pub production_value: String,

    #[serde(default = "default_operational_column")]
    pub operational_emissions: String,

    #[serde(default = "default_product_column")]
    pub product_emissions: String,

    /// Headers matching this regex are dropped before processing
    #[serde(default = "default_unnamed_pattern")]
    pub unnamed_pattern: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            year: default_year_column(),
            parent_entity: default_entity_column(),
            production_value: default_production_column(),
            operational_emissions: default_operational_column(),
            product_emissions: default_product_column(),
            unnamed_pattern: default_unnamed_pattern(),
        }
    }
}

fn default_year_column() -> String {
    "year".to_string()
}
fn default_entity_column() -> String {
    "parent_entity".to_string()
}
fn default_production_column() -> String {
    "production_value".to_string()
}
fn default_operational_column() -> String {
    "total_operational_emissions_MtCO2e".to_string()
}
fn default_product_column() -> String {
    "product_emissions_MtCO2".to_string()
}
fn default_unnamed_pattern() -> String {
    "Unnamed".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationConfig {
    /// Scope 3 delta strictly below this is offset-heavy (MtCO2)
    #[serde(default = "default_offset_threshold")]
    pub offset_threshold: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            offset_threshold: default_offset_threshold(),
        }
    }
}

fn default_offset_threshold() -> f64 {
    DEFAULT_OFFSET_THRESHOLD
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisSettings {
    #[serde(default = "default_snapshot_year")]
    pub snapshot_year: i32,

    #[serde(default = "default_trend_start_year")]
    pub trend_start_year: i32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            snapshot_year: default_snapshot_year(),
            trend_start_year: default_trend_start_year(),
        }
    }
}

fn default_snapshot_year() -> i32 {
    DEFAULT_SNAPSHOT_YEAR
}
fn default_trend_start_year() -> i32 {
    DEFAULT_TREND_START_YEAR
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// One of terminal, json, markdown
    pub default_format: Option<String>,
    /// Directory for rendered charts (default: current directory)
    #[serde(default)]
    pub charts_dir: Option<String>,
}

impl GreenriskConfig {
    pub fn columns(&self) -> ColumnsConfig {
        self.columns.clone().unwrap_or_default()
    }

    pub fn classification(&self) -> ClassificationConfig {
        self.classification.clone().unwrap_or_default()
    }

    pub fn analysis(&self) -> AnalysisSettings {
        self.analysis.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}
