//! Report model shared by the terminal, JSON and markdown writers.

use crate::core::{ClassifiedRecord, Deltas, TrendPoint};
use crate::pipeline::stages::aggregation::percentage;
use crate::pipeline::PipelineOutput;
use crate::risk::{CleanedCategory, RiskCategory};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotShare {
    pub category: CleanedCategory,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawCategoryCount {
    pub category: RiskCategory,
    pub count: usize,
}

/// One entity's snapshot representative, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Representative {
    pub parent_entity: String,
    pub year: i32,
    pub scope1_intensity: Option<f64>,
    pub scope3_intensity: Option<f64>,
    #[serde(flatten)]
    pub deltas: Deltas,
    pub risk_category: RiskCategory,
    pub risk_category_cleaned: CleanedCategory,
}

impl From<&ClassifiedRecord> for Representative {
    fn from(record: &ClassifiedRecord) -> Self {
        Self {
            parent_entity: record.parent_entity().to_string(),
            year: record.year(),
            scope1_intensity: record.scope1_intensity(),
            scope3_intensity: record.scope3_intensity(),
            deltas: *record.deltas(),
            risk_category: record.risk_category,
            risk_category_cleaned: record.risk_category_cleaned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    pub snapshot_year: i32,
    pub trend_start_year: i32,
    pub trend_end_year: i32,
    pub total_records: usize,
    pub skipped_rows: usize,
    pub entity_count: usize,
    pub raw_distribution: Vec<RawCategoryCount>,
    pub snapshot: Vec<SnapshotShare>,
    pub snapshot_entities: usize,
    pub representatives: Vec<Representative>,
    pub trend: Vec<TrendPoint>,
    pub charts: Vec<PathBuf>,
}

impl RiskReport {
    /// Assemble a report; `top` limits the listed representatives.
    pub fn build(
        source: PathBuf,
        output: &PipelineOutput,
        skipped_rows: usize,
        top: Option<usize>,
    ) -> Self {
        let total = output.snapshot_total();
        let snapshot = output
            .snapshot_counts
            .iter()
            .map(|c| SnapshotShare {
                category: c.category,
                count: c.count,
                percentage: percentage(c.count, total),
            })
            .collect();

        let raw_distribution = output
            .raw_distribution
            .iter()
            .map(|(category, count)| RawCategoryCount {
                category: *category,
                count: *count,
            })
            .collect();

        let representatives = output
            .representatives
            .iter()
            .take(top.unwrap_or(usize::MAX))
            .map(Representative::from)
            .collect();

        Self {
            generated_at: Utc::now(),
            source,
            snapshot_year: output.settings_snapshot_year,
            trend_start_year: output.settings_trend_start_year,
            trend_end_year: output.trend_end_year(),
            total_records: output.classified.len(),
            skipped_rows,
            entity_count: output.entity_count,
            raw_distribution,
            snapshot,
            snapshot_entities: output.representatives.len(),
            representatives,
            trend: output.trend.clone(),
            charts: Vec::new(),
        }
    }

    /// Trend counts for one year, in category order.
    pub fn trend_for_year(&self, year: i32) -> Vec<&TrendPoint> {
        self.trend.iter().filter(|p| p.year == year).collect()
    }

    /// Years covered by the trend, ascending and deduplicated.
    pub fn trend_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.trend.iter().map(|p| p.year).collect();
        years.dedup();
        years
    }
}
