//! Pure functional pipeline for greenwashing risk analysis.
//!
//! The pipeline turns loaded [`EmissionRecord`]s into classified records,
//! per-entity snapshot representatives and aggregate counts. All business logic
//! lives in [`stages`]; this module only sequences the stages and logs what
//! each one produced.

pub mod stages;

use crate::core::{CategoryCount, ClassifiedRecord, EmissionRecord, TrendPoint};
use crate::observability::{phase_span, PipelinePhase};
use crate::risk::{RiskCategory, RiskClassifier};
use serde::Serialize;
use stages::{aggregation, classify, delta, intensity, selection};
use tracing::{debug, info};

pub const DEFAULT_SNAPSHOT_YEAR: i32 = 2023;
pub const DEFAULT_TREND_START_YEAR: i32 = 2005;

/// Parameters of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub classifier: RiskClassifier,
    pub snapshot_year: i32,
    pub trend_start_year: i32,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            classifier: RiskClassifier::default(),
            snapshot_year: DEFAULT_SNAPSHOT_YEAR,
            trend_start_year: DEFAULT_TREND_START_YEAR,
        }
    }
}

/// Everything a run produces, ready for reporting and rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub settings_snapshot_year: i32,
    pub settings_trend_start_year: i32,
    /// Grouped by entity, ascending year within each entity
    pub classified: Vec<ClassifiedRecord>,
    /// One record per entity observed in the snapshot year, in entity order
    pub representatives: Vec<ClassifiedRecord>,
    pub snapshot_counts: Vec<CategoryCount>,
    pub trend: Vec<TrendPoint>,
    pub raw_distribution: Vec<(RiskCategory, usize)>,
    pub entity_count: usize,
}

impl PipelineOutput {
    pub fn snapshot_total(&self) -> usize {
        self.snapshot_counts.iter().map(|c| c.count).sum()
    }

    /// Last year present in the trend. When empty, the later of the snapshot
    /// year and the trend start.
    pub fn trend_end_year(&self) -> i32 {
        self.trend
            .iter()
            .map(|p| p.year)
            .max()
            .unwrap_or(self.settings_snapshot_year.max(self.settings_trend_start_year))
    }
}

/// Classify every record: intensity, ordering, deltas, categories.
pub fn classify_all(
    records: Vec<EmissionRecord>,
    classifier: &RiskClassifier,
) -> Vec<ClassifiedRecord> {
    let intensities = {
        let _span = phase_span(PipelinePhase::Intensity);
        let derived = intensity::derive_intensities(records);
        let undefined = derived.iter().filter(|r| !r.has_intensity()).count();
        debug!(records = derived.len(), undefined, "derived emission intensities");
        derived
    };

    let with_deltas = {
        let _span = phase_span(PipelinePhase::Delta);
        let computed = delta::compute_deltas(intensities);
        let first_years = computed.iter().filter(|r| !r.deltas.is_complete()).count();
        debug!(records = computed.len(), incomplete = first_years, "computed year-over-year deltas");
        computed
    };

    let _span = phase_span(PipelinePhase::Classification);
    classify::classify_records(with_deltas, classifier)
}

/// Run the full pipeline over loaded records.
pub fn run_pipeline(records: Vec<EmissionRecord>, settings: &PipelineSettings) -> PipelineOutput {
    let classified = classify_all(records, &settings.classifier);
    let raw_distribution = aggregation::raw_distribution(&classified);
    let entity_count = aggregation::distinct_entities(&classified);
    info!(
        records = classified.len(),
        entities = entity_count,
        "classified emission records"
    );

    let representatives: Vec<ClassifiedRecord> = {
        let _span = phase_span(PipelinePhase::Selection);
        selection::select_representatives(&classified, settings.snapshot_year)
            .into_iter()
            .inspect(|r| {
                debug!(
                    entity = r.parent_entity(),
                    row = r.row(),
                    category = %r.risk_category_cleaned,
                    "selected snapshot representative"
                )
            })
            .cloned()
            .collect()
    };

    let _span = phase_span(PipelinePhase::Aggregation);
    let snapshot_counts = aggregation::count_by_category(&representatives);
    let trend = aggregation::trend_counts(&classified, settings.trend_start_year);
    info!(
        snapshot_year = settings.snapshot_year,
        representatives = representatives.len(),
        trend_points = trend.len(),
        "aggregated risk categories"
    );

    PipelineOutput {
        settings_snapshot_year: settings.snapshot_year,
        settings_trend_start_year: settings.trend_start_year,
        classified,
        representatives,
        snapshot_counts,
        trend,
        raw_distribution,
        entity_count,
    }
}
