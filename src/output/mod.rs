//! Report model and SVG chart rendering.

pub mod line;
pub mod pie;
pub mod report;
pub mod svg;

pub use report::{RawCategoryCount, Representative, RiskReport, SnapshotShare};

use crate::errors::Result;
use crate::io::{ensure_dir, write_file};
use crate::observability::{phase_span, PipelinePhase};
use crate::pipeline::PipelineOutput;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn snapshot_title(year: i32) -> String {
    format!("Greenwashing Risk Distribution in {year} (Filtered by Scope1 Intensity)")
}

pub fn trend_title(start: i32, end: i32) -> String {
    format!("Trend of Greenwashing Risk Categories ({start}–{end})")
}

pub fn snapshot_file_name(year: i32) -> String {
    format!("snapshot_{year}.svg")
}

pub fn trend_file_name(start: i32, end: i32) -> String {
    format!("trend_{start}_{end}.svg")
}

fn write_chart(path: PathBuf, svg: String) -> Result<PathBuf> {
    write_file(&path, &svg)?;
    info!(path = %path.display(), "wrote chart");
    Ok(path)
}

/// Render the snapshot pie and trend line charts into `dir`.
///
/// Returns the written paths, snapshot first.
pub fn render_charts(output: &PipelineOutput, dir: &Path) -> Result<Vec<PathBuf>> {
    let _span = phase_span(PipelinePhase::OutputGeneration);
    ensure_dir(dir)?;

    let year = output.settings_snapshot_year;
    let start = output.settings_trend_start_year;
    let end = output.trend_end_year();

    let snapshot = write_chart(
        dir.join(snapshot_file_name(year)),
        pie::render_pie(&snapshot_title(year), &output.snapshot_counts),
    )?;
    let trend = write_chart(
        dir.join(trend_file_name(start, end)),
        line::render_trend(&trend_title(start, end), &output.trend),
    )?;

    Ok(vec![snapshot, trend])
}
