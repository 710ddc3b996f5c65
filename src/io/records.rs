//! Extraction of [`EmissionRecord`]s from a [`RawTable`].

use super::readers::reader_for_path;
use super::table::{Cell, CellMismatch, RawTable};
use crate::config::ColumnsConfig;
use crate::core::EmissionRecord;
use crate::errors::{Error, Result};
use crate::observability::{phase_span, PipelinePhase};
use regex::Regex;
use std::path::Path;
use tracing::{debug, info, warn};

/// Records extracted from one source file, plus what was discarded on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedDataset {
    pub records: Vec<EmissionRecord>,
    pub dropped_columns: Vec<String>,
    /// Data rows without a usable year or entity key
    pub skipped_rows: Vec<usize>,
}

/// Column positions of the required fields after placeholder columns are gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    year: usize,
    parent_entity: usize,
    production_value: usize,
    operational_emissions: usize,
    product_emissions: usize,
}

impl ColumnLayout {
    fn resolve(table: &RawTable, columns: &ColumnsConfig) -> Result<Self> {
        let find = |name: &str| {
            table.column_index(name).ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                available: table.headers.clone(),
            })
        };

        Ok(Self {
            year: find(&columns.year)?,
            parent_entity: find(&columns.parent_entity)?,
            production_value: find(&columns.production_value)?,
            operational_emissions: find(&columns.operational_emissions)?,
            product_emissions: find(&columns.product_emissions)?,
        })
    }
}

fn invalid_cell(row: usize, column: &str, cell: &Cell, expected: &'static str) -> Error {
    Error::InvalidCell {
        row,
        column: column.to_string(),
        value: cell.display_value(),
        expected,
    }
}

fn number_at(
    table: &RawTable,
    row: usize,
    index: usize,
    column: &str,
) -> Result<Option<f64>> {
    let cell = table.cell(row, index);
    cell.as_number()
        .map_err(|CellMismatch| invalid_cell(row, column, cell, "a number"))
}

/// Build records from a table, dropping placeholder columns first.
///
/// Rows lacking a year or entity key are skipped with a warning; a malformed
/// value anywhere else is an error.
pub fn extract_records(mut table: RawTable, columns: &ColumnsConfig) -> Result<LoadedDataset> {
    let pattern = Regex::new(&columns.unnamed_pattern)?;
    let dropped_columns = table.drop_columns_matching(&pattern);
    if !dropped_columns.is_empty() {
        debug!(columns = ?dropped_columns, "dropped placeholder columns");
    }

    let layout = ColumnLayout::resolve(&table, columns)?;
    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped_rows = Vec::new();

    for row in 0..table.rows.len() {
        if table.is_blank_row(row) {
            continue;
        }

        let year_cell = table.cell(row, layout.year);
        let year = year_cell
            .as_year()
            .map_err(|CellMismatch| invalid_cell(row, &columns.year, year_cell, "a whole-number year"))?;
        let entity = table.cell(row, layout.parent_entity).as_key();

        let (Some(year), Some(parent_entity)) = (year, entity) else {
            warn!(row, "skipping row without year or parent entity");
            skipped_rows.push(row);
            continue;
        };

        records.push(EmissionRecord {
            row,
            year,
            parent_entity,
            production_value: number_at(&table, row, layout.production_value, &columns.production_value)?,
            total_operational_emissions: number_at(
                &table,
                row,
                layout.operational_emissions,
                &columns.operational_emissions,
            )?,
            product_emissions: number_at(&table, row, layout.product_emissions, &columns.product_emissions)?,
        });
    }

    Ok(LoadedDataset {
        records,
        dropped_columns,
        skipped_rows,
    })
}

/// Read `path` with the reader matching its extension and extract records.
pub fn load_records(path: &Path, columns: &ColumnsConfig) -> Result<LoadedDataset> {
    let _span = phase_span(PipelinePhase::Loading);
    let reader = reader_for_path(path)?;
    let table = reader.read_table(path)?;
    debug!(
        format = reader.format_name(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "read source table"
    );

    let dataset = extract_records(table, columns)?;
    info!(
        path = %path.display(),
        records = dataset.records.len(),
        skipped = dataset.skipped_rows.len(),
        "loaded emission records"
    );
    Ok(dataset)
}
