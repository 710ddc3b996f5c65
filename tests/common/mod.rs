// Test utility module for greenrisk integration tests
#![allow(dead_code)]

use greenrisk::core::EmissionRecord;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header row of the default input layout, including the index column a
/// pandas export leaves behind.
pub const CSV_HEADER: &str =
    ",year,parent_entity,production_value,total_operational_emissions_MtCO2e,product_emissions_MtCO2";

/// Record with every value present.
pub fn record(row: usize, entity: &str, year: i32, s1: f64, s3: f64, prod: f64) -> EmissionRecord {
    EmissionRecord::new(row, year, entity, Some(prod), Some(s1), Some(s3))
}

/// Build a CSV body from `(entity, year, production, scope1, scope3)` rows.
pub fn csv_from_rows(rows: &[(&str, i32, &str, &str, &str)]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for (i, (entity, year, prod, s1, s3)) in rows.iter().enumerate() {
        csv.push_str(&format!("{i},{year},{entity},{prod},{s1},{s3}\n"));
    }
    csv
}

/// Write `contents` to `name` inside a fresh temp directory.
pub fn write_fixture(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

/// The three canonical two-year trajectories plus a single-year entity.
pub fn scenario_csv() -> String {
    csv_from_rows(&[
        ("Alpha", 2022, "10", "100", "50"),
        ("Alpha", 2023, "10", "80", "30"),
        ("Bravo", 2022, "10", "100", "50"),
        ("Bravo", 2023, "10", "100", "10"),
        ("Charlie", 2022, "10", "100", "50"),
        ("Charlie", 2023, "15", "110", "55"),
        ("Delta", 2023, "10", "100", "50"),
    ])
}
