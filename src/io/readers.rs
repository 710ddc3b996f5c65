//! Concrete [`TableReader`] implementations for CSV files and workbooks.

use super::table::{Cell, RawTable};
use super::traits::TableReader;
use crate::errors::{Error, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Comma-separated text with a header row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTableReader;

impl TableReader for CsvTableReader {
    fn read_table(&self, path: &Path) -> Result<RawTable> {
        let file = std::fs::File::open(path).map_err(|e| Error::file_system(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let headers = RawTable::normalize_headers(reader.headers()?.iter().map(str::to_string));

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(Cell::from_text).collect());
        }

        Ok(RawTable::new(headers, rows))
    }

    fn format_name(&self) -> &'static str {
        "csv"
    }
}

/// First worksheet of an Excel or OpenDocument workbook.
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkbookTableReader;

impl TableReader for WorkbookTableReader {
    fn read_table(&self, path: &Path) -> Result<RawTable> {
        if !path.exists() {
            return Err(Error::file_system(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            ));
        }

        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::EmptyWorkbook {
                path: path.to_path_buf(),
            })??;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => {
                RawTable::normalize_headers(header_row.iter().map(|cell| match cell {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                }))
            }
            None => Vec::new(),
        };
        let rows: Vec<Vec<Cell>> = rows
            .map(|row| row.iter().map(workbook_cell).collect())
            .collect();

        Ok(RawTable::new(headers, rows))
    }

    fn format_name(&self) -> &'static str {
        "workbook"
    }
}

/// Convert a calamine cell; error cells such as `#N/A` read as missing.
fn workbook_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => Cell::from_text(s),
        other => Cell::from_text(&other.to_string()),
    }
}

/// Choose a reader from the file extension.
pub fn reader_for_path(path: &Path) -> Result<Box<dyn TableReader>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(Box::new(CsvTableReader)),
        ext if WORKBOOK_EXTENSIONS.contains(&ext) => Ok(Box::new(WorkbookTableReader)),
        _ => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_reader_selection_by_extension() {
        assert_eq!(
            reader_for_path(Path::new("data/US_emissions.XLSX"))
                .unwrap()
                .format_name(),
            "workbook"
        );
        assert_eq!(
            reader_for_path(Path::new("emissions.csv")).unwrap().format_name(),
            "csv"
        );
        assert!(matches!(
            reader_for_path(Path::new("emissions.parquet")),
            Err(Error::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_csv_reader_names_blank_headers() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "{}",
            indoc! {"
                ,year,parent_entity
                0,2023,Acme
                1,2022,
            "}
        )
        .unwrap();

        let table = CsvTableReader.read_table(file.path()).unwrap();
        assert_eq!(table.headers, vec!["Unnamed: 0", "year", "parent_entity"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(0, 2), &Cell::Text("Acme".to_string()));
        assert_eq!(table.cell(1, 2), &Cell::Empty);
    }

    #[test]
    fn test_missing_file_is_file_system_error() {
        let err = CsvTableReader
            .read_table(Path::new("/nonexistent/emissions.csv"))
            .unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));

        let err = WorkbookTableReader
            .read_table(Path::new("/nonexistent/emissions.xlsx"))
            .unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }

    #[test]
    fn test_workbook_cell_conversion() {
        assert_eq!(workbook_cell(&Data::Int(2023)), Cell::Number(2023.0));
        assert_eq!(workbook_cell(&Data::String("NA".to_string())), Cell::Empty);
        assert_eq!(workbook_cell(&Data::Empty), Cell::Empty);
    }
}
