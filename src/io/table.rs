//! In-memory tabular data as read from a CSV file or workbook sheet.

use regex::Regex;

/// Cell values that count as missing, matching common spreadsheet exports.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "#N/A", "NaN", "nan", "null", "NULL", "-"];

/// A cell holds a value of the wrong type for its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMismatch;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Build a cell from raw text, treating missing markers as empty.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_MARKERS.contains(&trimmed) {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Raw cell content for error messages.
    pub fn display_value(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Numeric value; `Ok(None)` for a missing cell.
    pub fn as_number(&self) -> Result<Option<f64>, CellMismatch> {
        match self {
            Cell::Empty => Ok(None),
            Cell::Number(n) if n.is_nan() => Ok(None),
            Cell::Number(n) => Ok(Some(*n)),
            Cell::Text(s) => s.replace(',', "").parse::<f64>().map(Some).map_err(|_| CellMismatch),
            Cell::Bool(_) => Err(CellMismatch),
        }
    }

    /// Whole-number year; accepts `2023`, `2023.0` and `"2023"`.
    pub fn as_year(&self) -> Result<Option<i32>, CellMismatch> {
        let Some(value) = self.as_number()? else {
            return Ok(None);
        };
        if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(CellMismatch);
        }
        Ok(Some(value as i32))
    }

    /// Text key; integral numbers render without a decimal point.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(format!("{}", *n as i64)),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => Some(s.clone()),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }
}

/// Header row plus data rows. Rows may be shorter than the header; missing
/// trailing cells read as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

static EMPTY_CELL: Cell = Cell::Empty;

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Give blank headers a positional placeholder name (`Unnamed: <index>`).
    pub fn normalize_headers(raw: impl IntoIterator<Item = String>) -> Vec<String> {
        raw.into_iter()
            .enumerate()
            .map(|(index, header)| {
                let trimmed = header.trim();
                if trimmed.is_empty() {
                    format!("Unnamed: {index}")
                } else {
                    trimmed.to_string()
                }
            })
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// True when every cell of `row` is empty.
    pub fn is_blank_row(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .map_or(true, |cells| cells.iter().all(Cell::is_empty))
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Drop every column whose header matches `pattern`; returns their names.
    pub fn drop_columns_matching(&mut self, pattern: &Regex) -> Vec<String> {
        let keep: Vec<bool> = self.headers.iter().map(|h| !pattern.is_match(h)).collect();
        if keep.iter().all(|k| *k) {
            return Vec::new();
        }

        let dropped: Vec<String> = self
            .headers
            .iter()
            .zip(&keep)
            .filter(|(_, k)| !**k)
            .map(|(h, _)| h.clone())
            .collect();

        self.headers = retain_by_mask(std::mem::take(&mut self.headers), &keep);
        for row in &mut self.rows {
            *row = retain_by_mask(std::mem::take(row), &keep);
        }

        dropped
    }
}

fn retain_by_mask<T>(items: Vec<T>, keep: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| keep.get(*i).copied().unwrap_or(true))
        .map(|(_, item)| item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_markers_become_empty() {
        assert_eq!(Cell::from_text("  "), Cell::Empty);
        assert_eq!(Cell::from_text("N/A"), Cell::Empty);
        assert_eq!(Cell::from_text(" 12.5 "), Cell::Text("12.5".to_string()));
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(Cell::Text("1,234.5".to_string()).as_number(), Ok(Some(1234.5)));
        assert_eq!(Cell::Number(f64::NAN).as_number(), Ok(None));
        assert_eq!(Cell::Text("abc".to_string()).as_number(), Err(CellMismatch));
    }

    #[test]
    fn test_year_parsing_rejects_fractions() {
        assert_eq!(Cell::Number(2023.0).as_year(), Ok(Some(2023)));
        assert_eq!(Cell::Text("2021".to_string()).as_year(), Ok(Some(2021)));
        assert_eq!(Cell::Number(2023.5).as_year(), Err(CellMismatch));
        assert_eq!(Cell::Empty.as_year(), Ok(None));
    }

    #[test]
    fn test_integral_numbers_render_as_keys_without_decimals() {
        assert_eq!(Cell::Number(42.0).as_key(), Some("42".to_string()));
        assert_eq!(Cell::Empty.as_key(), None);
    }

    #[test]
    fn test_blank_headers_get_placeholder_names() {
        let headers = RawTable::normalize_headers(vec![
            String::new(),
            "year".to_string(),
            " ".to_string(),
        ]);
        assert_eq!(headers, vec!["Unnamed: 0", "year", "Unnamed: 2"]);
    }

    #[test]
    fn test_drop_columns_matching_removes_cells() {
        let mut table = RawTable::new(
            vec!["Unnamed: 0".to_string(), "year".to_string(), "Unnamed: 2".to_string()],
            vec![
                vec![Cell::Number(0.0), Cell::Number(2023.0), Cell::Empty],
                vec![Cell::Number(1.0)],
            ],
        );
        let dropped = table.drop_columns_matching(&Regex::new("Unnamed").unwrap());

        assert_eq!(dropped, vec!["Unnamed: 0", "Unnamed: 2"]);
        assert_eq!(table.headers, vec!["year"]);
        assert_eq!(table.rows[0], vec![Cell::Number(2023.0)]);
        assert!(table.rows[1].is_empty());
        assert_eq!(table.cell(1, 0), &Cell::Empty);
    }
}
