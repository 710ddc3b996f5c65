//! I/O trait definitions for reading source tables.
//!
//! Analysis code only ever sees a [`RawTable`]; how the table is read (CSV,
//! workbook, an in-memory fixture in tests) is decided at the edge.

use super::table::RawTable;
use crate::errors::Result;
use std::path::Path;

/// Reads the first table of a file into memory.
pub trait TableReader {
    /// Read header and data rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoded, or contains
    /// no table.
    fn read_table(&self, path: &Path) -> Result<RawTable>;

    /// Short name of the format for log messages.
    fn format_name(&self) -> &'static str;
}
