pub mod output;
pub mod readers;
pub mod records;
pub mod table;
pub mod traits;

// Re-export I/O traits for convenient access
pub use readers::{reader_for_path, CsvTableReader, WorkbookTableReader};
pub use records::{extract_records, load_records, LoadedDataset};
pub use table::{Cell, RawTable};
pub use traits::TableReader;

use crate::errors::{Error, Result};
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| Error::file_system(path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| Error::file_system(path, e))?;
    }
    Ok(())
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
