//! Shared error types for greenrisk.
//!
//! Library functions return [`Result`] with the [`Error`] enum below. Command
//! handlers wrap these in `anyhow::Error` with additional context before they
//! reach `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for greenrisk operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file extension is not a supported tabular format
    #[error("Unsupported input format for {}: expected .csv or a spreadsheet workbook", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Workbook contains no worksheet to read
    #[error("Workbook {} contains no worksheets", path.display())]
    EmptyWorkbook { path: PathBuf },

    /// A required column is absent after placeholder columns were dropped
    #[error("Missing required column '{column}' (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A cell could not be interpreted as the type its column requires
    #[error("Invalid value '{value}' in column '{column}' at data row {row}: expected {expected}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// CSV decoding errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Workbook decoding errors
    #[error(transparent)]
    Workbook(#[from] calamine::Error),

    /// Regex compilation errors for the placeholder column pattern
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
