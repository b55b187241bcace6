//! Error types for the colalign library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for colalign operations.
///
/// Degenerate inputs (empty columns, incompatible kinds, a missing counterpart
/// table, zero-width normalisation) are not errors: they resolve to defined
/// values in the engine.
#[derive(Debug, Error)]
pub enum AlignError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A numeric column holds a cell that is not a finite number.
    #[error(
        "Invalid data in column '{column}' (position {position}) of table '{table}': \
         row {row} value '{value}' is not numeric"
    )]
    InvalidColumnData {
        table: String,
        column: String,
        position: usize,
        row: usize,
        value: String,
    },

    /// Table structure is inconsistent (e.g. ragged columns).
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A cancellable operation was stopped before completion.
    #[error("Operation cancelled")]
    Cancelled,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for colalign operations.
pub type Result<T> = std::result::Result<T, AlignError>;
