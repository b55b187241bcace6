//! Loaded source files and their metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Untyped cells of a delimited file, row-major, before kind resolution.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Table name (usually the source file name).
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings; every row has `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table.
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Check if a cell represents a missing value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed == "."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_value() {
        assert!(RawTable::is_null_value(""));
        assert!(RawTable::is_null_value("  "));
        assert!(RawTable::is_null_value("NA"));
        assert!(RawTable::is_null_value("NaN"));
        assert!(RawTable::is_null_value("null"));
        assert!(RawTable::is_null_value("."));
        assert!(!RawTable::is_null_value("0"));
        assert!(!RawTable::is_null_value("red car"));
    }

    #[test]
    fn test_column_values_pads_short_rows() {
        let raw = RawTable::new(
            "t",
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "x".into()], vec!["2".into()]],
        );
        let values: Vec<&str> = raw.column_values(1).collect();
        assert_eq!(values, vec!["x", ""]);
    }
}
