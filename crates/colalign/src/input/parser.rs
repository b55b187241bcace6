//! Delimited-text loader with delimiter detection.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{RawTable, SourceMetadata};
use crate::error::{AlignError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Lines inspected by delimiter detection.
const DETECTION_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Leading records to discard before the header (title rows and the like).
    pub skip_rows: usize,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            skip_rows: 0,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads delimited text files into [`RawTable`]s.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return its raw table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(RawTable, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| AlignError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents, self.config.skip_rows)?,
        };

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let table = self.parse_bytes(&name, &contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            file = %name,
            format = %format,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse in-memory bytes with a known delimiter.
    pub fn parse_bytes(&self, name: &str, bytes: &[u8], delimiter: u8) -> Result<RawTable> {
        if !delimiter.is_ascii() || delimiter == self.config.quote {
            return Err(AlignError::InvalidDelimiter(format!(
                "{:?}",
                delimiter as char
            )));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records().skip(self.config.skip_rows);

        let first = match records.next() {
            Some(record) => record?,
            None => return Err(AlignError::EmptyData("No rows found".to_string())),
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        let headers: Vec<String> = if self.config.has_header {
            first.iter().map(|s| s.trim().to_string()).collect()
        } else {
            let generated = (0..first.len())
                .map(|i| format!("column_{}", i + 1))
                .collect();
            rows.push(first.iter().map(|s| s.to_string()).collect());
            generated
        };

        if headers.is_empty() {
            return Err(AlignError::EmptyData("No columns found".to_string()));
        }
        let width = headers.len();

        for result in records {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        if let Some(max) = self.config.max_rows {
            rows.truncate(max);
        }

        Ok(RawTable::new(name, headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick the delimiter that splits the first lines most consistently.
fn detect_delimiter(bytes: &[u8], skip_lines: usize) -> Result<u8> {
    let lines: Vec<String> = BufReader::new(bytes)
        .lines()
        .skip(skip_lines)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .take(DETECTION_LINES)
        .collect();

    if lines.is_empty() {
        return Err(AlignError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / counts.len() as f64;

        // Tabs rarely occur inside cell text, so they win ties.
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line outside of quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data, 0).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data, 0).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_after_title_row() {
        let data = b"Quarterly report\na;b;c\n1;2;3\n4;5;6";
        assert_eq!(detect_delimiter(data, 1).unwrap(), b';');
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        assert_eq!(count_delimiter_in_line("\"a,b\",c", b','), 1);
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = parser.parse_bytes("people.csv", data, b',').unwrap();

        assert_eq!(table.name, "people.csv");
        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1][1], "25");
    }

    #[test]
    fn test_skip_rows_before_header() {
        let parser = Parser::with_config(ParserConfig {
            skip_rows: 1,
            ..ParserConfig::default()
        });
        let data = b"Export 2023\nid,value\n1,10\n2,20";
        let table = parser.parse_bytes("t", data, b',').unwrap();

        assert_eq!(table.headers, vec!["id", "value"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_without_header_generates_names() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes("t", b"1,2\n3,4", b',').unwrap();

        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let parser = Parser::new();
        let table = parser.parse_bytes("t", b"a,b,c\n1\n1,2,3,4", b',').unwrap();

        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes("t", b"a\n1\n2\n3", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_empty_input_is_error() {
        let parser = Parser::new();
        let err = parser.parse_bytes("t", b"", b',').unwrap_err();
        assert!(matches!(err, AlignError::EmptyData(_)));
    }
}
