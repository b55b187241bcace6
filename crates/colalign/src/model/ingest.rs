//! Kind resolution: raw string cells into typed columns.

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::column::{Column, ColumnKind, parse_number};
use super::table::Table;
use crate::error::Result;
use crate::input::RawTable;

/// How a column's kind is inferred from its cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindPolicy {
    /// Numeric when numeric cells strictly outnumber the other non-null cells.
    /// The outvoted cells of a numeric column become missing.
    #[default]
    Majority,
    /// Numeric only when every non-null cell parses as a number.
    Strict,
}

/// Ingestion configuration.
#[derive(Debug, Clone, Default)]
pub struct IngestConfig {
    pub policy: KindPolicy,
    /// Kinds fixed by the caller, keyed by column name. These bypass inference;
    /// a declared numeric column must hold only numbers and null markers.
    pub declared: IndexMap<String, ColumnKind>,
}

impl IngestConfig {
    pub fn with_policy(mut self, policy: KindPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn declare(mut self, column: impl Into<String>, kind: ColumnKind) -> Self {
        self.declared.insert(column.into(), kind);
        self
    }
}

/// Turn a raw table into a typed [`Table`].
pub fn ingest(raw: &RawTable, config: &IngestConfig) -> Result<Table> {
    let mut columns = Vec::with_capacity(raw.column_count());

    for (position, header) in raw.headers.iter().enumerate() {
        let cells: Vec<&str> = raw.column_values(position).collect();

        let column = match config.declared.get(header) {
            Some(ColumnKind::Numeric) => {
                Column::parse_numeric(&raw.name, header.as_str(), position, cells.iter().copied())?
            }
            Some(ColumnKind::Text) => text_column(header, &cells),
            None => match infer_kind(&cells, config.policy) {
                ColumnKind::Numeric => majority_numeric_column(&raw.name, header, &cells),
                ColumnKind::Text => text_column(header, &cells),
            },
        };

        debug!(
            table = %raw.name,
            column = %header,
            kind = %column.kind(),
            missing = column.missing_count(),
            "ingested column"
        );
        columns.push(column);
    }

    Table::new(raw.name.clone(), columns)
}

/// Decide a column's kind from its cells.
///
/// A column with no non-null cells is numeric, like the float dtype dataframe
/// loaders give an all-empty column.
pub fn infer_kind(cells: &[&str], policy: KindPolicy) -> ColumnKind {
    let (numeric, other) = cells
        .iter()
        .filter(|c| !RawTable::is_null_value(c))
        .fold((0usize, 0usize), |(n, o), c| match parse_number(c) {
            Some(_) => (n + 1, o),
            None => (n, o + 1),
        });

    let numeric_wins = match policy {
        KindPolicy::Majority => numeric > other || numeric + other == 0,
        KindPolicy::Strict => other == 0,
    };

    if numeric_wins {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

fn text_column(name: &str, cells: &[&str]) -> Column {
    Column::text(
        name,
        cells.iter().map(|c| {
            if RawTable::is_null_value(c) {
                None
            } else {
                Some(c.to_string())
            }
        }),
    )
}

fn majority_numeric_column(table: &str, name: &str, cells: &[&str]) -> Column {
    let mut demoted = 0usize;
    let values: Vec<Option<f64>> = cells
        .iter()
        .map(|c| {
            if RawTable::is_null_value(c) {
                return None;
            }
            let parsed = parse_number(c);
            if parsed.is_none() {
                demoted += 1;
            }
            parsed
        })
        .collect();

    if demoted > 0 {
        warn!(
            table = %table,
            column = %name,
            demoted,
            "non-numeric cells in numeric column treated as missing"
        );
    }

    Column::numeric(name, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;

    fn raw(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::new(
            "raw.csv",
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_infer_kinds() {
        assert_eq!(infer_kind(&["1", "2.5", "-3"], KindPolicy::Majority), ColumnKind::Numeric);
        assert_eq!(infer_kind(&["red", "blue"], KindPolicy::Majority), ColumnKind::Text);
        assert_eq!(infer_kind(&["", "NA"], KindPolicy::Majority), ColumnKind::Numeric);
    }

    #[test]
    fn test_majority_tie_is_text() {
        assert_eq!(infer_kind(&["1", "x"], KindPolicy::Majority), ColumnKind::Text);
    }

    #[test]
    fn test_strict_requires_all_numeric() {
        let cells = ["1", "2", "oops"];
        assert_eq!(infer_kind(&cells, KindPolicy::Majority), ColumnKind::Numeric);
        assert_eq!(infer_kind(&cells, KindPolicy::Strict), ColumnKind::Text);
    }

    #[test]
    fn test_majority_demotes_outliers_to_missing() {
        let table = ingest(
            &raw(vec!["qty"], vec![vec!["1"], vec!["2"], vec!["n/a?"], vec!["4"]]),
            &IngestConfig::default(),
        )
        .unwrap();

        let col = table.column(0).unwrap();
        assert_eq!(col.kind(), ColumnKind::Numeric);
        assert_eq!(col.missing_count(), 1);
        assert_eq!(col.numeric_values().collect::<Vec<_>>(), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_text_nulls_are_missing() {
        let table = ingest(
            &raw(vec!["name"], vec![vec!["Alice"], vec!["NA"], vec!["Bob"]]),
            &IngestConfig::default(),
        )
        .unwrap();
        let col = table.column(0).unwrap();
        assert_eq!(col.kind(), ColumnKind::Text);
        assert_eq!(col.missing_count(), 1);
    }

    #[test]
    fn test_declared_text_overrides_inference() {
        let config = IngestConfig::default().declare("zip", ColumnKind::Text);
        let table = ingest(&raw(vec!["zip"], vec![vec!["02134"], vec!["10001"]]), &config).unwrap();
        assert_eq!(table.column(0).unwrap().kind(), ColumnKind::Text);
    }

    #[test]
    fn test_declared_numeric_with_text_fails() {
        let config = IngestConfig::default().declare("amount", ColumnKind::Numeric);
        let err = ingest(
            &raw(vec!["id", "amount"], vec![vec!["a", "1"], vec!["b", "ten"]]),
            &config,
        )
        .unwrap_err();

        match err {
            AlignError::InvalidColumnData { column, position, row, .. } => {
                assert_eq!(column, "amount");
                assert_eq!(position, 1);
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
