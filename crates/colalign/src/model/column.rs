//! Typed columns.

use serde::{Deserialize, Serialize};

use crate::error::{AlignError, Result};

/// Kind of a column, fixed when the column is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free-form strings.
    Text,
    /// Real numbers.
    Numeric,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Numeric => "numeric",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell values of a column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Numeric(Vec<Option<f64>>),
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Build a text column.
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        }
    }

    /// Build a numeric column. NaN cells are stored as missing.
    pub fn numeric<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(
                values
                    .into_iter()
                    .map(|v| v.filter(|x| !x.is_nan()))
                    .collect(),
            ),
        }
    }

    /// Parse raw cells into a numeric column.
    ///
    /// Null markers become missing; any other cell must be a finite number.
    pub fn parse_numeric<'a, I>(
        table: &str,
        name: impl Into<String>,
        position: usize,
        cells: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let name = name.into();
        let mut values = Vec::new();

        for (row, cell) in cells.into_iter().enumerate() {
            if crate::input::RawTable::is_null_value(cell) {
                values.push(None);
                continue;
            }
            match parse_number(cell) {
                Some(v) => values.push(Some(v)),
                None => {
                    return Err(AlignError::InvalidColumnData {
                        table: table.to_string(),
                        column: name,
                        position,
                        row,
                        value: cell.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            name,
            data: ColumnData::Numeric(values),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        match self.data {
            ColumnData::Text(_) => ColumnKind::Text,
            ColumnData::Numeric(_) => ColumnKind::Numeric,
        }
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of cells, missing included.
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Text(v) => v.len(),
            ColumnData::Numeric(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Number of non-missing cells.
    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Non-missing text cells; empty for numeric columns.
    pub fn text_values(&self) -> impl Iterator<Item = &str> {
        let cells: &[Option<String>] = match &self.data {
            ColumnData::Text(v) => v,
            ColumnData::Numeric(_) => &[],
        };
        cells.iter().filter_map(|c| c.as_deref())
    }

    /// Non-missing numeric cells; empty for text columns.
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        let cells: &[Option<f64>] = match &self.data {
            ColumnData::Numeric(v) => v,
            ColumnData::Text(_) => &[],
        };
        cells.iter().filter_map(|c| *c)
    }
}

/// Parse a trimmed cell as a finite number.
pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
