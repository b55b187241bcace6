//! The cross-table similarity matrix and its builder.

mod builder;
mod progress;

use serde::{Deserialize, Serialize};

pub use builder::{MatrixBuilder, build_matrix};
pub use progress::{CancelToken, NoProgress, ProgressSink};

/// Row-major `R × C` grid of similarity scores.
///
/// Entry `(i, j)` scores column `i` of the left table against column `j` of the
/// right table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixParts")]
pub struct SimilarityMatrix {
    row_names: Vec<String>,
    column_names: Vec<String>,
    values: Vec<f64>,
}

/// Unchecked serialized form of a [`SimilarityMatrix`].
#[derive(Deserialize)]
struct MatrixParts {
    row_names: Vec<String>,
    column_names: Vec<String>,
    values: Vec<f64>,
}

impl TryFrom<MatrixParts> for SimilarityMatrix {
    type Error = crate::AlignError;

    fn try_from(parts: MatrixParts) -> crate::Result<Self> {
        let expected = parts.row_names.len() * parts.column_names.len();
        if parts.values.len() != expected {
            return Err(crate::AlignError::InvalidTable(format!(
                "matrix has {} values, expected {} ({} x {})",
                parts.values.len(),
                expected,
                parts.row_names.len(),
                parts.column_names.len()
            )));
        }
        Ok(Self::from_parts(
            parts.row_names,
            parts.column_names,
            parts.values,
        ))
    }
}

impl SimilarityMatrix {
    pub(crate) fn from_parts(
        row_names: Vec<String>,
        column_names: Vec<String>,
        values: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(values.len(), row_names.len() * column_names.len());
        Self {
            row_names,
            column_names,
            values,
        }
    }

    /// Build a matrix from nested rows. Every row must have `column_names.len()`
    /// entries.
    pub fn from_rows(
        row_names: Vec<String>,
        column_names: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> crate::Result<Self> {
        if rows.len() != row_names.len() {
            return Err(crate::AlignError::InvalidTable(format!(
                "{} rows for {} row names",
                rows.len(),
                row_names.len()
            )));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != column_names.len()) {
            return Err(crate::AlignError::InvalidTable(format!(
                "matrix row {} has {} entries, expected {}",
                bad,
                rows[bad].len(),
                column_names.len()
            )));
        }
        Ok(Self::from_parts(
            row_names,
            column_names,
            rows.into_iter().flatten().collect(),
        ))
    }

    pub fn rows(&self) -> usize {
        self.row_names.len()
    }

    pub fn cols(&self) -> usize {
        self.column_names.len()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.values.get(row * self.cols() + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows() {
            return None;
        }
        let start = row * self.cols();
        Some(&self.values[start..start + self.cols()])
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows()).map(move |r| {
            let start = r * self.cols();
            &self.values[start..start + self.cols()]
        })
    }

    /// All scores, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Sum of all finite scores: one number for how alike the two tables are.
    pub fn total(&self) -> f64 {
        self.values.iter().filter(|v| v.is_finite()).sum()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows_iter().map(<[f64]>::to_vec).collect()
    }
}
