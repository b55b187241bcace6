//! Fills the similarity matrix for the Cartesian product of two tables' columns.

use tracing::{debug, trace};

use super::SimilarityMatrix;
use super::progress::{CancelToken, ProgressSink, row_percent};
use crate::error::{AlignError, Result};
use crate::model::Table;
use crate::similarity::{ColumnFeatures, SimilarityScorer};

/// Builds similarity matrices with one scorer.
#[derive(Debug, Clone, Default)]
pub struct MatrixBuilder {
    scorer: SimilarityScorer,
}

impl MatrixBuilder {
    /// Create a builder that scores with `scorer`.
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self { scorer }
    }

    /// Score every column of `left` against every column of `right`.
    ///
    /// Returns `None` when `right` has no columns to compare against.
    pub fn build(
        &self,
        left: &Table,
        right: &Table,
        progress: &dyn ProgressSink,
    ) -> Option<SimilarityMatrix> {
        if right.column_count() == 0 {
            debug!(left = %left.name(), right = %right.name(), "no columns to compare against");
            return None;
        }
        // Without a token no row can be cancelled, so `fill` cannot fail here.
        self.fill(left, right, progress, None).ok()
    }

    /// Like [`build`](Self::build), stopping with [`AlignError::Cancelled`]
    /// when `cancel` is set between rows.
    pub fn build_cancellable(
        &self,
        left: &Table,
        right: &Table,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Option<SimilarityMatrix>> {
        if right.column_count() == 0 {
            debug!(left = %left.name(), right = %right.name(), "no columns to compare against");
            return Ok(None);
        }
        self.fill(left, right, progress, Some(cancel)).map(Some)
    }

    fn fill(
        &self,
        left: &Table,
        right: &Table,
        progress: &dyn ProgressSink,
        cancel: Option<&CancelToken>,
    ) -> Result<SimilarityMatrix> {
        let rows = left.column_count();
        let cols = right.column_count();
        debug!(
            left = %left.name(),
            right = %right.name(),
            rows,
            cols,
            "building similarity matrix"
        );

        let right_features: Vec<ColumnFeatures> = right
            .columns()
            .iter()
            .map(|c| self.scorer.features(c))
            .collect();

        let mut values = Vec::with_capacity(rows * cols);
        progress.on_progress(0);

        for (i, column) in left.columns().iter().enumerate() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                debug!(completed_rows = i, rows, "matrix build cancelled");
                return Err(AlignError::Cancelled);
            }

            let features = self.scorer.features(column);
            values.extend(
                right_features
                    .iter()
                    .map(|other| self.scorer.score_features(&features, other)),
            );

            trace!(row = i, column = %column.name(), "matrix row complete");
            progress.on_progress(row_percent(i + 1, rows));
        }

        if rows == 0 {
            progress.on_progress(row_percent(0, 0));
        }

        debug!(rows, cols, "similarity matrix complete");
        Ok(SimilarityMatrix::from_parts(
            left.column_names(),
            right.column_names(),
            values,
        ))
    }
}

/// Build the similarity matrix of two tables with the default scorer.
pub fn build_matrix(
    left: &Table,
    right: &Table,
    progress: &dyn ProgressSink,
) -> Option<SimilarityMatrix> {
    MatrixBuilder::default().build(left, right, progress)
}
