//! Main Aligner struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::alignment::{AlignConfig, Alignment};
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::matrix::{CancelToken, MatrixBuilder, ProgressSink, SimilarityMatrix};
use crate::model::{IngestConfig, Table, ingest};
use crate::profile::{ColumnProfile, ProfileConfig, Profiler};
use crate::similarity::{ScorerConfig, SimilarityScorer};

/// Configuration for loading, scoring and aligning.
#[derive(Debug, Clone, Default)]
pub struct AlignerConfig {
    pub parser: ParserConfig,
    pub ingest: IngestConfig,
    pub profile: ProfileConfig,
    pub scorer: ScorerConfig,
    pub alignment: AlignConfig,
}

/// A table together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: Table,
    pub source: SourceMetadata,
}

/// Shape of one side of a comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<String>,
}

impl TableSummary {
    /// Summarize a table's name, row count and column names.
    fn of(table: &Table) -> Self {
        Self {
            name: table.name().to_string(),
            rows: table.row_count(),
            columns: table.column_names(),
        }
    }
}

/// A matched pair with column names resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedMatch {
    pub left_index: usize,
    pub left_name: String,
    pub right_index: usize,
    pub right_name: String,
    pub score: f64,
}

/// Result of comparing two tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub left: TableSummary,
    pub right: TableSummary,
    pub matrix: SimilarityMatrix,
    pub alignment: Alignment,
    pub pairs: Vec<NamedMatch>,
    /// Sum of every score in the matrix.
    pub total_score: f64,
}

impl AlignmentReport {
    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loads tables and aligns their columns.
pub struct Aligner {
    config: AlignerConfig,
    parser: Parser,
    profiler: Profiler,
    builder: MatrixBuilder,
}

impl Aligner {
    /// Create an aligner with default configuration.
    pub fn new() -> Self {
        Self::with_config(AlignerConfig::default())
    }

    /// Create an aligner with custom configuration.
    pub fn with_config(config: AlignerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let profiler = Profiler::with_config(config.profile.clone());
        let builder = MatrixBuilder::new(SimilarityScorer::with_config(config.scorer.clone()));

        Self {
            config,
            parser,
            profiler,
            builder,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    /// Load a delimited file into a typed table.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedTable> {
        self.config.profile.validate()?;
        let (raw, source) = self.parser.parse_file(path)?;
        let table = ingest(&raw, &self.config.ingest)?;
        Ok(LoadedTable { table, source })
    }

    /// Profile every column of a table.
    pub fn profile_table(&self, table: &Table) -> Vec<ColumnProfile> {
        table
            .columns()
            .iter()
            .map(|c| self.profiler.profile(c))
            .collect()
    }

    /// Compare two tables. `None` when `right` has no columns.
    pub fn compare(
        &self,
        left: &Table,
        right: &Table,
        progress: &dyn ProgressSink,
    ) -> Option<AlignmentReport> {
        let matrix = self.builder.build(left, right, progress)?;
        Some(self.report(left, right, matrix))
    }

    /// Compare two tables, checking `cancel` between matrix rows.
    pub fn compare_cancellable(
        &self,
        left: &Table,
        right: &Table,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Option<AlignmentReport>> {
        let matrix = self
            .builder
            .build_cancellable(left, right, progress, cancel)?;
        Ok(matrix.map(|m| self.report(left, right, m)))
    }

    /// Compare `tables[index]` with the table after it.
    ///
    /// `None` when there is no next table, or it has no columns.
    pub fn compare_with_next(
        &self,
        tables: &[Table],
        index: usize,
        progress: &dyn ProgressSink,
    ) -> Option<AlignmentReport> {
        let left = tables.get(index)?;
        let Some(right) = index.checked_add(1).and_then(|next| tables.get(next)) else {
            debug!(index, tables = tables.len(), "no next table to compare against");
            return None;
        };
        self.compare(left, right, progress)
    }

    /// Like [`compare_with_next`](Self::compare_with_next), checking `cancel`
    /// between matrix rows.
    pub fn compare_with_next_cancellable(
        &self,
        tables: &[Table],
        index: usize,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Option<AlignmentReport>> {
        let Some(left) = tables.get(index) else {
            return Ok(None);
        };
        let Some(right) = index.checked_add(1).and_then(|next| tables.get(next)) else {
            debug!(index, tables = tables.len(), "no next table to compare against");
            return Ok(None);
        };
        self.compare_cancellable(left, right, progress, cancel)
    }

    /// Load two files and compare them.
    pub fn compare_files(
        &self,
        left: impl AsRef<Path>,
        right: impl AsRef<Path>,
        progress: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<Option<AlignmentReport>> {
        let left = self.load(left)?;
        let right = self.load(right)?;
        self.compare_cancellable(&left.table, &right.table, progress, cancel)
    }

    fn report(&self, left: &Table, right: &Table, matrix: SimilarityMatrix) -> AlignmentReport {
        let alignment = Alignment::select(&matrix, &self.config.alignment);

        let pairs = alignment
            .matches
            .iter()
            .map(|m| NamedMatch {
                left_index: m.row,
                left_name: matrix.row_names()[m.row].clone(),
                right_index: m.column,
                right_name: matrix.column_names()[m.column].clone(),
                score: m.score,
            })
            .collect();

        let total_score = matrix.total();
        info!(
            left = %left.name(),
            right = %right.name(),
            matched = alignment.len(),
            total_score,
            "tables compared"
        );

        AlignmentReport {
            left: TableSummary::of(left),
            right: TableSummary::of(right),
            matrix,
            alignment,
            pairs,
            total_score,
        }
    }
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new()
    }
}
