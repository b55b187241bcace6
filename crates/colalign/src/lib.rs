//! colalign: find which column of one table corresponds to which column of another.
//!
//! Every column is summarised by content, every pair of columns across the two
//! tables is scored, and an alignment is selected from the resulting
//! similarity matrix.
//!
//! # Pipeline
//!
//! - **Profile**: per-column statistics (top tokens and mean length for text;
//!   mean, min, max, std and quartiles for numbers)
//! - **Score**: TF-IDF cosine for text pairs, statistic-vector similarity for
//!   numeric pairs, 0 for mixed pairs
//! - **Matrix**: the `R × C` grid of scores, filled row by row with progress
//! - **Align**: a one-to-one (or best-per-row) column correspondence
//!
//! Tables are never modified; the engine only borrows their columns.
//!
//! # Example
//!
//! ```no_run
//! use colalign::{Aligner, CancelToken, NoProgress};
//!
//! let aligner = Aligner::new();
//! let report = aligner
//!     .compare_files("january.csv", "february.csv", &NoProgress, &CancelToken::new())
//!     .unwrap();
//!
//! if let Some(report) = report {
//!     for pair in &report.pairs {
//!         println!("{} -> {} ({:.2})", pair.left_name, pair.right_name, pair.score);
//!     }
//! }
//! ```

pub mod alignment;
pub mod error;
pub mod input;
pub mod matrix;
pub mod model;
pub mod profile;
pub mod similarity;

mod aligner;

pub use crate::aligner::{
    Aligner, AlignerConfig, AlignmentReport, LoadedTable, NamedMatch, TableSummary,
};
pub use alignment::{AlignConfig, Alignment, AlignmentPolicy, ColumnMatch, align};
pub use error::{AlignError, Result};
pub use input::{Parser, ParserConfig, RawTable, SourceMetadata};
pub use matrix::{
    CancelToken, MatrixBuilder, NoProgress, ProgressSink, SimilarityMatrix, build_matrix,
};
pub use model::{Column, ColumnData, ColumnKind, IngestConfig, KindPolicy, Table, ingest};
pub use profile::{
    ColumnProfile, NumericProfile, ProfileConfig, ProfileStats, Profiler, TextProfile, profile,
};
pub use similarity::{
    INCOMPATIBLE_SCORE, NumericMethod, ScorerConfig, SimilarityScorer, TextConfig, score,
};
