//! Pairwise column similarity.
//!
//! Text columns are compared by TF-IDF cosine, numeric columns by their
//! statistic vectors. Columns of different kinds are incomparable and score
//! [`INCOMPATIBLE_SCORE`]. Every score lies in `[0, 1]`.

mod numeric;
mod tfidf;

pub use numeric::{
    NumericMethod, ZSCORE_TIE_SCORE, pairwise_zscore_similarity, statistic_distance_similarity,
};
pub use tfidf::{TermCounts, TextConfig, tfidf_cosine};

use crate::model::{Column, ColumnKind};
use crate::profile::NumericProfile;

/// Score of a text column against a numeric column.
pub const INCOMPATIBLE_SCORE: f64 = 0.0;

/// Score when either column has no values to compare.
pub const EMPTY_SCORE: f64 = 0.0;

/// Scorer configuration.
#[derive(Debug, Clone, Default)]
pub struct ScorerConfig {
    pub numeric: NumericMethod,
    pub text: TextConfig,
}

/// Per-column inputs to scoring, extracted once and reused across pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnFeatures {
    Text(TermCounts),
    Numeric(NumericProfile),
}

impl ColumnFeatures {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnFeatures::Text(_) => ColumnKind::Text,
            ColumnFeatures::Numeric(_) => ColumnKind::Numeric,
        }
    }
}

/// Scores pairs of columns.
#[derive(Debug, Clone, Default)]
pub struct SimilarityScorer {
    config: ScorerConfig,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn features(&self, column: &Column) -> ColumnFeatures {
        match column.kind() {
            ColumnKind::Text => {
                ColumnFeatures::Text(TermCounts::from_cells(column.text_values(), &self.config.text))
            }
            ColumnKind::Numeric => {
                ColumnFeatures::Numeric(NumericProfile::from_values(column.numeric_values()))
            }
        }
    }

    pub fn score_features(&self, a: &ColumnFeatures, b: &ColumnFeatures) -> f64 {
        match (a, b) {
            (ColumnFeatures::Text(ta), ColumnFeatures::Text(tb)) => tfidf_cosine(ta, tb),
            (ColumnFeatures::Numeric(pa), ColumnFeatures::Numeric(pb)) => {
                if pa.is_undefined() || pb.is_undefined() {
                    EMPTY_SCORE
                } else {
                    self.config.numeric.score(pa, pb)
                }
            }
            (ColumnFeatures::Text(_), ColumnFeatures::Numeric(_))
            | (ColumnFeatures::Numeric(_), ColumnFeatures::Text(_)) => INCOMPATIBLE_SCORE,
        }
    }

    pub fn score(&self, a: &Column, b: &Column) -> f64 {
        self.score_features(&self.features(a), &self.features(b))
    }
}

/// Score two columns with the default configuration.
pub fn score(a: &Column, b: &Column) -> f64 {
    SimilarityScorer::new().score(a, b)
}
