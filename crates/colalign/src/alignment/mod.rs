//! Alignment selection: which column of table B each column of table A maps to.
//!
//! Only finite scores strictly above [`AlignConfig::min_score`] can match, so
//! a row or column whose scores are all zero or undefined stays unmatched.

mod hungarian;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matrix::SimilarityMatrix;

/// Fixed-point scale for Hungarian costs.
const COST_SCALE: f64 = 1_000_000_000.0;

/// Strategy for turning a matrix into a correspondence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentPolicy {
    /// Highest score first, one-to-one. Ties go to the lowest row, then the
    /// lowest column.
    #[default]
    Greedy,
    /// One-to-one assignment maximizing the total matched score.
    Optimal,
    /// Each row takes its best column; several rows may share one column.
    BestPerRow,
}

impl AlignmentPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentPolicy::Greedy => "greedy",
            AlignmentPolicy::Optimal => "optimal",
            AlignmentPolicy::BestPerRow => "best_per_row",
        }
    }
}

impl std::fmt::Display for AlignmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AlignConfig {
    pub policy: AlignmentPolicy,
    /// Scores at or below this never match.
    pub min_score: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            policy: AlignmentPolicy::Greedy,
            min_score: 0.0,
        }
    }
}

/// One matched pair of columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnMatch {
    /// Column index in table A (matrix row).
    pub row: usize,
    /// Column index in table B (matrix column).
    pub column: usize,
    pub score: f64,
}

/// A partial mapping from columns of table A to columns of table B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub policy: AlignmentPolicy,
    /// Matches ordered by row.
    pub matches: Vec<ColumnMatch>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_columns: Vec<usize>,
}

impl Alignment {
    /// Select an alignment from a matrix.
    pub fn select(matrix: &SimilarityMatrix, config: &AlignConfig) -> Self {
        let mut matches = match config.policy {
            AlignmentPolicy::Greedy => greedy(matrix, config.min_score),
            AlignmentPolicy::Optimal => optimal(matrix, config.min_score),
            AlignmentPolicy::BestPerRow => best_per_row(matrix, config.min_score),
        };
        matches.sort_by_key(|m| m.row);

        let mut row_taken = vec![false; matrix.rows()];
        let mut col_taken = vec![false; matrix.cols()];
        for m in &matches {
            row_taken[m.row] = true;
            col_taken[m.column] = true;
        }

        let alignment = Self {
            policy: config.policy,
            matches,
            unmatched_rows: unset_indices(&row_taken),
            unmatched_columns: unset_indices(&col_taken),
        };

        debug!(
            policy = ?config.policy,
            matched = alignment.matches.len(),
            unmatched_rows = alignment.unmatched_rows.len(),
            unmatched_columns = alignment.unmatched_columns.len(),
            "alignment selected"
        );
        alignment
    }

    /// Matched column of table B for a column of table A.
    pub fn get(&self, row: usize) -> Option<usize> {
        self.matches.iter().find(|m| m.row == row).map(|m| m.column)
    }

    pub fn as_map(&self) -> BTreeMap<usize, usize> {
        self.matches.iter().map(|m| (m.row, m.column)).collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Sum of matched scores.
    pub fn total_score(&self) -> f64 {
        self.matches.iter().map(|m| m.score).sum()
    }

    /// True if no column of table B is matched twice.
    pub fn is_one_to_one(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        self.matches.iter().all(|m| seen.insert(m.column))
    }
}

/// Align with the default configuration (greedy, threshold 0).
pub fn align(matrix: &SimilarityMatrix) -> Alignment {
    Alignment::select(matrix, &AlignConfig::default())
}

fn eligible(score: f64, min_score: f64) -> bool {
    score.is_finite() && score > min_score
}

fn unset_indices(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter(|(_, set)| !**set)
        .map(|(i, _)| i)
        .collect()
}

fn candidates(matrix: &SimilarityMatrix, min_score: f64) -> Vec<ColumnMatch> {
    matrix
        .rows_iter()
        .enumerate()
        .flat_map(|(row, scores)| {
            scores
                .iter()
                .enumerate()
                .filter(|(_, s)| eligible(**s, min_score))
                .map(move |(column, &score)| ColumnMatch { row, column, score })
        })
        .collect()
}

fn greedy(matrix: &SimilarityMatrix, min_score: f64) -> Vec<ColumnMatch> {
    let mut cells = candidates(matrix, min_score);
    cells.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.row.cmp(&b.row))
            .then(a.column.cmp(&b.column))
    });

    let mut row_taken = vec![false; matrix.rows()];
    let mut col_taken = vec![false; matrix.cols()];
    let mut matches = Vec::new();

    for cell in cells {
        if row_taken[cell.row] || col_taken[cell.column] {
            continue;
        }
        row_taken[cell.row] = true;
        col_taken[cell.column] = true;
        matches.push(cell);
    }
    matches
}

fn optimal(matrix: &SimilarityMatrix, min_score: f64) -> Vec<ColumnMatch> {
    // Ineligible cells cost the same as padding, i.e. they count as score 0.
    let pad_cost = COST_SCALE as i64;
    let costs: Vec<Vec<i64>> = matrix
        .rows_iter()
        .map(|scores| {
            scores
                .iter()
                .map(|&s| {
                    if eligible(s, min_score) {
                        pad_cost - (s.clamp(0.0, 1.0) * COST_SCALE).round() as i64
                    } else {
                        pad_cost
                    }
                })
                .collect()
        })
        .collect();

    hungarian::solve_rect(&costs, matrix.cols(), pad_cost)
        .into_iter()
        .enumerate()
        .filter_map(|(row, column)| {
            let column = column?;
            let score = matrix.get(row, column)?;
            eligible(score, min_score).then_some(ColumnMatch { row, column, score })
        })
        .collect()
}

fn best_per_row(matrix: &SimilarityMatrix, min_score: f64) -> Vec<ColumnMatch> {
    matrix
        .rows_iter()
        .enumerate()
        .filter_map(|(row, scores)| {
            let mut best: Option<ColumnMatch> = None;
            for (column, &score) in scores.iter().enumerate() {
                if !eligible(score, min_score) {
                    continue;
                }
                if best.is_none_or(|b| score > b.score) {
                    best = Some(ColumnMatch { row, column, score });
                }
            }
            best
        })
        .collect()
}
