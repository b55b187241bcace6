//! Token frequency and length summaries for text columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A token and the number of times it appears in a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// Summary of the non-missing cells of a text column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextProfile {
    /// Most frequent whitespace-delimited tokens, most frequent first.
    /// Equal counts keep the order in which tokens were first seen.
    pub top_tokens: Vec<TokenCount>,
    /// Mean cell length in characters (NaN with no cells).
    pub mean_length: f64,
}

impl TextProfile {
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>, top_k: usize) -> Self {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        let mut cell_count = 0usize;
        let mut total_chars = 0usize;

        for cell in cells {
            cell_count += 1;
            total_chars += cell.chars().count();
            for token in cell.split_whitespace() {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_k);

        let mean_length = if cell_count == 0 {
            f64::NAN
        } else {
            total_chars as f64 / cell_count as f64
        };

        Self {
            top_tokens: ranked
                .into_iter()
                .map(|(token, count)| TokenCount {
                    token: token.to_string(),
                    count,
                })
                .collect(),
            mean_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_tokens_ranked() {
        let p = TextProfile::from_cells(["red car", "blue car", "red bike"], 8);
        let tokens: Vec<(&str, usize)> = p
            .top_tokens
            .iter()
            .map(|t| (t.token.as_str(), t.count))
            .collect();
        assert_eq!(
            tokens,
            vec![("red", 2), ("car", 2), ("blue", 1), ("bike", 1)]
        );
    }

    #[test]
    fn test_top_k_truncates() {
        let p = TextProfile::from_cells(["a b c d e"], 2);
        assert_eq!(p.top_tokens.len(), 2);
        assert_eq!(p.top_tokens[0].token, "a");
        assert_eq!(p.top_tokens[1].token, "b");
    }

    #[test]
    fn test_mean_length_counts_chars() {
        let p = TextProfile::from_cells(["ab", "çaé"], 8);
        assert!((p.mean_length - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_cells() {
        let p = TextProfile::from_cells(std::iter::empty(), 8);
        assert!(p.top_tokens.is_empty());
        assert!(p.mean_length.is_nan());
    }
}
