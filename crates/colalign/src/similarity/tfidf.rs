//! TF-IDF cosine similarity over a two-document corpus.
//!
//! Each text column is one document made of all its non-missing cells. Term
//! weights use raw term frequency and the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`, with `n = 2`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Documents in the corpus of one comparison.
const CORPUS_SIZE: f64 = 2.0;

/// Tokenization settings for text scoring.
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Lowercase tokens before counting.
    pub lowercase: bool,
    /// Shortest token (in characters) that counts as a term.
    pub min_token_chars: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_chars: 2,
        }
    }
}

/// Term counts of one document, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermCounts {
    counts: IndexMap<String, usize>,
}

impl TermCounts {
    /// Count the terms of a document made of `cells`.
    ///
    /// A document with no word of at least `min_token_chars` characters, such
    /// as a column of grade letters or single digits, is counted by its
    /// whitespace-separated tokens instead, so any non-blank document has
    /// terms.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a str>, config: &TextConfig) -> Self {
        let cells: Vec<&str> = cells.into_iter().collect();
        let mut counts: IndexMap<String, usize> = IndexMap::new();

        for cell in &cells {
            for m in WORD.find_iter(cell) {
                let word = m.as_str();
                if word.chars().count() < config.min_token_chars {
                    continue;
                }
                *counts.entry(normalize(word, config)).or_insert(0) += 1;
            }
        }

        if counts.is_empty() {
            for token in cells.iter().flat_map(|c| c.split_whitespace()) {
                *counts.entry(normalize(token, config)).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn get(&self, term: &str) -> usize {
        self.counts.get(term).copied().unwrap_or(0)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(t, c)| (t.as_str(), *c))
    }
}

fn normalize(token: &str, config: &TextConfig) -> String {
    if config.lowercase {
        token.to_lowercase()
    } else {
        token.to_string()
    }
}

fn idf(document_frequency: usize) -> f64 {
    ((1.0 + CORPUS_SIZE) / (1.0 + document_frequency as f64)).ln() + 1.0
}

/// Cosine similarity of the TF-IDF vectors of two documents, in `[0, 1]`.
///
/// An empty document on either side scores 0.
pub fn tfidf_cosine(a: &TermCounts, b: &TermCounts) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let weight = |tf: usize, other: &TermCounts, term: &str| {
        let df = if other.get(term) > 0 { 2 } else { 1 };
        tf as f64 * idf(df)
    };

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    for (term, tf) in a.iter() {
        let wa = weight(tf, b, term);
        norm_a += wa * wa;
        let tf_b = b.get(term);
        if tf_b > 0 {
            dot += wa * weight(tf_b, a, term);
        }
    }

    let norm_b: f64 = b
        .iter()
        .map(|(term, tf)| {
            let wb = weight(tf, a, term);
            wb * wb
        })
        .sum();

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (dot / denom).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(cells: &[&str]) -> TermCounts {
        TermCounts::from_cells(cells.iter().copied(), &TextConfig::default())
    }

    #[test]
    fn test_tokenization_rules() {
        let t = terms(&["Red car, a RED bike!"]);
        assert_eq!(t.get("red"), 2);
        assert_eq!(t.get("car"), 1);
        assert_eq!(t.get("bike"), 1);
        // Single-character words are not terms.
        assert_eq!(t.get("a"), 0);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_case_sensitive_option() {
        let config = TextConfig {
            lowercase: false,
            ..TextConfig::default()
        };
        let t = TermCounts::from_cells(["Red red"], &config);
        assert_eq!(t.get("Red"), 1);
        assert_eq!(t.get("red"), 1);
    }

    #[test]
    fn test_identical_documents() {
        let a = terms(&["alpha beta", "beta gamma"]);
        assert!((tfidf_cosine(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_documents() {
        let a = terms(&["alpha beta"]);
        let b = terms(&["gamma delta"]);
        assert_eq!(tfidf_cosine(&a, &b), 0.0);
    }

    #[test]
    fn test_partial_overlap_matches_hand_computation() {
        // a = {x:1, y:1}, b = {x:1, z:1}; idf(x) = 1, idf(y) = idf(z) = ln(1.5) + 1
        let a = terms(&["xx yy"]);
        let b = terms(&["xx zz"]);
        let w = 1.5f64.ln() + 1.0;
        let expected = 1.0 / (1.0 + w * w);
        assert!((tfidf_cosine(&a, &b) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_short_tokens_fall_back_to_whitespace_terms() {
        let grades = terms(&["A", "B", "C", "A", "B"]);
        assert_eq!(grades.get("a"), 2);
        assert_eq!(grades.len(), 3);
        assert!((tfidf_cosine(&grades, &grades) - 1.0).abs() < 1e-12);

        let codes = terms(&["1 2", "3 x"]);
        assert_eq!(codes.len(), 4);
        assert!((tfidf_cosine(&codes, &codes) - 1.0).abs() < 1e-12);

        let symbols = terms(&["?!", "+"]);
        assert_eq!(symbols.get("?!"), 1);
    }

    #[test]
    fn test_fallback_only_when_no_long_words() {
        // "a" is dropped because "car" already makes the document non-empty.
        let t = terms(&["a car"]);
        assert_eq!(t.get("a"), 0);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_empty_document_scores_zero() {
        let a = terms(&["alpha"]);
        let empty = terms(&[]);
        assert_eq!(tfidf_cosine(&a, &empty), 0.0);
        assert_eq!(tfidf_cosine(&empty, &empty), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = terms(&["red car", "blue car", "red bike"]);
        let b = terms(&["red truck", "blue truck", "red car"]);
        assert!((tfidf_cosine(&a, &b) - tfidf_cosine(&b, &a)).abs() < 1e-12);
    }
}
