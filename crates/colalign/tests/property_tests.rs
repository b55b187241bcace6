//! Property-based tests for the similarity engine.
//!
//! These tests use proptest to generate random columns and tables and verify
//! that scoring, matrix building and alignment keep their invariants.
//!
//! ```bash
//! cargo test -p colalign --test property_tests
//! PROPTEST_CASES=10000 cargo test -p colalign --test property_tests
//! ```

use proptest::prelude::*;

use colalign::{
    AlignConfig, Alignment, AlignmentPolicy, Column, NoProgress, NumericMethod, ScorerConfig,
    SimilarityScorer, Table, build_matrix, profile, score,
};

// =============================================================================
// Test Strategies
// =============================================================================

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z]{2,8}",
        1 => "[A-Z0-9]",
        1 => "[?!+#]{1,2}",
    ]
}

fn text_cell() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        4 => prop::collection::vec(word(), 1..5).prop_map(|w| Some(w.join(" "))),
        1 => Just(None),
    ]
}

fn text_column() -> impl Strategy<Value = Column> {
    prop::collection::vec(text_cell(), 1..20).prop_map(|cells| Column::text("t", cells))
}

fn numeric_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1_000.0f64..1_000.0, 2..30)
}

fn numeric_column() -> impl Strategy<Value = Column> {
    numeric_values().prop_map(|v| Column::numeric("n", v.into_iter().map(Some)))
}

fn any_column() -> impl Strategy<Value = Column> {
    prop_oneof![text_column(), numeric_column()]
}

/// Tables of `rows` cells and 0..6 columns of mixed kinds.
fn table(name: &'static str, rows: usize) -> impl Strategy<Value = Table> {
    let cell_text = prop::collection::vec(text_cell(), rows);
    let cell_num = prop::collection::vec(prop::option::of(-50.0f64..50.0), rows);
    let column = prop_oneof![
        cell_text.prop_map(|c| Column::text("t", c)),
        cell_num.prop_map(|c| Column::numeric("n", c)),
    ];
    prop::collection::vec(column, 0..6)
        .prop_map(move |cols| Table::new(name, cols).expect("equal-length columns"))
}

fn zscore_scorer() -> SimilarityScorer {
    SimilarityScorer::with_config(ScorerConfig {
        numeric: NumericMethod::PairwiseZScore,
        ..ScorerConfig::default()
    })
}

// =============================================================================
// Scorer Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_score_is_bounded(a in any_column(), b in any_column()) {
        let s = score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s), "score {} out of range", s);
        let z = zscore_scorer().score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&z), "zscore {} out of range", z);
    }

    #[test]
    fn prop_score_is_deterministic(a in any_column(), b in any_column()) {
        prop_assert_eq!(score(&a, &b).to_bits(), score(&a, &b).to_bits());
    }

    #[test]
    fn prop_text_self_similarity_is_maximal(a in text_column(), b in text_column()) {
        let self_score = score(&a, &a);
        if a.text_values().next().is_some() {
            prop_assert!((self_score - 1.0).abs() < 1e-9, "self score {}", self_score);
        }
        prop_assert!(score(&a, &b) <= self_score + 1e-9 || self_score == 0.0);
    }

    #[test]
    fn prop_short_token_columns_match_themselves(
        cells in prop::collection::vec(prop::option::of("[A-Z0-9]"), 1..20)
    ) {
        let c = Column::text("codes", cells);
        if c.text_values().next().is_some() {
            let s = score(&c, &c);
            prop_assert!((s - 1.0).abs() < 1e-9, "self score {}", s);
        }
    }

    #[test]
    fn prop_mixed_kinds_are_neutral(t in text_column(), n in numeric_column()) {
        prop_assert_eq!(score(&t, &n), 0.0);
        prop_assert_eq!(score(&n, &t), 0.0);
    }

    #[test]
    fn prop_numeric_scaling_invariance(
        a in numeric_values(),
        b in numeric_values(),
        factor in 0.01f64..1_000.0,
    ) {
        let col = |v: &[f64], k: f64| Column::numeric("n", v.iter().map(|x| Some(x * k)));
        let base = score(&col(&a, 1.0), &col(&b, 1.0));
        let scaled = score(&col(&a, factor), &col(&b, factor));
        prop_assert!((base - scaled).abs() < 1e-6, "{} vs {}", base, scaled);
    }

    #[test]
    fn prop_numeric_self_similarity(v in numeric_values()) {
        let c = Column::numeric("n", v.into_iter().map(Some));
        prop_assert_eq!(score(&c, &c), 1.0);
        prop_assert_eq!(zscore_scorer().score(&c, &c), 1.0);
    }

    #[test]
    fn prop_profile_excludes_missing(v in prop::collection::vec(prop::option::of(-100.0f64..100.0), 0..30)) {
        let present: Vec<f64> = v.iter().flatten().copied().collect();
        let p = profile(&Column::numeric("n", v.clone()));
        prop_assert_eq!(p.missing, v.len() - present.len());
        let stats = p.numeric().unwrap();
        if present.is_empty() {
            prop_assert!(stats.is_undefined());
        } else {
            prop_assert!(stats.min <= stats.q1 && stats.q1 <= stats.median);
            prop_assert!(stats.median <= stats.q3 && stats.q3 <= stats.max);
        }
    }
}

// =============================================================================
// Matrix and Alignment Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_matrix_shape_and_fill(a in table("a", 6), b in table("b", 6)) {
        match build_matrix(&a, &b, &NoProgress) {
            None => prop_assert_eq!(b.column_count(), 0),
            Some(m) => {
                prop_assert_eq!(m.shape(), (a.column_count(), b.column_count()));
                prop_assert_eq!(m.values().len(), a.column_count() * b.column_count());
                prop_assert!(m.values().iter().all(|v| (0.0..=1.0).contains(v)));
            }
        }
    }

    #[test]
    fn prop_one_to_one_policies(a in table("a", 5), b in table("b", 5)) {
        let Some(m) = build_matrix(&a, &b, &NoProgress) else {
            return Ok(());
        };
        for policy in [AlignmentPolicy::Greedy, AlignmentPolicy::Optimal] {
            let config = AlignConfig { policy, ..AlignConfig::default() };
            let alignment = Alignment::select(&m, &config);
            prop_assert!(alignment.is_one_to_one());
            prop_assert!(alignment.matches.iter().all(|x| x.score > 0.0));
            prop_assert_eq!(
                alignment.len() + alignment.unmatched_rows.len(),
                m.rows()
            );
        }
    }

    #[test]
    fn prop_optimal_total_at_least_greedy(a in table("a", 5), b in table("b", 5)) {
        let Some(m) = build_matrix(&a, &b, &NoProgress) else {
            return Ok(());
        };
        let greedy = Alignment::select(&m, &AlignConfig::default());
        let optimal = Alignment::select(
            &m,
            &AlignConfig { policy: AlignmentPolicy::Optimal, ..AlignConfig::default() },
        );
        prop_assert!(optimal.total_score() + 1e-6 >= greedy.total_score());
    }
}
