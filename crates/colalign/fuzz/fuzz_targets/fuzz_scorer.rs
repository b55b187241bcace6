//! Fuzz target for column scoring.
//!
//! Any pair of columns, including ones holding extreme or tiny magnitudes,
//! must score inside [0, 1] under both numeric methods.

#![no_main]

use arbitrary::Arbitrary;
use colalign::{Column, NumericMethod, ScorerConfig, SimilarityScorer};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum FuzzColumn {
    Text(Vec<Option<String>>),
    Numeric(Vec<Option<f64>>),
}

impl FuzzColumn {
    fn build(self) -> Column {
        match self {
            FuzzColumn::Text(cells) => Column::text("t", cells),
            FuzzColumn::Numeric(cells) => Column::numeric("n", cells),
        }
    }
}

fuzz_target!(|input: (FuzzColumn, FuzzColumn)| {
    let a = input.0.build();
    let b = input.1.build();

    for numeric in [NumericMethod::StatisticDistance, NumericMethod::PairwiseZScore] {
        let scorer = SimilarityScorer::with_config(ScorerConfig {
            numeric,
            ..ScorerConfig::default()
        });
        let s = scorer.score(&a, &b);
        assert!((0.0..=1.0).contains(&s), "{numeric:?} scored {s}");
    }
});
