//! Similarity between the statistic vectors of two numeric columns.

use serde::{Deserialize, Serialize};

use crate::profile::NumericProfile;

/// Score returned by the pairwise z-score method when the two columns tie but
/// their statistics differ.
pub const ZSCORE_TIE_SCORE: f64 = 0.5;

/// How two numeric profiles are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericMethod {
    /// `1 - mean` of the per-statistic relative differences
    /// `|a - b| / (|a| + |b|)`. Invariant under positive scaling of both
    /// columns; identical columns score 1.
    #[default]
    StatisticDistance,
    /// Z-score each statistic over the pair, sum per side, min-max normalise
    /// the two sums and keep column A's value. The result is 1 when A ranks
    /// above B on balance, 0 when below, and a tie fallback otherwise.
    PairwiseZScore,
}

impl NumericMethod {
    pub fn score(&self, a: &NumericProfile, b: &NumericProfile) -> f64 {
        match self {
            NumericMethod::StatisticDistance => statistic_distance_similarity(a, b),
            NumericMethod::PairwiseZScore => pairwise_zscore_similarity(a, b),
        }
    }
}

/// Relative difference of one statistic, in `[0, 1]`.
fn relative_difference(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => 0.0,
        (true, false) | (false, true) => 1.0,
        (false, false) => {
            if a == b {
                return 0.0;
            }
            // x and y lie in [-1, 1].
            let scale = a.abs().max(b.abs());
            let (x, y) = (a / scale, b / scale);
            ((x - y).abs() / (x.abs() + y.abs())).min(1.0)
        }
    }
}

pub fn statistic_distance_similarity(a: &NumericProfile, b: &NumericProfile) -> f64 {
    let stats_a = a.as_array();
    let stats_b = b.as_array();
    let total: f64 = stats_a
        .iter()
        .zip(stats_b.iter())
        .map(|(&x, &y)| relative_difference(x, y))
        .sum();
    (1.0 - total / stats_a.len() as f64).clamp(0.0, 1.0)
}

/// Z-scores of a two-element sample with population deviation.
///
/// Zero or undefined deviation gives both sides 0. The two z-scores of a pair
/// are always -1 and 1, so only the ordering of `x` and `y` matters.
fn pair_zscores(x: f64, y: f64) -> (f64, f64) {
    if x.is_nan() || y.is_nan() || x == y {
        (0.0, 0.0)
    } else if x > y {
        (1.0, -1.0)
    } else {
        (-1.0, 1.0)
    }
}

fn same_statistics(a: &NumericProfile, b: &NumericProfile) -> bool {
    a.as_array()
        .iter()
        .zip(b.as_array().iter())
        .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}

pub fn pairwise_zscore_similarity(a: &NumericProfile, b: &NumericProfile) -> f64 {
    let (sum_a, sum_b) = a
        .as_array()
        .iter()
        .zip(b.as_array().iter())
        .map(|(&x, &y)| pair_zscores(x, y))
        .fold((0.0, 0.0), |(sa, sb), (za, zb)| (sa + za, sb + zb));

    let lo = sum_a.min(sum_b);
    let hi = sum_a.max(sum_b);
    if hi == lo {
        return if same_statistics(a, b) {
            1.0
        } else {
            ZSCORE_TIE_SCORE
        };
    }
    (sum_a - lo) / (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(values: &[f64]) -> NumericProfile {
        NumericProfile::from_values(values.iter().copied())
    }

    #[test]
    fn test_identical_profiles_score_one() {
        let a = p(&[1.0, 2.0, 3.0]);
        assert_eq!(statistic_distance_similarity(&a, &a), 1.0);
        assert_eq!(pairwise_zscore_similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_distance_of_tenfold_scale() {
        // Every statistic differs by a factor of 10: d = 9/11 each.
        let a = p(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = p(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let s = statistic_distance_similarity(&a, &b);
        assert!((s - 2.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_handles_zero_and_nan() {
        assert_eq!(relative_difference(0.0, 0.0), 0.0);
        assert_eq!(relative_difference(f64::NAN, f64::NAN), 0.0);
        assert_eq!(relative_difference(f64::NAN, 1.0), 1.0);
        assert_eq!(relative_difference(-1.0, 1.0), 1.0);
    }

    #[test]
    fn test_large_magnitudes_keep_self_similarity() {
        let a = p(&[1e308, 1e308, 1e308]);
        assert_eq!(statistic_distance_similarity(&a, &a), 1.0);
        assert_eq!(pairwise_zscore_similarity(&a, &a), 1.0);
        assert!((relative_difference(1e308, 1.5e308) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_single_values_compare_without_std() {
        let a = p(&[4.0]);
        let b = p(&[4.0]);
        assert_eq!(statistic_distance_similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_zscore_is_directional() {
        let small = p(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let large = p(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(pairwise_zscore_similarity(&small, &large), 0.0);
        assert_eq!(pairwise_zscore_similarity(&large, &small), 1.0);
    }

    #[test]
    fn test_zscore_tie_fallback() {
        // A is higher on the mean and lower on the minimum, so the sums cancel.
        let a = NumericProfile {
            mean: 6.0,
            min: 0.0,
            max: 10.0,
            std: 2.0,
            q1: 3.0,
            median: 5.0,
            q3: 7.0,
        };
        let b = NumericProfile {
            mean: 5.0,
            min: 1.0,
            ..a
        };
        assert_eq!(pairwise_zscore_similarity(&a, &b), ZSCORE_TIE_SCORE);
    }

    #[test]
    fn test_pair_zscores_are_unit() {
        let (za, zb) = pair_zscores(2.0, 6.0);
        assert_eq!((za, zb), (-1.0, 1.0));
        assert_eq!(pair_zscores(3.0, 3.0), (0.0, 0.0));
    }
}
