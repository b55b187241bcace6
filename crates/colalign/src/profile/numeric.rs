//! Descriptive statistics for numeric columns.

use serde::{Deserialize, Serialize};

/// Magnitude above which sums are taken over `x / max|x|`. Squares of
/// values at or below it cannot overflow.
const SCALE_THRESHOLD: f64 = 1e150;

/// Summary statistics of the non-missing values of a numeric column.
///
/// Every field is NaN for a column without values. `std` is the sample
/// standard deviation (n - 1), so it is also NaN for a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericProfile {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
}

impl NumericProfile {
    /// Compute the profile of a set of values. Non-finite values are ignored.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Self::undefined();
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let max_abs = sorted[0].abs().max(sorted[sorted.len() - 1].abs());
        let scale = if max_abs > SCALE_THRESHOLD { max_abs } else { 1.0 };

        let scaled_mean = sorted.iter().map(|v| v / scale).sum::<f64>() / n;
        let std = if sorted.len() < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted
                .iter()
                .map(|v| (v / scale - scaled_mean).powi(2))
                .sum();
            (ss / (n - 1.0)).sqrt() * scale
        };
        let mean = scaled_mean * scale;

        Self {
            mean,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            std,
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
        }
    }

    /// The profile of an empty column.
    pub fn undefined() -> Self {
        Self {
            mean: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            std: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
        }
    }

    /// True when the column had no values.
    pub fn is_undefined(&self) -> bool {
        self.mean.is_nan()
    }

    /// The statistics in field order: mean, min, max, std, q1, median, q3.
    pub fn as_array(&self) -> [f64; 7] {
        [
            self.mean,
            self.min,
            self.max,
            self.std,
            self.q1,
            self.median,
            self.q3,
        ]
    }
}

/// Linear-interpolated quantile of sorted, non-empty values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    let frac = pos - lo as f64;
    let gap = b - a;
    let value = if gap.is_finite() {
        a + gap * frac
    } else {
        a * (1.0 - frac) + b * frac
    };
    value.clamp(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_basic_statistics() {
        let p = NumericProfile::from_values([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(approx(p.mean, 3.0));
        assert!(approx(p.min, 1.0));
        assert!(approx(p.max, 5.0));
        assert!(approx(p.std, 2.5f64.sqrt()));
        assert!(approx(p.q1, 2.0));
        assert!(approx(p.median, 3.0));
        assert!(approx(p.q3, 4.0));
    }

    #[test]
    fn test_interpolated_quantiles() {
        let p = NumericProfile::from_values([4.0, 1.0, 3.0, 2.0]);
        assert!(approx(p.q1, 1.75));
        assert!(approx(p.median, 2.5));
        assert!(approx(p.q3, 3.25));
    }

    #[test]
    fn test_empty_is_undefined() {
        let p = NumericProfile::from_values(std::iter::empty());
        assert!(p.is_undefined());
        assert!(p.as_array().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_large_magnitudes_do_not_overflow() {
        let p = NumericProfile::from_values([1e308, 1e308, 1e308]);
        assert_eq!(p.mean, 1e308);
        assert_eq!(p.std, 0.0);
        assert_eq!(p.median, 1e308);

        let spread = NumericProfile::from_values([-1e308, 0.0, 1e308]);
        assert!(spread.mean.abs() < 1e292);
        assert!(spread.q1.is_finite() && spread.q3.is_finite());
        assert!(approx(spread.q1 / 1e308, -0.5));
        assert!(approx(spread.q3 / 1e308, 0.5));
    }

    #[test]
    fn test_single_value_has_undefined_std() {
        let p = NumericProfile::from_values([7.0]);
        assert!(approx(p.mean, 7.0));
        assert!(approx(p.median, 7.0));
        assert!(p.std.is_nan());
    }
}
