// Anderson-Darling normality test
//
// The null hypothesis is that samples come from a normal distribution whose
// mean and variance are estimated from the samples themselves (case 4 in
// D'Agostino & Stephens, "Goodness-of-Fit Techniques", 1986).

use crate::cdf::zscore;
use serde::{Deserialize, Serialize};

/// Normality is only assessed above this many runs
pub const MIN_NORMALITY_RUNS: usize = 7;

/// Outcome of the normality test for one command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normality {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub stddev: f64,
    /// Anderson-Darling A² with the small-sample correction applied
    pub ad_score: f64,
    /// Probability of the data under the normal hypothesis
    pub p_normal: f64,
}

impl Default for Normality {
    /// Values used when there is too little data to test
    fn default() -> Self {
        Self {
            mean: 0.0,
            stddev: 0.0,
            ad_score: 0.0,
            p_normal: 1.0,
        }
    }
}

/// Run the Anderson-Darling test on sorted values
///
/// With `MIN_NORMALITY_RUNS` or fewer values, or zero spread, the test is
/// skipped and `p_normal` stays 1.0.
pub fn anderson_darling(sorted: &[i64]) -> Normality {
    let n = sorted.len();
    if n <= MIN_NORMALITY_RUNS {
        return Normality::default();
    }

    let nf = n as f64;
    let mean = sorted.iter().map(|&v| v as f64).sum::<f64>() / nf;
    let variance = sorted
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / (nf - 1.0);
    let stddev = variance.sqrt();

    if stddev <= 0.0 || !stddev.is_finite() {
        return Normality {
            mean,
            stddev,
            ..Normality::default()
        };
    }

    let mut sum = 0.0;
    for (k, &v) in sorted.iter().enumerate() {
        let i = (k + 1) as f64;
        let z = zscore((v as f64 - mean) / stddev);
        sum += (2.0 * i - 1.0) * z.ln() + (2.0 * (nf - i) + 1.0) * (1.0 - z).ln();
    }
    let a2 = -nf - sum / nf;
    let ad_score = a2 * (1.0 + 0.75 / nf + 2.25 / (nf * nf));

    Normality {
        mean,
        stddev,
        ad_score,
        p_normal: p_value(ad_score),
    }
}

/// Approximate p-value for a corrected A² statistic
///
/// Four-regime fit to the published significance tables.
pub fn p_value(ad: f64) -> f64 {
    let p = if ad >= 0.6 {
        (1.2937 - 5.709 * ad + 0.0186 * ad * ad).exp()
    } else if ad >= 0.34 {
        (0.9177 - 4.279 * ad - 1.38 * ad * ad).exp()
    } else if ad > 0.2 {
        1.0 - (-8.318 + 42.796 * ad - 59.938 * ad * ad).exp()
    } else {
        1.0 - (-13.436 + 101.14 * ad - 223.73 * ad * ad).exp()
    };
    p.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdf::inv_phi;

    /// Evenly spaced normal quantiles scaled to integers
    fn normal_quantiles(n: usize, mean: f64, sd: f64) -> Vec<i64> {
        (1..=n)
            .map(|i| {
                let p = (i as f64 - 0.5) / n as f64;
                (mean + sd * inv_phi(p, 1e-9)).round() as i64
            })
            .collect()
    }

    #[test]
    fn test_too_few_runs_defaults() {
        let result = anderson_darling(&[1, 2, 3, 100, 1000, 5000, 9000]);
        assert_eq!(result, Normality::default());
        assert_eq!(result.p_normal, 1.0);
    }

    #[test]
    fn test_constant_data_is_skipped() {
        let result = anderson_darling(&[500; 20]);
        assert_eq!(result.mean, 500.0);
        assert_eq!(result.stddev, 0.0);
        assert_eq!(result.p_normal, 1.0);
    }

    #[test]
    fn test_mean_and_sample_stddev() {
        let result = anderson_darling(&[2, 4, 4, 4, 5, 5, 7, 9]);
        assert!((result.mean - 5.0).abs() < 1e-12);
        // sum of squares 32, n - 1 = 7
        assert!((result.stddev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_normal_data_not_rejected() {
        let data = normal_quantiles(200, 10_000.0, 500.0);
        let result = anderson_darling(&data);
        assert!(result.ad_score < 0.5, "A² = {}", result.ad_score);
        assert!(result.p_normal > 0.5, "p = {}", result.p_normal);
    }

    #[test]
    fn test_skewed_data_rejected() {
        let mut data: Vec<i64> = (0..100).map(|i| (1.07_f64.powi(i) * 100.0) as i64).collect();
        data.sort_unstable();
        let result = anderson_darling(&data);
        assert!(result.p_normal < 0.05, "p = {}", result.p_normal);
    }

    #[test]
    fn test_p_value_regimes_are_monotonic() {
        let mut prev = p_value(0.0);
        for i in 1..400 {
            let p = p_value(i as f64 * 0.01);
            assert!(p <= prev + 1e-3, "ad = {}", i as f64 * 0.01);
            prev = p;
        }
    }

    #[test]
    fn test_p_value_known_points() {
        // Critical value 0.752 corresponds to roughly 5% significance
        assert!((p_value(0.752) - 0.05).abs() < 0.005);
        // Critical value 1.035 corresponds to roughly 1% significance
        assert!((p_value(1.035) - 0.01).abs() < 0.002);
        assert!(p_value(0.1) > 0.9);
    }
}
