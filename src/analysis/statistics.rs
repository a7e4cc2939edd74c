// Two-sample statistics for crawler response times
//
// Independent-samples Student t-test with pooled variance, and Cohen's d
// with the same pooled standard deviation. The two-tailed p-value comes from
// statrs' Student t distribution with df = n_a + n_b - 2.
//
// Samples with fewer than 2 observations have no defined variance, so both
// operations return fixed neutral values instead of failing.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Fixed significance level for the hypothesis test
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Minimum observations per sample for a defined test
const MIN_SAMPLE_SIZE: usize = 2;

/// Result of a two-sample hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HypothesisTestResult {
    /// t-statistic (positive when sample A's mean is larger)
    pub t_stat: f64,

    /// Two-tailed p-value in [0, 1]
    pub p_value: f64,

    /// `p_value < SIGNIFICANCE_LEVEL`
    pub significant: bool,
}

impl HypothesisTestResult {
    /// Result used when the test is undefined
    pub const fn degenerate() -> Self {
        Self {
            t_stat: 0.0,
            p_value: 1.0,
            significant: false,
        }
    }

    fn from_statistic(t_stat: f64, p_value: f64) -> Self {
        let p_value = p_value.clamp(0.0, 1.0);
        Self {
            t_stat,
            p_value,
            significant: p_value < SIGNIFICANCE_LEVEL,
        }
    }
}

/// Conventional magnitude bands for Cohen's d
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    /// Classifies an effect size by its absolute value
    pub fn from_effect_size(d: f64) -> Self {
        let d = d.abs();
        if d < 0.2 {
            EffectMagnitude::Negligible
        } else if d < 0.5 {
            EffectMagnitude::Small
        } else if d < 0.8 {
            EffectMagnitude::Medium
        } else {
            EffectMagnitude::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectMagnitude::Negligible => "negligible",
            EffectMagnitude::Small => "small",
            EffectMagnitude::Medium => "medium",
            EffectMagnitude::Large => "large",
        }
    }
}

/// Runs an independent two-sample t-test with pooled variance
///
/// # Example
/// ```
/// use waio_insight::analysis::compare;
///
/// let result = compare(&[120.0, 130.0, 125.0], &[45.0, 50.0, 48.0]);
/// assert!(result.significant);
/// assert!(result.p_value < 0.05);
/// ```
pub fn compare(sample_a: &[f64], sample_b: &[f64]) -> HypothesisTestResult {
    if sample_a.len() < MIN_SAMPLE_SIZE || sample_b.len() < MIN_SAMPLE_SIZE {
        tracing::debug!(
            "Skipping t-test: sample sizes {} and {} below {}",
            sample_a.len(),
            sample_b.len(),
            MIN_SAMPLE_SIZE
        );
        return HypothesisTestResult::degenerate();
    }

    let n_a = sample_a.len() as f64;
    let n_b = sample_b.len() as f64;
    let mean_a = mean(sample_a);
    let mean_b = mean(sample_b);
    let df = n_a + n_b - 2.0;

    let pooled_variance = pooled_variance(sample_a, sample_b);
    let standard_error = (pooled_variance * (1.0 / n_a + 1.0 / n_b)).sqrt();

    // Zero within-group variance: the means are either equal (no evidence of
    // a difference) or differ with no noise at all.
    if standard_error == 0.0 {
        return if mean_a == mean_b {
            HypothesisTestResult::degenerate()
        } else {
            HypothesisTestResult::from_statistic(f64::INFINITY.copysign(mean_a - mean_b), 0.0)
        };
    }

    let t_stat = (mean_a - mean_b) / standard_error;
    let p_value = student_t_two_tailed(t_stat, df);

    tracing::debug!(
        "t-test: n_a={}, n_b={}, t={:.4}, df={}, p={:.6}",
        sample_a.len(),
        sample_b.len(),
        t_stat,
        df,
        p_value
    );

    HypothesisTestResult::from_statistic(t_stat, p_value)
}

/// Computes Cohen's d using the pooled standard deviation
///
/// Positive when sample A's mean exceeds sample B's. Returns 0.0 when either
/// sample has fewer than 2 observations or the pooled deviation is zero.
pub fn effect_size(sample_a: &[f64], sample_b: &[f64]) -> f64 {
    if sample_a.len() < MIN_SAMPLE_SIZE || sample_b.len() < MIN_SAMPLE_SIZE {
        return 0.0;
    }

    let pooled_std = pooled_variance(sample_a, sample_b).sqrt();
    if pooled_std == 0.0 {
        return 0.0;
    }

    (mean(sample_a) - mean(sample_b)) / pooled_std
}

/// Arithmetic mean, 0.0 for an empty sample
pub fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Bessel-corrected sample variance, 0.0 below 2 observations
pub fn sample_variance(sample: &[f64]) -> f64 {
    if sample.len() < MIN_SAMPLE_SIZE {
        return 0.0;
    }
    let m = mean(sample);
    sample.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (sample.len() as f64 - 1.0)
}

/// Bessel-corrected sample standard deviation
pub fn sample_std(sample: &[f64]) -> f64 {
    sample_variance(sample).sqrt()
}

/// Variance of two samples pooled by degrees of freedom
fn pooled_variance(sample_a: &[f64], sample_b: &[f64]) -> f64 {
    let n_a = sample_a.len() as f64;
    let n_b = sample_b.len() as f64;
    ((n_a - 1.0) * sample_variance(sample_a) + (n_b - 1.0) * sample_variance(sample_b))
        / (n_a + n_b - 2.0)
}

/// Two-tailed tail probability of the Student t distribution
///
/// Returns 1.0 (no evidence) if `df` does not describe a valid distribution.
pub fn student_t_two_tailed(t: f64, df: f64) -> f64 {
    if t.is_infinite() {
        return 0.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(e) => {
            tracing::warn!("Invalid Student t distribution (df={}): {}", df, e);
            1.0
        }
    }
}
