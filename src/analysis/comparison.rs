//! Structured comparison between two crawler populations

use crate::analysis::extract::extract_response_times;
use crate::analysis::statistics::{compare, effect_size, mean, HypothesisTestResult};
use crate::records::VisitRecord;
use serde::Serialize;

/// Response-time comparison between two crawlers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub group_a_label: String,
    pub group_b_label: String,

    /// Mean response time of group A in ms (0.0 when the group is empty)
    pub mean_a: f64,

    /// Mean response time of group B in ms (0.0 when the group is empty)
    pub mean_b: f64,

    /// How much slower group A is than group B, as a percentage of B
    pub diff_percent: f64,

    pub t_stat: f64,
    pub p_value: f64,
    pub significant: bool,

    /// Cohen's d (positive when group A is slower)
    pub effect_size: f64,

    /// Number of timed visits in each group
    pub sample_size_a: usize,
    pub sample_size_b: usize,
}

impl ComparisonResult {
    /// Returns the hypothesis test portion of the comparison
    pub fn test_result(&self) -> HypothesisTestResult {
        HypothesisTestResult {
            t_stat: self.t_stat,
            p_value: self.p_value,
            significant: self.significant,
        }
    }

    /// Display name of the comparison (e.g., "Googlebot vs GPTBot")
    pub fn title(&self) -> String {
        format!("{} vs {}", self.group_a_label, self.group_b_label)
    }
}

/// Relative difference of `mean_a` over `mean_b`, in percent
///
/// Returns 0.0 when `mean_b` is zero since no baseline exists.
pub fn percent_difference(mean_a: f64, mean_b: f64) -> f64 {
    if mean_b == 0.0 {
        return 0.0;
    }
    (mean_a - mean_b) / mean_b * 100.0
}

/// Compares the response times of two crawlers found in `records`
///
/// Empty or single-visit groups never fail; their statistics fall back to
/// neutral values.
pub fn build_comparison(records: &[VisitRecord], label_a: &str, label_b: &str) -> ComparisonResult {
    let sample_a = extract_response_times(records, label_a);
    let sample_b = extract_response_times(records, label_b);

    let mean_a = mean(&sample_a);
    let mean_b = mean(&sample_b);
    let test = compare(&sample_a, &sample_b);

    ComparisonResult {
        group_a_label: label_a.to_string(),
        group_b_label: label_b.to_string(),
        mean_a,
        mean_b,
        diff_percent: percent_difference(mean_a, mean_b),
        t_stat: test.t_stat,
        p_value: test.p_value,
        significant: test.significant,
        effect_size: effect_size(&sample_a, &sample_b),
        sample_size_a: sample_a.len(),
        sample_size_b: sample_b.len(),
    }
}
