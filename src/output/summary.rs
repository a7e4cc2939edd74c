//! JSON performance summary of a crawler comparison

use crate::analysis::{ComparisonResult, EffectMagnitude};
use crate::output::OutputResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Machine-readable summary of a two-crawler comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    /// e.g. "Googlebot vs GPTBot"
    pub comparison: String,
    pub metrics: PerformanceMetrics,
    pub statistics: PerformanceStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub group_a: String,
    pub group_b: String,
    pub mean_a: f64,
    pub mean_b: f64,
    pub diff_percent: f64,
    pub sample_size_a: usize,
    pub sample_size_b: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStatistics {
    pub t_stat: f64,
    pub p_value: f64,
    pub significant: bool,
    pub effect_size: f64,
    pub effect_magnitude: EffectMagnitude,
}

impl From<&ComparisonResult> for PerformanceSummary {
    fn from(result: &ComparisonResult) -> Self {
        Self {
            comparison: result.title(),
            metrics: PerformanceMetrics {
                group_a: result.group_a_label.clone(),
                group_b: result.group_b_label.clone(),
                mean_a: result.mean_a,
                mean_b: result.mean_b,
                diff_percent: result.diff_percent,
                sample_size_a: result.sample_size_a,
                sample_size_b: result.sample_size_b,
            },
            statistics: PerformanceStatistics {
                t_stat: finite_or_zero(result.t_stat),
                p_value: result.p_value,
                significant: result.significant,
                effect_size: result.effect_size,
                effect_magnitude: EffectMagnitude::from_effect_size(result.effect_size),
            },
        }
    }
}

impl PerformanceSummary {
    /// Serializes the summary as pretty-printed JSON
    pub fn to_json_pretty(&self) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// JSON cannot carry infinities; a noise-free separation shows up in
/// `p_value` and `significant` only.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Writes a performance summary as JSON to a file
pub fn write_performance_summary(summary: &PerformanceSummary, output_path: &Path) -> OutputResult<()> {
    let json = summary.to_json_pretty()?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
