//! Analysis module for comparing crawler populations
//!
//! This module handles:
//! - Extracting per-crawler response-time samples from visit records
//! - Two-sample hypothesis testing and effect sizes
//! - Building structured comparisons between two named crawlers
//!
//! Every function here is pure: results depend only on the input records.

mod comparison;
mod extract;
pub mod statistics;

pub use comparison::{build_comparison, percent_difference, ComparisonResult};
pub use extract::{extract_response_times, timed_response_times};
pub use statistics::{
    compare, effect_size, EffectMagnitude, HypothesisTestResult, SIGNIFICANCE_LEVEL,
};
