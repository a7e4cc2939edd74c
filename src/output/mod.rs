//! Output module for generating crawler traffic reports
//!
//! This module handles:
//! - Aggregating visits into the daily report structure
//! - Rendering the plain-text daily report
//! - Exporting the comparison as a JSON performance summary
//! - Per-crawler traffic statistics

mod daily;
pub mod stats;
mod summary;
mod text;

pub use daily::{
    build_daily_report, build_daily_report_with, count_by_crawler, DailyReport, Recommendation,
    ReportOptions, DEFAULT_GROUP_A, DEFAULT_GROUP_B, DEFAULT_LOW_TRAFFIC_THRESHOLD,
    DEFAULT_REPORT_TITLE,
};
pub use stats::{
    compute_statistics, print_statistics, CrawlerStat, CrawlerStatistics, KindStat, PathStat,
};
pub use summary::{
    write_performance_summary, PerformanceMetrics, PerformanceStatistics, PerformanceSummary,
};
pub use text::{render_daily_report, write_text_report};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
