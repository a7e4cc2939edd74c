//! WAIO Insight: crawler traffic analytics
//!
//! This crate turns per-visit crawler traffic records into statistical
//! comparisons between crawler populations and a plain-text daily report.

pub mod analysis;
pub mod config;
pub mod detector;
pub mod output;
pub mod pipeline;
pub mod records;

use thiserror::Error;

/// Main error type for WAIO Insight operations
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] records::IngestError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for WAIO Insight operations
pub type Result<T> = std::result::Result<T, InsightError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use analysis::{
    build_comparison, compare, effect_size, extract_response_times, ComparisonResult,
    HypothesisTestResult,
};
pub use config::Config;
pub use detector::{identify, CrawlerInfo, CrawlerKind};
pub use output::{build_daily_report, render_daily_report, DailyReport};
pub use pipeline::Session;
pub use records::{load_visits, VisitRecord};
