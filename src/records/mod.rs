//! Visit record model and ingestion
//!
//! This module handles:
//! - The typed `VisitRecord` consumed by the analysis pipeline
//! - Loading visit records from JSON or JSON-lines files
//! - Rejecting malformed response times at the ingestion boundary

mod loader;

pub use loader::{load_visits, load_visits_with_stats, parse_visits, IngestStats};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crawler identity used when a visit carries neither a crawler name nor a
/// recognizable user agent
pub const UNKNOWN_CRAWLER: &str = "Unknown";

/// Errors that can occur while ingesting visit records
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read visits file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse visits JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// A single crawler visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// Crawler identity (e.g., "Googlebot")
    pub crawler_id: String,

    /// Response time in milliseconds, if one was recorded
    pub response_time: Option<f64>,

    /// Requested path
    pub path: Option<String>,
}

impl VisitRecord {
    /// Creates a visit record without a path
    pub fn new(crawler_id: impl Into<String>, response_time: Option<f64>) -> Self {
        Self {
            crawler_id: crawler_id.into(),
            response_time,
            path: None,
        }
    }

    /// Creates a visit record with a recorded response time
    pub fn timed(crawler_id: impl Into<String>, response_time: f64) -> Self {
        Self::new(crawler_id, Some(response_time))
    }

    /// Sets the requested path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns true if this visit carries a usable response time
    pub fn is_timed(&self) -> bool {
        self.response_time.is_some()
    }
}

/// Accepts a response time only if it is finite and non-negative
pub fn validate_response_time(value: f64) -> Option<f64> {
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}
