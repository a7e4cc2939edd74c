use crate::output::{
    DEFAULT_GROUP_A, DEFAULT_GROUP_B, DEFAULT_LOW_TRAFFIC_THRESHOLD, DEFAULT_REPORT_TITLE,
};
use serde::Deserialize;

/// Main configuration structure for WAIO Insight
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    #[serde(default)]
    pub comparison: ComparisonConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where visit records are read from
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to a JSON or JSON-lines visits file
    #[serde(rename = "visits-path")]
    pub visits_path: String,
}

/// The pair of crawlers compared in reports
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonConfig {
    #[serde(rename = "group-a", default = "default_group_a")]
    pub group_a: String,

    #[serde(rename = "group-b", default = "default_group_b")]
    pub group_b: String,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            group_a: default_group_a(),
            group_b: default_group_b(),
        }
    }
}

/// Daily report presentation settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Visit count below which the low-traffic recommendation fires
    #[serde(rename = "low-traffic-threshold", default = "default_low_traffic_threshold")]
    pub low_traffic_threshold: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            low_traffic_threshold: default_low_traffic_threshold(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path where the text report is written
    #[serde(rename = "report-path")]
    pub report_path: Option<String>,

    /// Path where the JSON performance summary is written
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

fn default_group_a() -> String {
    DEFAULT_GROUP_A.to_string()
}

fn default_group_b() -> String {
    DEFAULT_GROUP_B.to_string()
}

fn default_title() -> String {
    DEFAULT_REPORT_TITLE.to_string()
}

fn default_low_traffic_threshold() -> usize {
    DEFAULT_LOW_TRAFFIC_THRESHOLD
}
