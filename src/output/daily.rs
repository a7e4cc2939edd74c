//! Daily report aggregation
//!
//! Builds the structured `DailyReport` from raw visits. Rendering to text
//! lives in `text.rs` and depends only on this structure.

use crate::analysis::{build_comparison, statistics::mean, timed_response_times, ComparisonResult};
use crate::config::Config;
use crate::records::VisitRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Crawler compared against `DEFAULT_GROUP_B` in the daily report
pub const DEFAULT_GROUP_A: &str = "Googlebot";

/// Crawler compared against `DEFAULT_GROUP_A` in the daily report
pub const DEFAULT_GROUP_B: &str = "GPTBot";

/// Visit count below which traffic is considered low
pub const DEFAULT_LOW_TRAFFIC_THRESHOLD: usize = 10;

/// Report heading
pub const DEFAULT_REPORT_TITLE: &str = "WAIO DAILY CRAWLER REPORT";

/// Rule-based recommendation attached to a daily report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// The compared crawlers differ significantly in response time
    InvestigateDisparity,

    /// No visits at all
    NoTraffic,

    /// Some visits, but fewer than the low-traffic threshold
    LowTraffic,

    /// Visit volume at or above the threshold
    NormalTraffic,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::InvestigateDisparity => {
                "Investigate performance disparity between bot types."
            }
            Recommendation::NoTraffic => "No traffic detected. Verify server reachability.",
            Recommendation::LowTraffic => "Low traffic volume. Consider submitting sitemap.",
            Recommendation::NormalTraffic => "Traffic levels normal.",
        }
    }

    /// Selects the traffic-volume recommendation; exactly one always applies
    pub fn for_traffic(total_visits: usize, low_traffic_threshold: usize) -> Self {
        if total_visits == 0 {
            Recommendation::NoTraffic
        } else if total_visits < low_traffic_threshold {
            Recommendation::LowTraffic
        } else {
            Recommendation::NormalTraffic
        }
    }
}

/// Settings that shape a daily report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub title: String,
    pub group_a: String,
    pub group_b: String,
    pub low_traffic_threshold: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            group_a: DEFAULT_GROUP_A.to_string(),
            group_b: DEFAULT_GROUP_B.to_string(),
            low_traffic_threshold: DEFAULT_LOW_TRAFFIC_THRESHOLD,
        }
    }
}

impl ReportOptions {
    /// Takes report settings from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.report.title.clone(),
            group_a: config.comparison.group_a.clone(),
            group_b: config.comparison.group_b.clone(),
            low_traffic_threshold: config.report.low_traffic_threshold,
        }
    }
}

/// Aggregated view of one day of crawler traffic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub total_visits: usize,

    /// Visits per crawler, in first-seen order
    pub crawler_counts: Vec<(String, u64)>,

    /// Mean response time over all timed visits (0.0 if none)
    pub avg_response_time: f64,

    pub comparison: ComparisonResult,

    pub recommendations: Vec<String>,
}

impl DailyReport {
    /// Returns the visit count recorded for a crawler
    pub fn count_for(&self, crawler_id: &str) -> Option<u64> {
        self.crawler_counts
            .iter()
            .find(|(name, _)| name == crawler_id)
            .map(|(_, count)| *count)
    }

    /// Share of all visits made by `count` visits, in percent
    pub fn share_percent(&self, count: u64) -> f64 {
        if self.total_visits == 0 {
            return 0.0;
        }
        count as f64 / self.total_visits as f64 * 100.0
    }
}

/// Builds the daily report for the default Googlebot vs GPTBot comparison
pub fn build_daily_report(records: &[VisitRecord]) -> DailyReport {
    build_daily_report_with(records, &ReportOptions::default())
}

/// Builds a daily report using the given comparison pair and thresholds
pub fn build_daily_report_with(records: &[VisitRecord], options: &ReportOptions) -> DailyReport {
    let total_visits = records.len();
    let crawler_counts = count_by_crawler(records);
    let avg_response_time = mean(&timed_response_times(records));
    let comparison = build_comparison(records, &options.group_a, &options.group_b);

    let mut recommendations = Vec::new();
    if comparison.significant {
        recommendations.push(Recommendation::InvestigateDisparity);
    }
    recommendations.push(Recommendation::for_traffic(
        total_visits,
        options.low_traffic_threshold,
    ));

    tracing::debug!(
        "Daily report: {} visits across {} crawlers, {} recommendations",
        total_visits,
        crawler_counts.len(),
        recommendations.len()
    );

    DailyReport {
        total_visits,
        crawler_counts,
        avg_response_time,
        comparison,
        recommendations: recommendations
            .iter()
            .map(|r| r.message().to_string())
            .collect(),
    }
}

/// Tallies visits per crawler, keeping first-seen order
pub fn count_by_crawler(records: &[VisitRecord]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for visit in records {
        match index.get(visit.crawler_id.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(&visit.crawler_id, counts.len());
                counts.push((visit.crawler_id.clone(), 1));
            }
        }
    }
    counts
}
