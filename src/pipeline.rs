//! End-to-end analysis run
//!
//! A `Session` ties a loaded configuration to the visits file it reads.
//! Every step returns the crate-level `Result`, so configuration, ingestion
//! and output failures all surface as `InsightError`.

use crate::config::{load_config_with_hash, Config};
use crate::output::{
    build_daily_report_with, render_daily_report, write_performance_summary, write_text_report,
    DailyReport, PerformanceSummary, ReportOptions,
};
use crate::records::{load_visits_with_stats, VisitRecord};
use crate::Result;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// A validated configuration plus the visits file it applies to
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,

    /// SHA-256 of the configuration file
    pub config_hash: String,

    pub visits_path: PathBuf,
}

/// Output of a report run
#[derive(Debug, Clone)]
pub struct ReportRun {
    pub report: DailyReport,
    pub text: String,

    /// Where the text was written, if an output path is configured
    pub written_to: Option<PathBuf>,
}

/// Output of a summary run
#[derive(Debug, Clone)]
pub struct SummaryRun {
    pub summary: PerformanceSummary,
    pub json: String,
    pub written_to: Option<PathBuf>,
}

impl Session {
    /// Loads the configuration. `visits_override` replaces the configured
    /// visits path when given.
    pub fn open(config_path: &Path, visits_override: Option<PathBuf>) -> Result<Self> {
        tracing::info!("Loading configuration from: {}", config_path.display());
        let (config, config_hash) = load_config_with_hash(config_path)?;
        tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

        let visits_path =
            visits_override.unwrap_or_else(|| PathBuf::from(&config.input.visits_path));

        Ok(Self {
            config,
            config_hash,
            visits_path,
        })
    }

    pub fn options(&self) -> ReportOptions {
        ReportOptions::from_config(&self.config)
    }

    /// Reads the visits file, logging what ingestion dropped
    pub fn load_visits(&self) -> Result<Vec<VisitRecord>> {
        tracing::info!("Loading visits from: {}", self.visits_path.display());
        let (visits, stats) = load_visits_with_stats(&self.visits_path)?;

        if stats.skipped_entries > 0 || stats.dropped_response_times > 0 {
            tracing::warn!(
                "Skipped {} malformed entries and {} malformed response times",
                stats.skipped_entries,
                stats.dropped_response_times
            );
        }
        tracing::info!("Loaded {} visits", stats.records);

        Ok(visits)
    }

    /// Builds and renders the daily report, writing it to the configured
    /// report path if there is one
    pub fn run_report(&self, visits: &[VisitRecord], date: NaiveDate) -> Result<ReportRun> {
        let options = self.options();
        let report = build_daily_report_with(visits, &options);
        let text = render_daily_report(&report, &options.title, date);

        if report.comparison.significant {
            tracing::info!(
                "{} differs significantly (p={:.4}, d={:.2})",
                report.comparison.title(),
                report.comparison.p_value,
                report.comparison.effect_size
            );
        }

        let written_to = match &self.config.output.report_path {
            Some(path) => {
                let path = PathBuf::from(path);
                write_text_report(&text, &path)?;
                tracing::info!("Report written to: {}", path.display());
                Some(path)
            }
            None => None,
        };

        Ok(ReportRun {
            report,
            text,
            written_to,
        })
    }

    /// Builds the JSON performance summary, writing it to the configured
    /// summary path if there is one
    pub fn run_summary(&self, visits: &[VisitRecord]) -> Result<SummaryRun> {
        let report = build_daily_report_with(visits, &self.options());
        let summary = PerformanceSummary::from(&report.comparison);
        let json = summary.to_json_pretty()?;

        let written_to = match &self.config.output.summary_path {
            Some(path) => {
                let path = PathBuf::from(path);
                write_performance_summary(&summary, &path)?;
                tracing::info!("Summary written to: {}", path.display());
                Some(path)
            }
            None => None,
        };

        Ok(SummaryRun {
            summary,
            json,
            written_to,
        })
    }
}
