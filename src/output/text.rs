//! Plain-text daily report rendering
//!
//! The layout (section order, labels and decimal places) is consumed
//! verbatim by downstream readers and must stay stable.

use crate::output::daily::DailyReport;
use crate::output::OutputResult;
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "========================================";

/// Renders a daily report as a multi-section text document
///
/// # Arguments
///
/// * `report` - The aggregated report
/// * `title` - Heading printed under the top rule
/// * `date` - Date shown in the header
///
/// # Returns
///
/// The formatted report text
pub fn render_daily_report(report: &DailyReport, title: &str, date: NaiveDate) -> String {
    let mut text = String::new();
    let comparison = &report.comparison;

    // Header
    text.push('\n');
    text.push_str(RULE);
    text.push('\n');
    text.push_str(&format!("{}\n", title));
    text.push_str(&format!("Date: {}\n", date.format("%Y-%m-%d")));
    text.push_str(RULE);
    text.push_str("\n\n");

    // Summary
    text.push_str("SUMMARY\n");
    text.push_str("-------\n");
    text.push_str(&format!("Total Visits: {}\n", report.total_visits));
    text.push_str(&format!(
        "Avg Response Time: {:.2}ms\n",
        report.avg_response_time
    ));
    text.push('\n');

    // Crawler breakdown
    text.push_str("CRAWLER BREAKDOWN\n");
    text.push_str("-----------------\n");
    for (crawler, count) in &report.crawler_counts {
        text.push_str(&format!(
            "{}: {} ({:.1}%)\n",
            crawler,
            count,
            report.share_percent(*count)
        ));
    }
    text.push('\n');

    // Performance insights
    text.push_str("PERFORMANCE INSIGHTS\n");
    text.push_str("--------------------\n");
    text.push_str(&format!("{}:\n", comparison.title()));
    text.push_str(&format!(
        "  - {} Mean: {:.2}ms\n",
        comparison.group_a_label, comparison.mean_a
    ));
    text.push_str(&format!(
        "  - {} Mean: {:.2}ms\n",
        comparison.group_b_label, comparison.mean_b
    ));
    text.push_str(&format!(
        "  - Statistically Significant Diff: {} (p={:.4})\n",
        if comparison.significant { "YES" } else { "NO" },
        comparison.p_value
    ));
    text.push('\n');

    // Recommendations
    text.push_str("RECOMMENDATIONS\n");
    text.push_str("---------------\n");
    for recommendation in &report.recommendations {
        text.push_str(&format!("- {}\n", recommendation));
    }

    text
}

/// Writes rendered report text to a file
pub fn write_text_report(text: &str, output_path: &Path) -> OutputResult<()> {
    let mut file = File::create(output_path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}
