//! Integration tests for the report pipeline
//!
//! These tests drive the public API end to end: configuration and visits
//! are written to temporary files, loaded, analyzed and rendered.

use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;
use waio_insight::config::parse_config;
use waio_insight::output::{
    build_daily_report, build_daily_report_with, compute_statistics, render_daily_report,
    PerformanceSummary, Recommendation, ReportOptions, DEFAULT_REPORT_TITLE,
};
use waio_insight::records::{load_visits, load_visits_with_stats};
use waio_insight::{build_comparison, compare, effect_size, CrawlerKind, VisitRecord};

/// Writes visits as a JSON array to a temporary file
fn write_visits(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write visits");
    file.flush().expect("Failed to flush visits");
    file
}

/// Deterministic traffic resembling a day of crawler visits
fn daily_traffic() -> Vec<VisitRecord> {
    let mut visits = Vec::new();
    for i in 0..60 {
        let jitter = ((i * 7) % 11) as f64 - 5.0;
        visits.push(VisitRecord::timed("Googlebot", 120.0 + jitter * 3.0).with_path("/blog/post-1"));
    }
    for i in 0..40 {
        let jitter = ((i * 5) % 9) as f64 - 4.0;
        visits.push(VisitRecord::timed("GPTBot", 45.0 + jitter * 2.0).with_path("/products/123"));
    }
    for i in 0..15 {
        visits.push(VisitRecord::timed("Bingbot", 200.0 + i as f64).with_path("/"));
    }
    visits
}

#[test]
fn test_report_from_visits_file() {
    let file = write_visits(
        r#"[
            {"crawler": "Googlebot", "response_time": 120, "path": "/blog/post-1"},
            {"crawler": "Googlebot", "response_time": 130},
            {"crawler": "Googlebot", "response_time": 125},
            {"crawler": "GPTBot", "response_time": 45},
            {"crawler": "GPTBot", "response_time": 50},
            {"crawler": "GPTBot", "response_time": 48}
        ]"#,
    );

    let visits = load_visits(file.path()).expect("Failed to load visits");
    let report = build_daily_report(&visits);

    assert_eq!(report.total_visits, 6);
    assert_eq!(
        report.crawler_counts,
        vec![("Googlebot".to_string(), 3), ("GPTBot".to_string(), 3)]
    );
    assert_eq!(report.comparison.mean_a, 125.0);
    assert!((report.comparison.mean_b - 47.67).abs() < 0.01);
    assert!(report.comparison.significant);

    let date = NaiveDate::from_ymd_opt(2023, 10, 27).unwrap();
    let text = render_daily_report(&report, DEFAULT_REPORT_TITLE, date);
    assert!(text.contains("Date: 2023-10-27\n"));
    assert!(text.contains("Statistically Significant Diff: YES"));
}

#[test]
fn test_malformed_visits_are_counted_but_not_timed() {
    let file = write_visits(
        "{\"crawler\": \"Googlebot\", \"response_time\": 120}\n\
         {\"crawler\": \"Googlebot\", \"response_time\": \"n/a\"}\n\
         {\"user_agent\": \"Mozilla/5.0 (compatible; bingbot/2.0)\", \"response_time\": 210}\n\
         garbage\n",
    );

    let (visits, stats) = load_visits_with_stats(file.path()).expect("Failed to load visits");
    assert_eq!(stats.records, 3);
    assert_eq!(stats.skipped_entries, 1);
    assert_eq!(stats.dropped_response_times, 1);

    let report = build_daily_report(&visits);
    assert_eq!(report.total_visits, 3);
    assert_eq!(report.count_for("Googlebot"), Some(2));
    assert_eq!(report.count_for("Bingbot"), Some(1));
    assert_eq!(report.avg_response_time, 165.0);
}

#[test]
fn test_full_day_report() {
    let visits = daily_traffic();
    let report = build_daily_report(&visits);

    assert_eq!(report.total_visits, 115);
    let total: u64 = report.crawler_counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total, 115);

    assert!(report.comparison.significant);
    assert!(report.comparison.effect_size > 0.0);
    assert_eq!(
        report.recommendations,
        vec![
            Recommendation::InvestigateDisparity.message().to_string(),
            Recommendation::NormalTraffic.message().to_string(),
        ]
    );

    let stats = compute_statistics(&visits);
    assert_eq!(stats.per_crawler[0].crawler, "Googlebot");
    assert_eq!(stats.per_crawler[2].crawler, "Bingbot");

    // Googlebot + Bingbot are search engines, GPTBot is an LLM crawler
    assert_eq!(stats.per_kind[0].kind, CrawlerKind::SearchEngine);
    assert_eq!(stats.per_kind[0].visits, 75);
    assert_eq!(stats.per_kind[1].kind, CrawlerKind::Llm);
    assert_eq!(stats.per_kind[1].visits, 40);

    let paths: Vec<(&str, u64)> = stats
        .per_path
        .iter()
        .map(|p| (p.path.as_str(), p.visits))
        .collect();
    assert_eq!(
        paths,
        vec![("/blog/post-1", 60), ("/products/123", 40), ("/", 15)]
    );
}

#[test]
fn test_visit_with_both_crawler_fields_is_counted() {
    let file = write_visits(
        r#"[
            {"crawler": "Googlebot", "crawler_id": "Googlebot", "response_time": 120},
            {"crawler": "GPTBot", "response_time": 1e400},
            {"crawler": "GPTBot", "response_time": 45}
        ]"#,
    );

    let (visits, stats) = load_visits_with_stats(file.path()).expect("Failed to load visits");

    assert_eq!(visits.len(), 2);
    assert_eq!(stats.skipped_entries, 1);
    assert_eq!(visits[0].crawler_id, "Googlebot");
    assert_eq!(visits[0].response_time, Some(120.0));
}

#[test]
fn test_configured_comparison_pair() {
    let config = parse_config(
        r#"
[input]
visits-path = "visits.json"

[comparison]
group-a = "Bingbot"
group-b = "Googlebot"

[report]
title = "BING VS GOOGLE"
low-traffic-threshold = 500
"#,
    )
    .expect("Failed to parse config");

    let options = ReportOptions::from_config(&config);
    let report = build_daily_report_with(&daily_traffic(), &options);

    assert_eq!(report.comparison.group_a_label, "Bingbot");
    assert!(report.comparison.mean_a > report.comparison.mean_b);
    assert!(report
        .recommendations
        .contains(&Recommendation::LowTraffic.message().to_string()));

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let text = render_daily_report(&report, &options.title, date);
    assert!(text.contains("BING VS GOOGLE\n"));
    assert!(text.contains("Bingbot vs Googlebot:\n"));

    let summary = PerformanceSummary::from(&report.comparison);
    assert_eq!(summary.comparison, "Bingbot vs Googlebot");
}

#[test]
fn test_statistical_properties() {
    let a = [120.0, 130.0, 125.0];
    let b = [45.0, 50.0, 48.0];

    let result = compare(&a, &b);
    assert!(result.significant);
    assert!(result.p_value < 0.05);

    assert_eq!(effect_size(&a, &b), -effect_size(&b, &a));
    assert_eq!(effect_size(&[4.0, 4.0, 4.0], &[4.0, 4.0, 4.0]), 0.0);

    let degenerate = compare(&[1.0], &b);
    assert_eq!(degenerate.t_stat, 0.0);
    assert_eq!(degenerate.p_value, 1.0);
    assert!(!degenerate.significant);
    assert_eq!(effect_size(&[1.0], &b), 0.0);
}

#[test]
fn test_empty_input_pipeline() {
    let file = write_visits("[]");
    let visits = load_visits(file.path()).expect("Failed to load visits");

    let report = build_daily_report(&visits);
    assert_eq!(report.total_visits, 0);
    assert_eq!(report.avg_response_time, 0.0);
    assert!(report
        .recommendations
        .contains(&Recommendation::NoTraffic.message().to_string()));

    let comparison = build_comparison(&visits, "Googlebot", "GPTBot");
    assert_eq!(comparison.p_value, 1.0);
    assert_eq!(comparison.effect_size, 0.0);
}
