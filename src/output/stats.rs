//! Per-crawler traffic statistics
//!
//! This module provides an overview of visit volume and response time for
//! every crawler in a visit collection.

use crate::analysis::statistics::mean;
use crate::detector::{classify, CrawlerKind};
use crate::records::VisitRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Number of paths listed by `print_statistics`
pub const TOP_PATHS: usize = 10;

/// Traffic statistics for a single crawler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlerStat {
    pub crawler: String,

    /// Operator of the crawler, "Unknown" when unrecognized
    pub company: &'static str,

    pub kind: CrawlerKind,

    /// Number of visits
    pub visits: u64,

    /// Share of all visits, in percent
    pub share_percent: f64,

    /// Number of visits with a recorded response time
    pub timed_visits: usize,

    /// Mean response time over timed visits (0.0 if none)
    pub mean_response_time: f64,
}

/// Visit volume for one crawler category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindStat {
    pub kind: CrawlerKind,
    pub visits: u64,
    pub share_percent: f64,
}

/// Visit volume for one requested path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStat {
    pub path: String,
    pub visits: u64,

    /// Mean response time over timed visits to this path (0.0 if none)
    pub mean_response_time: f64,
}

/// Traffic statistics summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlerStatistics {
    /// Total number of visits
    pub total_visits: usize,

    /// Visits carrying a response time
    pub timed_visits: usize,

    /// Per-crawler breakdown, busiest crawler first
    pub per_crawler: Vec<CrawlerStat>,

    /// Per-category breakdown, busiest category first
    pub per_kind: Vec<KindStat>,

    /// Per-path breakdown, busiest path first. Visits without a path are
    /// not listed.
    pub per_path: Vec<PathStat>,
}

/// Visits and response-time samples collected for one group
#[derive(Default)]
struct Tally {
    visits: u64,
    response_times: Vec<f64>,
}

impl Tally {
    fn add(&mut self, visit: &VisitRecord) {
        self.visits += 1;
        if let Some(rt) = visit.response_time {
            self.response_times.push(rt);
        }
    }
}

/// Groups visits by key in one pass, keeping first-seen order
fn tally_by<'a, K, F>(records: &'a [VisitRecord], key: F) -> Vec<(K, Tally)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&'a VisitRecord) -> Option<K>,
{
    let mut groups: Vec<(K, Tally)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();
    for visit in records {
        let Some(k) = key(visit) else {
            continue;
        };
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Tally::default()));
            groups.len() - 1
        });
        groups[slot].1.add(visit);
    }
    groups
}

fn share_of(visits: u64, total_visits: usize) -> f64 {
    if total_visits == 0 {
        return 0.0;
    }
    visits as f64 / total_visits as f64 * 100.0
}

/// Computes per-crawler, per-category and per-path statistics
///
/// Groups with equal visit counts keep their first-seen order.
pub fn compute_statistics(records: &[VisitRecord]) -> CrawlerStatistics {
    let total_visits = records.len();
    let timed_visits = records.iter().filter(|v| v.is_timed()).count();

    let mut per_crawler: Vec<CrawlerStat> = tally_by(records, |v| Some(v.crawler_id.as_str()))
        .into_iter()
        .map(|(crawler, tally)| {
            let info = classify(crawler);
            CrawlerStat {
                crawler: crawler.to_string(),
                company: info.company,
                kind: info.kind,
                visits: tally.visits,
                share_percent: share_of(tally.visits, total_visits),
                timed_visits: tally.response_times.len(),
                mean_response_time: mean(&tally.response_times),
            }
        })
        .collect();
    per_crawler.sort_by(|a, b| b.visits.cmp(&a.visits));

    let mut per_kind: Vec<KindStat> = Vec::new();
    for stat in &per_crawler {
        match per_kind.iter_mut().find(|k| k.kind == stat.kind) {
            Some(kind) => kind.visits += stat.visits,
            None => per_kind.push(KindStat {
                kind: stat.kind,
                visits: stat.visits,
                share_percent: 0.0,
            }),
        }
    }
    for kind in &mut per_kind {
        kind.share_percent = share_of(kind.visits, total_visits);
    }
    per_kind.sort_by(|a, b| b.visits.cmp(&a.visits));

    let mut per_path: Vec<PathStat> = tally_by(records, |v| v.path.as_deref())
        .into_iter()
        .map(|(path, tally)| PathStat {
            path: path.to_string(),
            visits: tally.visits,
            mean_response_time: mean(&tally.response_times),
        })
        .collect();
    per_path.sort_by(|a, b| b.visits.cmp(&a.visits));

    CrawlerStatistics {
        total_visits,
        timed_visits,
        per_crawler,
        per_kind,
        per_path,
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlerStatistics) {
    println!("=== Crawler Statistics ===\n");

    println!("Overview:");
    println!("  Total visits: {}", stats.total_visits);
    println!("  Timed visits: {}", stats.timed_visits);
    println!("  Distinct crawlers: {}", stats.per_crawler.len());
    println!();

    if stats.per_crawler.is_empty() {
        println!("No visits recorded.");
        return;
    }

    println!("Visits by Crawler:");
    for stat in &stats.per_crawler {
        println!(
            "  {} ({}, {}): {} ({:.1}%), mean {:.2}ms over {} timed",
            stat.crawler,
            stat.company,
            stat.kind.as_str(),
            stat.visits,
            stat.share_percent,
            stat.mean_response_time,
            stat.timed_visits
        );
    }

    println!("\nVisits by Category:");
    for kind in &stats.per_kind {
        println!(
            "  {}: {} ({:.1}%)",
            kind.kind.as_str(),
            kind.visits,
            kind.share_percent
        );
    }

    if !stats.per_path.is_empty() {
        println!("\nTop Paths:");
        for path in stats.per_path.iter().take(TOP_PATHS) {
            println!(
                "  {}: {} visits, mean {:.2}ms",
                path.path, path.visits, path.mean_response_time
            );
        }
        if stats.per_path.len() > TOP_PATHS {
            println!("  ... and {} more", stats.per_path.len() - TOP_PATHS);
        }
    }
}
