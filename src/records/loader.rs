//! Visit file loading
//!
//! Visit files are either a single JSON array of visit objects or one JSON
//! object per line. Entries are loosely typed on disk and validated here.

use crate::detector::identify;
use crate::records::{validate_response_time, IngestResult, VisitRecord, UNKNOWN_CRAWLER};
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;
use std::path::Path;

/// Counters describing what happened during ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Number of visit records produced
    pub records: usize,

    /// Entries that were unparseable or not JSON objects, skipped entirely
    pub skipped_entries: usize,

    /// Visits whose response time was present but malformed
    pub dropped_response_times: usize,
}

/// On-disk shape of a visit, before validation
#[derive(Debug, Default, Deserialize)]
struct RawVisit {
    #[serde(default)]
    crawler: Option<Value>,

    #[serde(default)]
    crawler_id: Option<Value>,

    #[serde(default)]
    user_agent: Option<Value>,

    #[serde(default)]
    response_time: Option<Value>,

    #[serde(default)]
    path: Option<Value>,
}

/// Loads visit records from a JSON or JSON-lines file
///
/// # Arguments
///
/// * `path` - Path to the visits file
///
/// # Returns
///
/// * `Ok(Vec<VisitRecord>)` - Successfully loaded visits
/// * `Err(IngestError)` - The file could not be read or parsed
pub fn load_visits(path: &Path) -> IngestResult<Vec<VisitRecord>> {
    load_visits_with_stats(path).map(|(visits, _)| visits)
}

/// Loads visit records and returns the ingestion counters alongside them
pub fn load_visits_with_stats(path: &Path) -> IngestResult<(Vec<VisitRecord>, IngestStats)> {
    let content = std::fs::read_to_string(path)?;
    let (visits, stats) = parse_visits(&content)?;

    tracing::debug!(
        "Loaded {} visits from {} ({} entries skipped, {} response times dropped)",
        stats.records,
        path.display(),
        stats.skipped_entries,
        stats.dropped_response_times
    );

    Ok((visits, stats))
}

/// Parses visit records from JSON array or JSON-lines text
///
/// Only a broken array structure is an error. Individual entries that fail
/// to parse (in either format) are skipped and counted.
pub fn parse_visits(content: &str) -> IngestResult<(Vec<VisitRecord>, IngestStats)> {
    let trimmed = content.trim_start();
    let mut stats = IngestStats::default();
    let mut entries: Vec<Value> = Vec::new();

    if trimmed.starts_with('[') {
        let raw_entries: Vec<Box<RawValue>> = serde_json::from_str(trimmed)?;
        for (index, raw) in raw_entries.iter().enumerate() {
            match serde_json::from_str::<Value>(raw.get()) {
                Ok(value) => entries.push(value),
                Err(e) => {
                    tracing::warn!("Skipping unparseable visit at index {}: {}", index, e);
                    stats.skipped_entries += 1;
                }
            }
        }
    } else {
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => entries.push(value),
                Err(e) => {
                    tracing::warn!("Skipping unparseable visit on line {}: {}", index + 1, e);
                    stats.skipped_entries += 1;
                }
            }
        }
    }

    let mut visits = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_object() {
            tracing::warn!("Skipping visit entry that is not an object: {}", entry);
            stats.skipped_entries += 1;
            continue;
        }

        let raw: RawVisit = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Skipping malformed visit entry: {}", e);
                stats.skipped_entries += 1;
                continue;
            }
        };

        visits.push(into_visit(raw, &mut stats));
    }

    stats.records = visits.len();
    Ok((visits, stats))
}

/// Validates a raw visit, resolving the crawler identity and dropping a
/// malformed response time
fn into_visit(raw: RawVisit, stats: &mut IngestStats) -> VisitRecord {
    let named = [&raw.crawler, &raw.crawler_id]
        .into_iter()
        .filter_map(|field| field.as_ref().and_then(Value::as_str))
        .map(str::trim)
        .find(|name| !name.is_empty());

    let crawler_id = match named {
        Some(name) => name.to_string(),
        None => match raw.user_agent.as_ref().and_then(Value::as_str) {
            Some(agent) => identify(agent).name.to_string(),
            None => UNKNOWN_CRAWLER.to_string(),
        },
    };

    let response_time = match raw.response_time {
        None => None,
        Some(value) => {
            let validated = value.as_f64().and_then(validate_response_time);
            if validated.is_none() {
                tracing::warn!(
                    "Dropping malformed response time {} for {}",
                    value,
                    crawler_id
                );
                stats.dropped_response_times += 1;
            }
            validated
        }
    };

    let path = raw
        .path
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string);

    VisitRecord {
        crawler_id,
        response_time,
        path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_json_array() {
        let content = r#"[
            {"crawler": "Googlebot", "response_time": 120, "path": "/blog/post-1"},
            {"crawler": "GPTBot", "response_time": 45.5}
        ]"#;

        let (visits, stats) = parse_visits(content).unwrap();

        assert_eq!(visits.len(), 2);
        assert_eq!(stats.records, 2);
        assert_eq!(visits[0], VisitRecord::timed("Googlebot", 120.0).with_path("/blog/post-1"));
        assert_eq!(visits[1], VisitRecord::timed("GPTBot", 45.5));
    }

    #[test]
    fn test_parse_json_lines() {
        let content = "{\"crawler_id\": \"Bingbot\", \"response_time\": 200}\n\n{\"crawler\": \"GPTBot\"}\n";

        let (visits, stats) = parse_visits(content).unwrap();

        assert_eq!(visits.len(), 2);
        assert_eq!(stats.skipped_entries, 0);
        assert_eq!(visits[0].crawler_id, "Bingbot");
        assert_eq!(visits[1], VisitRecord::new("GPTBot", None));
    }

    #[test]
    fn test_json_lines_skips_bad_lines() {
        let content = "{\"crawler\": \"Googlebot\", \"response_time\": 120}\nnot json\n42\n";

        let (visits, stats) = parse_visits(content).unwrap();

        assert_eq!(visits.len(), 1);
        assert_eq!(stats.skipped_entries, 2);
    }

    #[test]
    fn test_malformed_array_is_error() {
        assert!(parse_visits("[{\"crawler\": \"Googlebot\"").is_err());
    }

    #[test]
    fn test_malformed_response_time_is_dropped_but_visit_kept() {
        let content = r#"[
            {"crawler": "Googlebot", "response_time": "fast"},
            {"crawler": "Googlebot", "response_time": -5},
            {"crawler": "Googlebot", "response_time": null}
        ]"#;

        let (visits, stats) = parse_visits(content).unwrap();

        assert_eq!(visits.len(), 3);
        assert!(visits.iter().all(|v| v.response_time.is_none()));
        assert_eq!(stats.dropped_response_times, 2);
    }

    #[test]
    fn test_crawler_resolved_from_user_agent() {
        let content = r#"[
            {"user_agent": "Mozilla/5.0 (compatible; GPTBot/1.0; +https://openai.com/gptbot)"},
            {"user_agent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64)"},
            {"response_time": 10}
        ]"#;

        let (visits, _) = parse_visits(content).unwrap();

        assert_eq!(visits[0].crawler_id, "GPTBot");
        assert_eq!(visits[1].crawler_id, UNKNOWN_CRAWLER);
        assert_eq!(visits[2].crawler_id, UNKNOWN_CRAWLER);
    }

    #[test]
    fn test_explicit_crawler_wins_over_user_agent() {
        let content = r#"[{"crawler": "Googlebot", "user_agent": "GPTBot/1.0"}]"#;
        let (visits, _) = parse_visits(content).unwrap();
        assert_eq!(visits[0].crawler_id, "Googlebot");
    }

    #[test]
    fn test_crawler_and_crawler_id_together_keep_visit() {
        let content = r#"[
            {"crawler": "Googlebot", "crawler_id": "Googlebot", "response_time": 120},
            {"crawler": "", "crawler_id": "GPTBot", "response_time": 45},
            {"crawler": 7, "crawler_id": "Bingbot"}
        ]"#;

        let (visits, stats) = parse_visits(content).unwrap();

        assert_eq!(stats.skipped_entries, 0);
        assert_eq!(visits.len(), 3);
        assert_eq!(visits[0], VisitRecord::timed("Googlebot", 120.0));
        assert_eq!(visits[1], VisitRecord::timed("GPTBot", 45.0));
        assert_eq!(visits[2].crawler_id, "Bingbot");
    }

    #[test]
    fn test_array_skips_unparseable_entry() {
        let content = r#"[
            {"crawler": "Googlebot", "response_time": 120},
            {"crawler": "Googlebot", "response_time": 1e400},
            "not a visit",
            {"crawler": "GPTBot", "response_time": 45}
        ]"#;

        let (visits, stats) = parse_visits(content).unwrap();

        assert_eq!(visits.len(), 2);
        assert_eq!(stats.skipped_entries, 2);
        assert_eq!(visits[1].crawler_id, "GPTBot");
    }

    #[test]
    fn test_empty_input() {
        let (visits, stats) = parse_visits("").unwrap();
        assert!(visits.is_empty());
        assert_eq!(stats, IngestStats::default());
    }

    #[test]
    fn test_load_visits_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"crawler": "Googlebot", "response_time": 120}]"#)
            .unwrap();
        file.flush().unwrap();

        let visits = load_visits(file.path()).unwrap();
        assert_eq!(visits, vec![VisitRecord::timed("Googlebot", 120.0)]);
    }

    #[test]
    fn test_load_visits_missing_file() {
        assert!(load_visits(Path::new("/nonexistent/visits.json")).is_err());
    }
}
