//! Response-time sample extraction

use crate::records::VisitRecord;

/// Collects the response times recorded for one crawler
///
/// Visits without a response time are skipped. Order follows the input.
pub fn extract_response_times(records: &[VisitRecord], crawler_id: &str) -> Vec<f64> {
    records
        .iter()
        .filter(|visit| visit.crawler_id == crawler_id)
        .filter_map(|visit| visit.response_time)
        .collect()
}

/// Collects every recorded response time, regardless of crawler
pub fn timed_response_times(records: &[VisitRecord]) -> Vec<f64> {
    records
        .iter()
        .filter_map(|visit| visit.response_time)
        .collect()
}
