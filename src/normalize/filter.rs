//! Free-text search and platform pre-filtering.

use crate::models::{ContestRecord, NormalizedContest, Platform};

/// Keep contests matching a free-text query.
///
/// Name and platform match case-insensitively; the id matches by plain
/// substring. A missing or blank query returns the input unchanged.
pub fn filter_contests(contests: Vec<NormalizedContest>, query: Option<&str>) -> Vec<NormalizedContest> {
    let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
        return contests;
    };

    let needle = query.to_lowercase();
    contests
        .into_iter()
        .filter(|contest| matches_query(&contest.record, query, &needle))
        .collect()
}

/// Whether a record matches `query`; `needle` is the lowercased query.
fn matches_query(record: &ContestRecord, query: &str, needle: &str) -> bool {
    record.name().to_lowercase().contains(needle)
        || record.platform().to_lowercase().contains(needle)
        || record.id().is_some_and(|id| id.contains(query))
}

/// Keep records whose `platform` field equals the platform, ignoring case.
pub fn filter_by_platform(records: Vec<ContestRecord>, platform: Platform) -> Vec<ContestRecord> {
    records
        .into_iter()
        .filter(|record| platform.matches(record.platform()))
        .collect()
}
