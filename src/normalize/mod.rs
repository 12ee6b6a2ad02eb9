//! Contest normalization engine.
//!
//! Turns raw upstream records into an ordered, filtered listing:
//! - Field resolution of start/end instants across upstream naming schemes
//! - Duration parsing for free-form duration strings
//! - Status classification against the current time
//! - Display ordering and free-text filtering
//!
//! Everything here is synchronous and pure apart from reading the clock in the
//! convenience wrappers; callers that need determinism pass `now` explicitly.

pub mod classify;
pub mod duration;
pub mod filter;
pub mod order;
pub mod resolve;

pub use classify::classify;
pub use duration::{parse_duration, try_parse_duration, DEFAULT_DURATION_MS};
pub use filter::{filter_by_platform, filter_contests};
pub use order::{compare_contests, limit_completed_per_platform, sort_contests, status_bucket};
pub use resolve::{
    resolve_duration_ms, resolve_end, resolve_end_at, resolve_start, resolve_start_at,
    resolve_times, Resolved, ResolvedTimes,
};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{ContestRecord, NormalizedContest, DERIVED_KEYS};

/// Attach resolved instants and a status to one record.
pub fn normalize_contest(mut record: ContestRecord, now: DateTime<Utc>) -> NormalizedContest {
    let times = resolve_times(&record, now);
    if times.degraded {
        debug!(
            name = record.name(),
            platform = record.platform(),
            "Contest resolved with fallback defaults"
        );
    }

    for key in DERIVED_KEYS {
        record.remove(key);
    }

    NormalizedContest {
        status: classify(now, times.start, times.end),
        start_instant: times.start,
        end_instant: times.end,
        degraded: times.degraded,
        record,
    }
}

/// Merge records from several sources, in source order, and normalize each.
/// No deduplication is performed.
pub fn normalize_all<I>(sources: I, now: DateTime<Utc>) -> Vec<NormalizedContest>
where
    I: IntoIterator<Item = Vec<ContestRecord>>,
{
    sources
        .into_iter()
        .flatten()
        .map(|record| normalize_contest(record, now))
        .collect()
}

/// Options for building a listing.
#[derive(Debug, Clone, Default)]
pub struct ListingOptions<'a> {
    /// Free-text query over name, platform and id
    pub query: Option<&'a str>,
    /// Completed contests kept per platform; zero keeps all
    pub completed_per_platform: usize,
}

/// Full pipeline: normalize, sort, filter, then cap completed contests.
pub fn build_listing<I>(
    sources: I,
    now: DateTime<Utc>,
    options: &ListingOptions<'_>,
) -> Vec<NormalizedContest>
where
    I: IntoIterator<Item = Vec<ContestRecord>>,
{
    let contests = sort_contests(normalize_all(sources, now));
    let contests = filter_contests(contests, options.query);
    limit_completed_per_platform(contests, options.completed_per_platform)
}
