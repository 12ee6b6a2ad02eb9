//! Normalized contest model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ContestRecord, ContestStatus};

/// Keys owned by normalization and the listing view; upstream values under
/// these keys are dropped.
pub const DERIVED_KEYS: &[&str] = &[
    "status",
    "startInstant",
    "endInstant",
    "degraded",
    "bookmarked",
];

/// A contest record with its resolved instants and derived status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedContest {
    #[serde(flatten)]
    pub record: ContestRecord,

    /// Resolved absolute start time
    pub start_instant: DateTime<Utc>,

    /// Resolved absolute end time
    pub end_instant: DateTime<Utc>,

    pub status: ContestStatus,

    /// Whether any field fell back to a default during resolution
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl NormalizedContest {
    pub fn name(&self) -> &str {
        self.record.name()
    }

    pub fn platform(&self) -> &str {
        self.record.platform()
    }

    pub fn id(&self) -> Option<String> {
        self.record.id()
    }

    pub fn bookmark_id(&self) -> Option<String> {
        self.record.bookmark_id()
    }
}
