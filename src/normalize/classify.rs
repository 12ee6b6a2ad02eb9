//! Contest status classification.

use chrono::{DateTime, Utc};

use crate::models::ContestStatus;

/// Classify a contest against `now`. Both boundaries count as ongoing.
pub fn classify(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> ContestStatus {
    if start <= now && now <= end {
        ContestStatus::Ongoing
    } else if now < start {
        ContestStatus::Upcoming
    } else {
        ContestStatus::Completed
    }
}
