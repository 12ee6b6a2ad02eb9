//! Display status of a contest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a contest sits relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Ongoing,
    Upcoming,
    Completed,
}

impl ContestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContestStatus::Ongoing => "ongoing",
            ContestStatus::Upcoming => "upcoming",
            ContestStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of contests per status in a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub ongoing: u32,
    pub upcoming: u32,
    pub completed: u32,
}

impl StatusCounts {
    pub fn from_statuses(statuses: impl IntoIterator<Item = ContestStatus>) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                ContestStatus::Ongoing => counts.ongoing += 1,
                ContestStatus::Upcoming => counts.upcoming += 1,
                ContestStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    /// Contests still open for participation (ongoing + upcoming).
    pub fn active(&self) -> u32 {
        self.ongoing + self.upcoming
    }

    pub fn total(&self) -> u32 {
        self.ongoing + self.upcoming + self.completed
    }
}
