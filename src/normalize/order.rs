//! Listing order and the per-platform cap on completed contests.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{ContestStatus, NormalizedContest};

/// Sort bucket for a status. A missing status sorts with upcoming contests.
pub fn status_bucket(status: Option<ContestStatus>) -> u8 {
    match status {
        Some(ContestStatus::Ongoing) => 0,
        Some(ContestStatus::Upcoming) | None => 1,
        Some(ContestStatus::Completed) => 2,
    }
}

/// Compare two contests for display.
///
/// Ongoing before upcoming before completed. Ongoing and upcoming contests
/// run soonest start first, completed ones most recent start first.
pub fn compare_contests(a: &NormalizedContest, b: &NormalizedContest) -> Ordering {
    let bucket_a = status_bucket(Some(a.status));
    let bucket_b = status_bucket(Some(b.status));
    bucket_a.cmp(&bucket_b).then_with(|| {
        if a.status == ContestStatus::Completed {
            b.start_instant.cmp(&a.start_instant)
        } else {
            a.start_instant.cmp(&b.start_instant)
        }
    })
}

/// Order contests for display. Stable: equal keys keep their input order.
pub fn sort_contests(mut contests: Vec<NormalizedContest>) -> Vec<NormalizedContest> {
    contests.sort_by(compare_contests);
    contests
}

/// Keep at most `per_platform` completed contests for each platform.
///
/// Ongoing and upcoming contests are untouched and order is preserved, so on a
/// sorted listing this keeps the most recent completed contests. Platforms are
/// compared case-insensitively. A cap of zero disables the limit.
pub fn limit_completed_per_platform(
    contests: Vec<NormalizedContest>,
    per_platform: usize,
) -> Vec<NormalizedContest> {
    if per_platform == 0 {
        return contests;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    contests
        .into_iter()
        .filter(|contest| {
            if contest.status != ContestStatus::Completed {
                return true;
            }
            let count = seen.entry(contest.platform().to_lowercase()).or_insert(0);
            *count += 1;
            *count <= per_platform
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContestRecord;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
    }

    fn contest(name: &str, platform: &str, status: ContestStatus, offset_h: i64) -> NormalizedContest {
        let start = base() + Duration::hours(offset_h);
        NormalizedContest {
            record: ContestRecord::from_value(json!({"name": name, "platform": platform, "id": name}))
                .unwrap(),
            start_instant: start,
            end_instant: start + Duration::hours(2),
            status,
            degraded: false,
        }
    }

    fn names(contests: &[NormalizedContest]) -> Vec<&str> {
        contests.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_status_bucket() {
        assert_eq!(status_bucket(Some(ContestStatus::Ongoing)), 0);
        assert_eq!(status_bucket(Some(ContestStatus::Upcoming)), 1);
        assert_eq!(status_bucket(None), 1);
        assert_eq!(status_bucket(Some(ContestStatus::Completed)), 2);
    }

    #[test]
    fn test_sort_bucket_order() {
        let sorted = sort_contests(vec![
            contest("done", "codeforces", ContestStatus::Completed, -10),
            contest("soon", "codeforces", ContestStatus::Upcoming, 5),
            contest("live", "codeforces", ContestStatus::Ongoing, -1),
        ]);
        assert_eq!(names(&sorted), vec!["live", "soon", "done"]);
    }

    #[test]
    fn test_sort_within_buckets() {
        let sorted = sort_contests(vec![
            contest("up-late", "leetcode", ContestStatus::Upcoming, 48),
            contest("done-old", "leetcode", ContestStatus::Completed, -72),
            contest("live-late", "leetcode", ContestStatus::Ongoing, -1),
            contest("up-early", "leetcode", ContestStatus::Upcoming, 3),
            contest("done-recent", "leetcode", ContestStatus::Completed, -5),
            contest("live-early", "leetcode", ContestStatus::Ongoing, -2),
        ]);
        assert_eq!(
            names(&sorted),
            vec!["live-early", "live-late", "up-early", "up-late", "done-recent", "done-old"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let sorted = sort_contests(vec![
            contest("first", "codechef", ContestStatus::Ongoing, -1),
            contest("second", "codeforces", ContestStatus::Ongoing, -1),
            contest("third", "leetcode", ContestStatus::Ongoing, -1),
        ]);
        assert_eq!(names(&sorted), vec!["first", "second", "third"]);

        let sorted = sort_contests(vec![
            contest("b", "codechef", ContestStatus::Completed, -4),
            contest("a", "codechef", ContestStatus::Completed, -4),
        ]);
        assert_eq!(names(&sorted), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let input = vec![
            contest("c", "codechef", ContestStatus::Completed, -8),
            contest("u", "codechef", ContestStatus::Upcoming, 8),
            contest("o2", "codechef", ContestStatus::Ongoing, -1),
            contest("o1", "codechef", ContestStatus::Ongoing, -1),
            contest("c2", "codechef", ContestStatus::Completed, -3),
        ];
        let once = sort_contests(input);
        let twice = sort_contests(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_contests(Vec::new()).is_empty());
    }

    #[test]
    fn test_limit_completed_per_platform() {
        let sorted = sort_contests(vec![
            contest("cf-1", "Codeforces", ContestStatus::Completed, -1),
            contest("cf-2", "codeforces", ContestStatus::Completed, -2),
            contest("cf-3", "codeforces", ContestStatus::Completed, -3),
            contest("lc-1", "leetcode", ContestStatus::Completed, -4),
            contest("cf-up", "codeforces", ContestStatus::Upcoming, 4),
        ]);
        let limited = limit_completed_per_platform(sorted, 2);
        assert_eq!(names(&limited), vec!["cf-up", "cf-1", "cf-2", "lc-1"]);
    }

    #[test]
    fn test_limit_zero_disables_cap() {
        let contests = vec![
            contest("a", "leetcode", ContestStatus::Completed, -1),
            contest("b", "leetcode", ContestStatus::Completed, -2),
        ];
        assert_eq!(limit_completed_per_platform(contests.clone(), 0), contests);
    }
}
