//! Start/end resolution for heterogeneous contest records.
//!
//! Every resolver is total: missing or malformed fields fall back to a default
//! and the result is flagged as degraded instead of failing.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::duration::{try_parse_duration, DEFAULT_DURATION_MS};
use crate::models::{ContestRecord, DURATION_KEYS, END_KEYS, START_KEYS};

/// A resolved value and whether it came from a fallback default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub degraded: bool,
}

impl<T> Resolved<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            degraded: false,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            degraded: true,
        }
    }
}

/// Start and end of a contest, resolved together so the start is read once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimes {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub degraded: bool,
}

/// Resolve the start instant, falling back to the current time.
pub fn resolve_start(record: &ContestRecord) -> DateTime<Utc> {
    resolve_start_at(record, Utc::now()).value
}

/// Resolve the end instant, falling back to start + 2 hours.
pub fn resolve_end(record: &ContestRecord) -> DateTime<Utc> {
    resolve_end_at(record, Utc::now()).value
}

/// Resolve the start instant; `now` is the fallback when no start parses.
///
/// Only the first present start key is considered. If its value does not parse
/// the later keys are not consulted.
pub fn resolve_start_at(record: &ContestRecord, now: DateTime<Utc>) -> Resolved<DateTime<Utc>> {
    match record.first_present(START_KEYS).and_then(parse_instant) {
        Some(start) => Resolved::exact(start),
        None => Resolved::fallback(now),
    }
}

/// Resolve the end instant; `now` feeds the start fallback.
pub fn resolve_end_at(record: &ContestRecord, now: DateTime<Utc>) -> Resolved<DateTime<Utc>> {
    end_from_start(record, resolve_start_at(record, now))
}

/// Resolve both instants for a record.
pub fn resolve_times(record: &ContestRecord, now: DateTime<Utc>) -> ResolvedTimes {
    let start = resolve_start_at(record, now);
    let end = end_from_start(record, start);

    ResolvedTimes {
        start: start.value,
        end: end.value,
        degraded: start.degraded || end.degraded,
    }
}

fn end_from_start(record: &ContestRecord, start: Resolved<DateTime<Utc>>) -> Resolved<DateTime<Utc>> {
    if let Some(end) = direct_end(record) {
        return Resolved::exact(end);
    }

    let duration = resolve_duration_ms(record);
    match add_millis(start.value, duration.value) {
        Some(end) => Resolved {
            value: end,
            degraded: start.degraded || duration.degraded,
        },
        None => Resolved::fallback(default_end(start.value)),
    }
}

/// Resolve the contest duration in milliseconds.
///
/// Numbers are taken as milliseconds unchanged; strings go through the
/// duration parser. Absent or unusable values give the 2 hour default.
pub fn resolve_duration_ms(record: &ContestRecord) -> Resolved<u64> {
    let Some(value) = record.first_present(DURATION_KEYS) else {
        return Resolved::fallback(DEFAULT_DURATION_MS);
    };

    let parsed = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|ms| ms.max(0) as u64))
            .or_else(|| {
                n.as_f64()
                    .filter(|ms| ms.is_finite())
                    .map(|ms| ms.max(0.0).round() as u64)
            }),
        Value::String(s) => try_parse_duration(s),
        _ => None,
    };

    match parsed {
        Some(ms) => Resolved::exact(ms),
        None => Resolved::fallback(DEFAULT_DURATION_MS),
    }
}

/// First end key whose value parses as a timestamp.
///
/// Under `duration` only date strings count; numbers there are lengths.
fn direct_end(record: &ContestRecord) -> Option<DateTime<Utc>> {
    END_KEYS.iter().find_map(|key| {
        let value = record.get(key)?;
        if *key == "duration" {
            value.as_str().and_then(parse_datetime_str)
        } else {
            parse_instant(value)
        }
    })
}

/// Parse a JSON value as an instant: numbers are epoch milliseconds,
/// strings are date/time text.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let ms = n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })?;
            Utc.timestamp_millis_opt(ms).single()
        }
        Value::String(s) => parse_datetime_str(s),
        _ => None,
    }
}

/// Parse date/time text in the layouts upstream platforms use.
///
/// Naive layouts are read as UTC. Bare digit strings are rejected.
pub fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() || s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn add_millis(start: DateTime<Utc>, ms: u64) -> Option<DateTime<Utc>> {
    let ms = i64::try_from(ms).ok()?;
    start.checked_add_signed(Duration::try_milliseconds(ms)?)
}

fn default_end(start: DateTime<Utc>) -> DateTime<Utc> {
    add_millis(start, DEFAULT_DURATION_MS).unwrap_or(start)
}
