//! Raw contest record as delivered by an upstream platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys that may hold the contest start, in lookup order.
pub const START_KEYS: &[&str] = &["startTime", "start_time", "startDate", "start"];

/// Keys that may hold a direct end timestamp, in lookup order.
pub const END_KEYS: &[&str] = &["endTime", "end_time", "endDate", "end", "duration"];

/// Keys that may hold a contest duration, in lookup order.
pub const DURATION_KEYS: &[&str] = &["duration", "durationSeconds", "length"];

/// An upstream contest record with an uncontrolled shape.
///
/// Upstream sources disagree on field names and types, so the record keeps the
/// whole JSON object and exposes lenient accessors instead of a fixed schema.
/// Accessors never fail: a missing or mistyped field reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContestRecord(Map<String, Value>);

impl ContestRecord {
    /// Build a record from an arbitrary JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Contest name, or `""` when absent.
    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or("")
    }

    /// Platform name as reported upstream, or `""` when absent.
    pub fn platform(&self) -> &str {
        self.0.get("platform").and_then(Value::as_str).unwrap_or("")
    }

    /// Contest id rendered as a string. Numeric ids are stringified.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Identifier used for bookmarks: the id when present, otherwise the name.
    pub fn bookmark_id(&self) -> Option<String> {
        self.id().or_else(|| {
            let name = self.name();
            (!name.is_empty()).then(|| name.to_string())
        })
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// First present value among `keys`. Nulls and empty strings count as absent.
    pub fn first_present(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| is_present(value))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
