//! Cookie-backed bookmarks.
//!
//! The browser keeps a JSON array of contest snapshots in a cookie. The server
//! never stores bookmarks itself: it decodes the cookie on each request and
//! hands back an updated value when the list changes.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::models::{ContestRecord, NormalizedContest};

/// Browsers drop cookies larger than this.
pub const MAX_COOKIE_BYTES: usize = 4096;

/// Errors that can occur while changing bookmarks.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("Contest has neither an id nor a name")]
    MissingId,
}

/// Requested bookmark change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkAction {
    Add,
    Remove,
}

/// A user's bookmarked contest snapshots, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bookmarks {
    contests: Vec<ContestRecord>,
}

impl Bookmarks {
    pub fn new(contests: Vec<ContestRecord>) -> Self {
        Self { contests }
    }

    /// Decode a cookie value. Anything malformed reads as no bookmarks.
    pub fn from_cookie_value(raw: &str) -> Self {
        let json = decode_cookie_value(raw);
        match serde_json::from_str::<Vec<serde_json::Value>>(&json) {
            Ok(items) => Self {
                contests: items
                    .into_iter()
                    .filter_map(ContestRecord::from_value)
                    .collect(),
            },
            Err(e) => {
                debug!("Ignoring malformed bookmark cookie: {}", e);
                Self::default()
            }
        }
    }

    /// Read bookmarks from the request's `Cookie` headers.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        read_cookie(headers, cookie_name)
            .map(|raw| Self::from_cookie_value(&raw))
            .unwrap_or_default()
    }

    /// Encode for storage in a cookie.
    pub fn to_cookie_value(&self) -> String {
        let json = serde_json::to_string(&self.contests).unwrap_or_else(|_| "[]".to_string());
        form_urlencoded::byte_serialize(json.as_bytes()).collect()
    }

    pub fn contests(&self) -> &[ContestRecord] {
        &self.contests
    }

    pub fn into_contests(self) -> Vec<ContestRecord> {
        self.contests
    }

    pub fn len(&self) -> usize {
        self.contests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contests.is_empty()
    }

    /// Bookmark ids in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.contests
            .iter()
            .filter_map(ContestRecord::bookmark_id)
            .collect()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.contests
            .iter()
            .any(|c| c.bookmark_id().as_deref() == Some(id))
    }

    /// Whether a listed contest is bookmarked.
    pub fn is_bookmarked(&self, contest: &NormalizedContest) -> bool {
        contest
            .bookmark_id()
            .is_some_and(|id| self.contains_id(&id))
    }

    /// Apply an add or remove. Returns whether the list changed.
    ///
    /// Adding an existing id and removing a missing one are no-ops.
    pub fn apply(
        &mut self,
        action: BookmarkAction,
        contest: ContestRecord,
    ) -> Result<bool, BookmarkError> {
        let id = contest.bookmark_id().ok_or(BookmarkError::MissingId)?;
        match action {
            BookmarkAction::Add => {
                if self.contains_id(&id) {
                    return Ok(false);
                }
                self.contests.push(contest);
                Ok(true)
            }
            BookmarkAction::Remove => {
                let before = self.contests.len();
                self.contests
                    .retain(|c| c.bookmark_id().as_deref() != Some(id.as_str()));
                Ok(self.contests.len() != before)
            }
        }
    }

    /// `Set-Cookie` header carrying these bookmarks.
    pub fn set_cookie_header(&self, cookie_name: &str, max_age_days: u32) -> Option<HeaderValue> {
        let value = self.to_cookie_value();
        if value.len() > MAX_COOKIE_BYTES {
            warn!(
                "Bookmark cookie is {} bytes, browsers may drop it (limit {})",
                value.len(),
                MAX_COOKIE_BYTES
            );
        }
        let max_age = u64::from(max_age_days) * 24 * 60 * 60;
        let cookie = format!("{cookie_name}={value}; Path=/; Max-Age={max_age}; SameSite=Lax");
        HeaderValue::from_str(&cookie).ok()
    }

    /// Insert the `Set-Cookie` header into a response header map.
    pub fn write_cookie(&self, headers: &mut HeaderMap, cookie_name: &str, max_age_days: u32) {
        if let Some(value) = self.set_cookie_header(cookie_name, max_age_days) {
            headers.append(SET_COOKIE, value);
        }
    }
}

/// Value of the named cookie across all `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Undo cookie encoding. Raw JSON is passed through untouched.
fn decode_cookie_value(raw: &str) -> String {
    let raw = raw.trim().trim_matches('"');
    if raw.starts_with('[') {
        return raw.to_string();
    }
    // Percent-decoding via the form decoder: the whole value is one key.
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}
