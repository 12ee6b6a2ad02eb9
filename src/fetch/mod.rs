//! Upstream contest sources.
//!
//! Each platform is served by a JSON endpoint returning an array of contest
//! records. Sources are fetched concurrently and merged in platform order; a
//! failing source contributes nothing rather than failing the whole listing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::UpstreamConfig;
use crate::models::{ContestRecord, Platform};

/// Errors that can occur while fetching a source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array, got {0}")]
    NotAnArray(&'static str),
}

/// A source of contest records for one platform.
#[async_trait]
pub trait ContestSource: Send + Sync {
    /// Platform this source serves.
    fn platform(&self) -> Platform;

    /// Fetch the current contest records.
    async fn fetch(&self) -> Result<Vec<ContestRecord>, FetchError>;
}

/// Configuration for the HTTP sources.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Base URL; each platform is served at `{base_url}/api/{slug}`
    pub base_url: Url,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl TryFrom<&UpstreamConfig> for FetcherConfig {
    type Error = FetchError;

    fn try_from(config: &UpstreamConfig) -> Result<Self, Self::Error> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Build the shared HTTP client.
pub fn build_client(config: &FetcherConfig) -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("contest-tracker/0.1.0")),
    );
    // Upstream listings must come back fresh.
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Ok(Client::builder()
        .timeout(config.timeout)
        .default_headers(headers)
        .build()?)
}

/// Endpoint serving a platform's contests.
pub fn source_url(base_url: &Url, platform: Platform) -> Result<Url, FetchError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(["api", platform.slug()]);
    Ok(url)
}

/// A platform endpoint returning a JSON array of contest records.
pub struct HttpContestSource {
    platform: Platform,
    url: Url,
    client: Client,
}

impl HttpContestSource {
    pub fn new(platform: Platform, url: Url, client: Client) -> Self {
        Self {
            platform,
            url,
            client,
        }
    }
}

#[async_trait]
impl ContestSource for HttpContestSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch(&self) -> Result<Vec<ContestRecord>, FetchError> {
        debug!("Fetching {}", self.url);

        let response = self.client.get(self.url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        records_from_json(value)
    }
}

/// Extract contest records from a response body. Non-object elements are skipped.
pub fn records_from_json(value: Value) -> Result<Vec<ContestRecord>, FetchError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => return Err(FetchError::NotAnArray("object")),
        Value::String(_) => return Err(FetchError::NotAnArray("string")),
        Value::Number(_) => return Err(FetchError::NotAnArray("number")),
        Value::Bool(_) => return Err(FetchError::NotAnArray("boolean")),
        Value::Null => return Err(FetchError::NotAnArray("null")),
    };

    let total = items.len();
    let records: Vec<ContestRecord> = items
        .into_iter()
        .filter_map(ContestRecord::from_value)
        .collect();
    if records.len() < total {
        debug!("Skipped {} non-object entries", total - records.len());
    }
    Ok(records)
}

/// A fixed set of records, for tests and offline runs.
pub struct StaticSource {
    platform: Platform,
    records: Vec<ContestRecord>,
}

impl StaticSource {
    pub fn new(platform: Platform, records: Vec<ContestRecord>) -> Self {
        Self { platform, records }
    }
}

#[async_trait]
impl ContestSource for StaticSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch(&self) -> Result<Vec<ContestRecord>, FetchError> {
        Ok(self.records.clone())
    }
}

/// All configured sources, one per platform.
#[derive(Clone, Default)]
pub struct SourceSet {
    sources: Vec<Arc<dyn ContestSource>>,
}

impl SourceSet {
    pub fn new(sources: Vec<Arc<dyn ContestSource>>) -> Self {
        Self { sources }
    }

    /// HTTP sources for every platform under a common base URL.
    pub fn http(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = build_client(config)?;
        let sources = Platform::ALL
            .into_iter()
            .map(|platform| -> Result<Arc<dyn ContestSource>, FetchError> {
                let url = source_url(&config.base_url, platform)?;
                Ok(Arc::new(HttpContestSource::new(platform, url, client.clone())))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sources })
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Fetch the given platforms concurrently.
    ///
    /// Results come back in the order of `platforms`, one entry per platform.
    /// A failing or missing source yields an empty list.
    pub async fn fetch_platforms(&self, platforms: &[Platform]) -> Vec<Vec<ContestRecord>> {
        let fetches = platforms.iter().map(|platform| self.fetch_one(*platform));
        join_all(fetches).await
    }

    async fn fetch_one(&self, platform: Platform) -> Vec<ContestRecord> {
        let Some(source) = self.sources.iter().find(|s| s.platform() == platform) else {
            warn!("No source configured for {}", platform.slug());
            return Vec::new();
        };

        match source.fetch().await {
            Ok(records) => {
                info!("Fetched {} contests from {}", records.len(), platform.slug());
                records
            }
            Err(e) => {
                warn!("Failed to fetch {} contests: {}", platform.slug(), e);
                Vec::new()
            }
        }
    }
}
