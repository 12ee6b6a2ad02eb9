//! Listing assembly: source selection, fetching and the normalization pipeline.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::bookmarks::Bookmarks;
use crate::fetch::SourceSet;
use crate::models::{NormalizedContest, PlatformSelector};
use crate::normalize::{build_listing, filter_by_platform, ListingOptions};

/// What the caller asked to see.
#[derive(Debug, Clone, Default)]
pub struct ListingRequest<'a> {
    pub selector: PlatformSelector,
    pub query: Option<&'a str>,
    /// Completed contests kept per platform; zero keeps all
    pub completed_per_platform: usize,
}

/// Gather records for the selector and run them through the pipeline.
///
/// The bookmarks selector lists the stored snapshots instead of fetching.
pub async fn collect_listing(
    sources: &SourceSet,
    bookmarks: &Bookmarks,
    request: &ListingRequest<'_>,
    now: DateTime<Utc>,
) -> Vec<NormalizedContest> {
    let records = match request.selector {
        PlatformSelector::Bookmarks => vec![bookmarks.contests().to_vec()],
        PlatformSelector::All => sources.fetch_platforms(&request.selector.platforms()).await,
        PlatformSelector::Only(platform) => sources
            .fetch_platforms(&[platform])
            .await
            .into_iter()
            .map(|records| filter_by_platform(records, platform))
            .collect(),
    };

    let options = ListingOptions {
        query: request.query,
        completed_per_platform: request.completed_per_platform,
    };
    let listing = build_listing(records, now, &options);
    info!(
        "Listing for {} has {} contests",
        request.selector.label(),
        listing.len()
    );
    listing
}
