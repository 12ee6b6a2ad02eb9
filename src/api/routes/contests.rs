use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::bookmarks::Bookmarks;
use crate::listing::{collect_listing, ListingRequest};
use crate::models::{NormalizedContest, PlatformSelector, StatusCounts};

#[derive(Debug, Deserialize)]
pub struct ListContestsParams {
    /// Platform slug, "all platforms" or "bookmarks"
    pub platform: Option<String>,
    /// Free-text search over name, platform and id
    pub contest: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContestView {
    #[serde(flatten)]
    pub contest: NormalizedContest,
    pub bookmarked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestListResponse {
    pub platform: String,
    pub is_bookmarks_page: bool,
    pub counts: StatusCounts,
    pub contests: Vec<ContestView>,
}

pub async fn list_contests(
    State(state): State<AppState>,
    Query(params): Query<ListContestsParams>,
    headers: HeaderMap,
) -> Json<ContestListResponse> {
    let selector = PlatformSelector::parse(params.platform.as_deref());
    let bookmarks = Bookmarks::from_headers(&headers, &state.config.bookmarks.cookie_name);

    let request = ListingRequest {
        selector,
        query: params.contest.as_deref(),
        completed_per_platform: state.config.display.completed_per_platform,
    };
    let listing = collect_listing(&state.sources, &bookmarks, &request, Utc::now()).await;

    let counts = StatusCounts::from_statuses(listing.iter().map(|c| c.status));
    let contests = listing
        .into_iter()
        .map(|contest| ContestView {
            bookmarked: bookmarks.is_bookmarked(&contest),
            contest,
        })
        .collect();

    Json(ContestListResponse {
        platform: selector.label().to_string(),
        is_bookmarks_page: selector == PlatformSelector::Bookmarks,
        counts,
        contests,
    })
}
