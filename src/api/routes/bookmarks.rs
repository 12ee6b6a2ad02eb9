use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::bookmarks::{BookmarkAction, Bookmarks};
use crate::models::ContestRecord;

#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub ids: Vec<String>,
    pub contests: Vec<ContestRecord>,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    pub action: BookmarkAction,
    /// Snapshot of the contest as it was listed
    pub contest: ContestRecord,
}

#[derive(Debug, Serialize)]
pub struct BookmarkUpdateResponse {
    pub ids: Vec<String>,
    pub changed: bool,
}

pub async fn list_bookmarks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<BookmarkListResponse> {
    let bookmarks = Bookmarks::from_headers(&headers, &state.config.bookmarks.cookie_name);
    Json(BookmarkListResponse {
        ids: bookmarks.ids(),
        contests: bookmarks.into_contests(),
    })
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BookmarkRequest>,
) -> Result<(HeaderMap, Json<BookmarkUpdateResponse>), ApiError> {
    let cookie = &state.config.bookmarks;
    let mut bookmarks = Bookmarks::from_headers(&headers, &cookie.cookie_name);

    let changed = bookmarks
        .apply(request.action, request.contest)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    info!(
        "Bookmark {:?}: changed={}, now {} bookmarked",
        request.action,
        changed,
        bookmarks.len()
    );

    let mut response_headers = HeaderMap::new();
    bookmarks.write_cookie(&mut response_headers, &cookie.cookie_name, cookie.max_age_days);

    Ok((
        response_headers,
        Json(BookmarkUpdateResponse {
            ids: bookmarks.ids(),
            changed,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::bookmarks::Bookmarks;
    use crate::config::AppConfig;
    use crate::fetch::SourceSet;
    use crate::models::ContestRecord;
    use axum::body::Body;
    use axum::http::{header::SET_COOKIE, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> axum::Router {
        build_router(AppState::new(AppConfig::default(), SourceSet::default()))
    }

    fn cookie_for(values: Vec<Value>) -> String {
        let records = values
            .into_iter()
            .map(|v| ContestRecord::from_value(v).unwrap())
            .collect();
        format!("bookmarks={}", Bookmarks::new(records).to_cookie_value())
    }

    async fn get_json(app: axum::Router, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let resp = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    /// POST returning status, body and the `Set-Cookie` header if any.
    async fn post_json(
        app: axum::Router,
        uri: &str,
        body: &str,
        cookie: Option<&str>,
    ) -> (StatusCode, Value, Option<String>) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let resp = app
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let set_cookie = resp
            .headers()
            .get(SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json, set_cookie)
    }

    /// Turn a `Set-Cookie` value into the `Cookie` header a browser would send back.
    fn echo_cookie(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_list_bookmarks_empty() {
        let (status, json) = get_json(app(), "/api/bookmarks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ids"], json!([]));
        assert_eq!(json["contests"], json!([]));
    }

    #[tokio::test]
    async fn test_list_bookmarks_from_cookie() {
        let cookie = cookie_for(vec![
            json!({"id": 2062, "name": "Codeforces Round 1001", "platform": "codeforces"}),
            json!({"name": "Weekly Contest 430", "platform": "leetcode"}),
        ]);
        let (status, json) = get_json(app(), "/api/bookmarks", Some(&cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ids"], json!(["2062", "Weekly Contest 430"]));
        assert_eq!(json["contests"][0]["id"], 2062);
        assert_eq!(json["contests"][1]["platform"], "leetcode");
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let add = json!({
            "action": "add",
            "contest": {"id": "START170", "name": "Starters 170", "platform": "codechef"}
        })
        .to_string();
        let (status, json, set_cookie) = post_json(app(), "/api/bookmark", &add, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ids"], json!(["START170"]));
        assert_eq!(json["changed"], true);

        let set_cookie = set_cookie.unwrap();
        assert!(set_cookie.starts_with("bookmarks="));
        assert!(set_cookie.contains("Max-Age=31536000"));
        let cookie = echo_cookie(&set_cookie);

        // Adding again is a no-op
        let (_, json, _) = post_json(app(), "/api/bookmark", &add, Some(&cookie)).await;
        assert_eq!(json["ids"], json!(["START170"]));
        assert_eq!(json["changed"], false);

        let (_, listed) = get_json(app(), "/api/bookmarks", Some(&cookie)).await;
        assert_eq!(listed["contests"][0]["name"], "Starters 170");

        let remove = json!({"action": "remove", "contest": {"id": "START170"}}).to_string();
        let (status, json, set_cookie) =
            post_json(app(), "/api/bookmark", &remove, Some(&cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ids"], json!([]));
        assert_eq!(json["changed"], true);
        assert!(set_cookie.unwrap().starts_with("bookmarks=%5B%5D"));
    }

    #[tokio::test]
    async fn test_bookmark_without_id_is_bad_request() {
        let body = json!({"action": "add", "contest": {"platform": "codechef"}}).to_string();
        let (status, json, set_cookie) = post_json(app(), "/api/bookmark", &body, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(set_cookie.is_none());
    }

    #[tokio::test]
    async fn test_unknown_action_is_rejected() {
        let body = json!({"action": "toggle", "contest": {"id": "x"}}).to_string();
        let (status, _, _) = post_json(app(), "/api/bookmark", &body, None).await;
        assert!(status.is_client_error());
    }
}
