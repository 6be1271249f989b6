use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use scrapegate_common::Platform;
use scrapegate_platforms::tiktok::{SearchType, DEFAULT_RESULTS};

use super::scrape_route;
use crate::error::{required, respond};
use crate::extract::Query;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hashtag/{hashtag}", get(hashtag))
        .route("/profile/{username}", get(profile))
        .route("/search", get(search))
        .route("/video", get(video))
        .route("/scrape", scrape_route(Platform::Tiktok))
}

#[derive(Deserialize)]
pub struct LimitQuery {
    limit: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    q: Option<String>,
    limit: Option<u32>,
    search_type: Option<SearchType>,
}

#[derive(Deserialize)]
pub struct VideoQuery {
    url: Option<String>,
}

async fn hashtag(
    State(state): State<Arc<AppState>>,
    Path(hashtag): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.tiktok.scrape_hashtag(&hashtag, limit).await,
        "tiktok hashtag",
    )
}

async fn profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.tiktok.scrape_profile(&username, limit).await,
        "tiktok profile",
    )
}

async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Response {
    let q = match required(params.q, "q") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let search_type = params.search_type.unwrap_or(SearchType::Top);
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.tiktok.search(&q, search_type, limit).await,
        "tiktok search",
    )
}

async fn video(State(state): State<Arc<AppState>>, Query(params): Query<VideoQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    respond(state.services.tiktok.get_video(&url).await, "tiktok video")
}
