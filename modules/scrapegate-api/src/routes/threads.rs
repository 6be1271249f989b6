use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use scrapegate_common::Platform;
use scrapegate_platforms::threads::DEFAULT_RESULTS;

use super::scrape_route;
use crate::error::{required, respond};
use crate::extract::Query;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile/{username}", get(profile))
        .route("/hashtag/{hashtag}", get(hashtag))
        .route("/search", get(search))
        .route("/thread", get(thread))
        .route("/scrape", scrape_route(Platform::Threads))
}

#[derive(Deserialize)]
pub struct LimitQuery {
    limit: Option<u32>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    limit: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadQuery {
    url: Option<String>,
    include_replies: Option<bool>,
}

async fn profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.threads.scrape_profile(&username, limit).await,
        "threads profile",
    )
}

async fn hashtag(
    State(state): State<Arc<AppState>>,
    Path(hashtag): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.threads.scrape_hashtag(&hashtag, limit).await,
        "threads hashtag",
    )
}

async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Response {
    let q = match required(params.q, "q") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(state.services.threads.search(&q, limit).await, "threads search")
}

async fn thread(State(state): State<Arc<AppState>>, Query(params): Query<ThreadQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let include_replies = params.include_replies.unwrap_or(false);
    respond(
        state.services.threads.get_thread(&url, include_replies).await,
        "threads thread",
    )
}
