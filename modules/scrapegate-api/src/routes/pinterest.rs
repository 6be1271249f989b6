use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use scrapegate_common::Platform;
use scrapegate_platforms::pinterest::DEFAULT_RESULTS;

use super::scrape_route;
use crate::error::{required, respond};
use crate::extract::Query;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/board", get(board))
        .route("/profile", get(profile))
        .route("/search", get(search))
        .route("/pin", get(pin))
        .route("/scrape", scrape_route(Platform::Pinterest))
}

#[derive(Deserialize)]
pub struct UrlQuery {
    url: Option<String>,
    limit: Option<u32>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    limit: Option<u32>,
}

async fn board(State(state): State<Arc<AppState>>, Query(params): Query<UrlQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.pinterest.scrape_board(&url, limit).await,
        "pinterest board",
    )
}

async fn profile(State(state): State<Arc<AppState>>, Query(params): Query<UrlQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.pinterest.scrape_profile(&url, limit).await,
        "pinterest profile",
    )
}

async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Response {
    let q = match required(params.q, "q") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(state.services.pinterest.search(&q, limit).await, "pinterest search")
}

async fn pin(State(state): State<Arc<AppState>>, Query(params): Query<UrlQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    respond(state.services.pinterest.get_pin(&url).await, "pinterest pin")
}
