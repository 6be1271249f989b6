use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::Value;

use scrapegate_common::Platform;
use scrapegate_platforms::instagram::{DEFAULT_COMMENTS, DEFAULT_RESULTS, DEFAULT_SEARCH_RESULTS};
use scrapegate_platforms::parse_body;

use super::scrape_route;
use crate::error::{required, respond, ApiError};
use crate::extract::{JsonBody, Query};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile/{username}", get(profile))
        .route("/profiles", post(profiles))
        .route("/posts/{username}", get(user_posts))
        .route("/posts", post(posts))
        .route("/comments", get(post_comments).post(comments))
        .route("/hashtag/{hashtag}", get(hashtag))
        .route("/hashtags", post(hashtags))
        .route("/reels/{username}", get(user_reels))
        .route("/reels", post(reels))
        .route("/post-details", get(post_details).post(post_details_body))
        .route("/search/{kind}", get(search_kind))
        .route("/search", post(search))
        .route("/scrape", scrape_route(Platform::Instagram))
}

#[derive(Deserialize)]
pub struct LimitQuery {
    limit: Option<u32>,
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

// --- Path/query lookups ---

async fn profile(State(state): State<Arc<AppState>>, Path(username): Path<String>) -> Response {
    respond(
        state.services.instagram.get_profile(&username).await,
        "instagram profile",
    )
}

async fn user_posts(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.instagram.get_user_posts(&username, limit).await,
        "instagram posts",
    )
}

async fn post_comments(State(state): State<Arc<AppState>>, Query(params): Query<UrlQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_COMMENTS);
    respond(
        state.services.instagram.get_post_comments(&url, limit).await,
        "instagram comments",
    )
}

async fn hashtag(
    State(state): State<Arc<AppState>>,
    Path(hashtag): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.instagram.get_hashtag_posts(&hashtag, limit).await,
        "instagram hashtag",
    )
}

async fn user_reels(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.instagram.get_user_reels(&username, limit).await,
        "instagram reels",
    )
}

async fn post_details(State(state): State<Arc<AppState>>, Query(params): Query<UrlQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    respond(
        state.services.instagram.get_post_details(&url).await,
        "instagram post details",
    )
}

async fn search_kind(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Response {
    let q = match required(params.q, "q") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_RESULTS);
    let instagram = &state.services.instagram;
    let result = match kind.as_str() {
        "users" => instagram.search_users(&q, limit).await,
        "hashtags" => instagram.search_hashtags(&q, limit).await,
        "places" => instagram.search_places(&q, limit).await,
        _ => return ApiError::NotFound.into_response(),
    };
    respond(result, "instagram search")
}

// --- JSON bodies ---

async fn profiles(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let result = match parse_body(body) {
        Ok(request) => state.services.instagram.scrape_profiles(&request).await,
        Err(e) => Err(e),
    };
    respond(result, "instagram profiles")
}

async fn posts(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let result = match parse_body(body) {
        Ok(request) => state.services.instagram.scrape_posts(&request).await,
        Err(e) => Err(e),
    };
    respond(result, "instagram posts")
}

async fn comments(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let result = match parse_body(body) {
        Ok(request) => state.services.instagram.scrape_comments(&request).await,
        Err(e) => Err(e),
    };
    respond(result, "instagram comments")
}

async fn hashtags(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let result = match parse_body(body) {
        Ok(request) => state.services.instagram.scrape_hashtag(&request).await,
        Err(e) => Err(e),
    };
    respond(result, "instagram hashtags")
}

async fn reels(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let result = match parse_body(body) {
        Ok(request) => state.services.instagram.scrape_reels(&request).await,
        Err(e) => Err(e),
    };
    respond(result, "instagram reels")
}

async fn post_details_body(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let result = match parse_body(body) {
        Ok(request) => state.services.instagram.scrape_post_details(&request).await,
        Err(e) => Err(e),
    };
    respond(result, "instagram post details")
}

async fn search(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let result = match parse_body(body) {
        Ok(request) => state.services.instagram.search(&request).await,
        Err(e) => Err(e),
    };
    respond(result, "instagram search")
}
