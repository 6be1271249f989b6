use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use scrapegate_common::Platform;
use scrapegate_platforms::linkedin::DEFAULT_RESULTS;

use super::scrape_route;
use crate::error::{required, respond};
use crate::extract::Query;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(profile))
        .route("/company", get(company))
        .route("/search", get(search))
        .route("/scrape", scrape_route(Platform::Linkedin))
}

/// Shared by the profile and company lookups.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    url: Option<String>,
    limit: Option<u32>,
    include_comments: Option<bool>,
    include_reactions: Option<bool>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    limit: Option<u32>,
}

async fn profile(State(state): State<Arc<AppState>>, Query(params): Query<PostsQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    respond(
        state
            .services
            .linkedin
            .scrape_profile_posts(
                &url,
                params.limit.unwrap_or(DEFAULT_RESULTS),
                params.include_comments.unwrap_or(false),
                params.include_reactions.unwrap_or(true),
            )
            .await,
        "linkedin profile",
    )
}

async fn company(State(state): State<Arc<AppState>>, Query(params): Query<PostsQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    respond(
        state
            .services
            .linkedin
            .scrape_company_posts(
                &url,
                params.limit.unwrap_or(DEFAULT_RESULTS),
                params.include_comments.unwrap_or(false),
                params.include_reactions.unwrap_or(true),
            )
            .await,
        "linkedin company",
    )
}

async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Response {
    let q = match required(params.q, "q") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.linkedin.search_posts(&q, limit).await,
        "linkedin search",
    )
}
