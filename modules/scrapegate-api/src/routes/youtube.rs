use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;

use scrapegate_common::Platform;
use scrapegate_platforms::youtube::{DEFAULT_RESULTS, DEFAULT_VIDEO_COMMENTS};

use super::scrape_route;
use crate::error::{required, respond};
use crate::extract::Query;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search))
        .route("/channel", get(channel))
        .route("/video", get(video))
        .route("/playlist", get(playlist))
        .route("/scrape", scrape_route(Platform::Youtube))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    q: Option<String>,
    limit: Option<u32>,
    include_shorts: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelQuery {
    url: Option<String>,
    limit: Option<u32>,
    include_shorts: Option<bool>,
    include_streams: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoQuery {
    url: Option<String>,
    include_comments: Option<bool>,
    max_comments: Option<u32>,
}

#[derive(Deserialize)]
pub struct PlaylistQuery {
    url: Option<String>,
    limit: Option<u32>,
}

async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Response {
    let q = match required(params.q, "q") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    let include_shorts = params.include_shorts.unwrap_or(true);
    respond(
        state.services.youtube.search(&q, limit, include_shorts).await,
        "youtube search",
    )
}

async fn channel(State(state): State<Arc<AppState>>, Query(params): Query<ChannelQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state
            .services
            .youtube
            .scrape_channel(
                &url,
                limit,
                params.include_shorts.unwrap_or(true),
                params.include_streams.unwrap_or(true),
            )
            .await,
        "youtube channel",
    )
}

async fn video(State(state): State<Arc<AppState>>, Query(params): Query<VideoQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let include_comments = params.include_comments.unwrap_or(false);
    let max_comments = params.max_comments.unwrap_or(DEFAULT_VIDEO_COMMENTS);
    respond(
        state
            .services
            .youtube
            .get_video(&url, include_comments, max_comments)
            .await,
        "youtube video",
    )
}

async fn playlist(State(state): State<Arc<AppState>>, Query(params): Query<PlaylistQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.youtube.scrape_playlist(&url, limit).await,
        "youtube playlist",
    )
}
