pub mod instagram;
pub mod jobs;
pub mod linkedin;
pub mod meta_ads;
pub mod pinterest;
pub mod threads;
pub mod tiktok;
pub mod youtube;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, MethodRouter};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use scrapegate_common::Platform;

use crate::error::{respond, ApiError};
use crate::extract::JsonBody;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/platforms", get(platforms))
        .nest(&prefix(Platform::Tiktok), tiktok::routes())
        .nest(&prefix(Platform::Instagram), instagram::routes())
        .nest(&prefix(Platform::Youtube), youtube::routes())
        .nest(&prefix(Platform::MetaAds), meta_ads::routes())
        .nest(&prefix(Platform::Threads), threads::routes())
        .nest(&prefix(Platform::Linkedin), linkedin::routes())
        .nest(&prefix(Platform::Pinterest), pinterest::routes())
        .nest("/api/v1/jobs", jobs::routes())
        .fallback(fallback)
}

fn prefix(platform: Platform) -> String {
    format!("/api/v1/{}", platform.route_prefix())
}

/// `POST .../scrape`: the platform's generic request, taken as a raw body.
pub(crate) fn scrape_route(platform: Platform) -> MethodRouter<Arc<AppState>> {
    post(
        move |State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>| async move {
            respond(state.services.scrape(platform, body).await, platform.as_str())
        },
    )
}

// --- Meta ---

async fn root() -> impl IntoResponse {
    let names: Vec<&str> = Platform::ALL.iter().map(|p| p.as_str()).collect();
    Json(json!({
        "status": "ok",
        "message": "Social Media Scraper API",
        "platforms": names,
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

async fn platforms() -> impl IntoResponse {
    let platforms: Map<String, Value> = Platform::ALL
        .iter()
        .map(|p| {
            (
                p.as_str().to_string(),
                json!({
                    "description": p.description(),
                    "endpoints": p.endpoints(),
                }),
            )
        })
        .collect();
    Json(json!({ "platforms": platforms }))
}

/// Unrouted paths. `POST /api/v1/<key>/scrape` resolves `key` by name, so
/// spellings such as `meta_ads` or `TikTok` still reach their platform.
async fn fallback(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Response {
    let segments: Vec<&str> = uri.path().trim_matches('/').split('/').collect();
    let ["api", "v1", key, "scrape"] = segments.as_slice() else {
        return ApiError::NotFound.into_response();
    };
    let Ok(platform) = key.parse::<Platform>() else {
        return ApiError::UnknownPlatform(key.to_string()).into_response();
    };
    if method != Method::POST {
        return ApiError::NotFound.into_response();
    }
    match serde_json::from_slice::<Value>(&body) {
        Ok(body) => respond(state.services.scrape(platform, body).await, platform.as_str()),
        Err(e) => ApiError::BadRequest(format!("Invalid JSON body: {e}")).into_response(),
    }
}
