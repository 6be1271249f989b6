use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

use scrapegate_common::ScrapeError;
use scrapegate_jobs::{JobSpec, JobSubmission};
use scrapegate_platforms::parse_body;

use crate::error::respond;
use crate::extract::JsonBody;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/instagram/posts", post(instagram_posts))
        .route("/instagram/profile", post(instagram_profile))
        .route("/instagram/hashtag", post(instagram_hashtag))
        .route("/tiktok/hashtag", post(tiktok_hashtag))
        .route("/youtube/search", post(youtube_search))
        .route("/{job_id}", get(job_status))
}

fn submit(state: &AppState, spec: Result<JobSpec, ScrapeError>) -> Result<JobSubmission, ScrapeError> {
    state.jobs.submit(spec?)
}

async fn instagram_posts(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let spec = parse_body(body).map(JobSpec::InstagramPosts);
    respond(submit(&state, spec), "instagram posts job")
}

async fn instagram_profile(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let spec = parse_body(body).map(JobSpec::InstagramProfile);
    respond(submit(&state, spec), "instagram profile job")
}

async fn instagram_hashtag(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let spec = parse_body(body).map(JobSpec::InstagramHashtag);
    respond(submit(&state, spec), "instagram hashtag job")
}

async fn tiktok_hashtag(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let spec = parse_body(body).map(JobSpec::TikTokHashtag);
    respond(submit(&state, spec), "tiktok hashtag job")
}

async fn youtube_search(State(state): State<Arc<AppState>>, JsonBody(body): JsonBody<Value>) -> Response {
    let spec = parse_body(body).map(JobSpec::YouTubeSearch);
    respond(submit(&state, spec), "youtube search job")
}

/// Unknown and aged-out ids both answer 200 with status `EXPIRED`.
async fn job_status(State(state): State<Arc<AppState>>, Path(job_id): Path<String>) -> Response {
    Json(state.jobs.status(&job_id)).into_response()
}
