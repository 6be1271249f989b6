use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

use scrapegate_common::Platform;
use scrapegate_platforms::meta_ads::DEFAULT_RESULTS;

use super::scrape_route;
use crate::error::{required, respond};
use crate::extract::Query;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/page", get(page))
        .route("/search", get(search))
        .route("/political", get(political))
        .route("/scrape", scrape_route(Platform::MetaAds))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    url: Option<String>,
    limit: Option<u32>,
    country: Option<String>,
    ad_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    q: Option<String>,
    limit: Option<u32>,
    country: Option<String>,
    ad_type: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct PoliticalQuery {
    country: Option<String>,
    limit: Option<u32>,
}

async fn page(State(state): State<Arc<AppState>>, Query(params): Query<PageQuery>) -> Response {
    let url = match required(params.url, "url") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    let country = params.country.unwrap_or_else(|| "ALL".to_string());
    let ad_type = params.ad_type.unwrap_or_else(|| "all".to_string());
    respond(
        state
            .services
            .meta_ads
            .scrape_page_ads(&url, limit, &country, &ad_type)
            .await,
        "meta ads page",
    )
}

async fn search(State(state): State<Arc<AppState>>, Query(params): Query<SearchQuery>) -> Response {
    let q = match required(params.q, "q") {
        Ok(q) => q,
        Err(e) => return e.into_response(),
    };
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    let country = params.country.unwrap_or_else(|| "ALL".to_string());
    let ad_type = params.ad_type.unwrap_or_else(|| "all".to_string());
    respond(
        state
            .services
            .meta_ads
            .search_ads(&q, limit, &country, &ad_type, params.start_date, params.end_date)
            .await,
        "meta ads search",
    )
}

async fn political(State(state): State<Arc<AppState>>, Query(params): Query<PoliticalQuery>) -> Response {
    let country = params.country.unwrap_or_else(|| "US".to_string());
    let limit = params.limit.unwrap_or(DEFAULT_RESULTS);
    respond(
        state.services.meta_ads.scrape_political_ads(&country, limit).await,
        "meta ads political",
    )
}
