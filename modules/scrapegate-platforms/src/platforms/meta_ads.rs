//! Facebook/Instagram Ad Library via `apify/facebook-ads-scraper`.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use apify_client::StartUrl;
use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::runner::{check_limit, execute, present, require_any, ActorRequest};

pub const ACTOR_ID: &str = "apify/facebook-ads-scraper";
pub const DEFAULT_RESULTS: u32 = 50;
pub const MAX_RESULTS: u32 = 500;

pub const COUNTRIES: [&str; 13] = [
    "ALL", "US", "GB", "CA", "AU", "DE", "FR", "ES", "IT", "BR", "MX", "IN", "JP",
];

pub const AD_TYPES: [&str; 5] = [
    "all",
    "political_and_issue_ads",
    "housing",
    "employment",
    "credit",
];

pub const POLITICAL_AD_TYPE: &str = "political_and_issue_ads";

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

fn default_country() -> String {
    "ALL".to_string()
}

fn default_ad_type() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaAdsScrapeRequest {
    #[serde(default, alias = "page_urls")]
    pub page_urls: Vec<String>,
    #[serde(default, alias = "ad_urls")]
    pub ad_urls: Vec<String>,
    #[serde(default, alias = "search_terms")]
    pub search_terms: Vec<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_ad_type", alias = "ad_type")]
    pub ad_type: String,
    #[serde(default = "default_results", alias = "results_limit")]
    pub results_limit: u32,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<NaiveDate>,
}

impl Default for MetaAdsScrapeRequest {
    fn default() -> Self {
        Self {
            page_urls: Vec::new(),
            ad_urls: Vec::new(),
            search_terms: Vec::new(),
            country: default_country(),
            ad_type: default_ad_type(),
            results_limit: DEFAULT_RESULTS,
            start_date: None,
            end_date: None,
        }
    }
}

impl ActorRequest for MetaAdsScrapeRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("pageUrls", present(&self.page_urls)),
            ("adUrls", present(&self.ad_urls)),
            ("searchTerms", present(&self.search_terms)),
        ])?;
        if !COUNTRIES.contains(&self.country.as_str()) {
            return Err(ScrapeError::Validation(format!(
                "Invalid country. Must be one of: {}",
                COUNTRIES.join(", ")
            )));
        }
        if !AD_TYPES.contains(&self.ad_type.as_str()) {
            return Err(ScrapeError::Validation(format!(
                "Invalid adType. Must be one of: {}",
                AD_TYPES.join(", ")
            )));
        }
        check_limit("resultsLimit", self.results_limit, MAX_RESULTS)
    }

    fn build_input(&self) -> Value {
        let start_urls: Vec<StartUrl> = self
            .page_urls
            .iter()
            .chain(self.ad_urls.iter())
            .cloned()
            .map(StartUrl::new)
            .collect();

        let mut input = Map::new();
        input.insert("startUrls".into(), json!(start_urls));
        input.insert("maxAds".into(), json!(self.results_limit));
        input.insert("country".into(), json!(self.country));
        input.insert("adType".into(), json!(self.ad_type));
        if present(&self.search_terms) {
            input.insert("searchTerms".into(), json!(self.search_terms));
        }
        if let Some(date) = self.start_date {
            input.insert("startDate".into(), json!(date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            input.insert("endDate".into(), json!(date.format("%Y-%m-%d").to_string()));
        }
        Value::Object(input)
    }
}

#[derive(Clone)]
pub struct MetaAdsService {
    gateway: Arc<dyn ActorGateway>,
}

impl MetaAdsService {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn scrape(&self, request: &MetaAdsScrapeRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn scrape_page_ads(
        &self,
        page_url: &str,
        limit: u32,
        country: &str,
        ad_type: &str,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&MetaAdsScrapeRequest {
            page_urls: vec![page_url.to_string()],
            country: country.to_string(),
            ad_type: ad_type.to_string(),
            results_limit: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn search_ads(
        &self,
        query: &str,
        limit: u32,
        country: &str,
        ad_type: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&MetaAdsScrapeRequest {
            search_terms: vec![query.to_string()],
            country: country.to_string(),
            ad_type: ad_type.to_string(),
            results_limit: limit,
            start_date,
            end_date,
            ..Default::default()
        })
        .await
    }

    /// Every political and issue ad running in `country`.
    pub async fn scrape_political_ads(&self, country: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&political_request(country, limit)).await
    }
}

pub fn political_request(country: &str, limit: u32) -> MetaAdsScrapeRequest {
    MetaAdsScrapeRequest {
        search_terms: vec!["*".to_string()],
        country: country.to_string(),
        ad_type: POLITICAL_AD_TYPE.to_string(),
        results_limit: limit,
        ..Default::default()
    }
}
