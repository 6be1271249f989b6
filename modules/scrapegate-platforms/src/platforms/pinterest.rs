//! Pinterest pins, boards, profiles and search via `epctex/pinterest-scraper`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use apify_client::{ProxyConfig, StartUrl};
use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::runner::{check_limit, check_range, execute, present, require_any, ActorRequest};

pub const ACTOR_ID: &str = "epctex/pinterest-scraper";
pub const DEFAULT_RESULTS: u32 = 20;
pub const MAX_RESULTS: u32 = 200;
pub const DEFAULT_END_PAGE: u32 = 1;
pub const MAX_END_PAGE: u32 = 10;

pub fn search_url(query: &str) -> String {
    format!("https://www.pinterest.com/search/pins/?q={query}")
}

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

fn default_end_page() -> u32 {
    DEFAULT_END_PAGE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinterestScrapeRequest {
    #[serde(default, alias = "pin_urls")]
    pub pin_urls: Vec<String>,
    #[serde(default, alias = "board_urls")]
    pub board_urls: Vec<String>,
    #[serde(default, alias = "profile_urls")]
    pub profile_urls: Vec<String>,
    #[serde(default, alias = "search_queries")]
    pub search_queries: Vec<String>,
    #[serde(default = "default_results", alias = "max_items")]
    pub max_items: u32,
    #[serde(default = "default_end_page", alias = "end_page")]
    pub end_page: u32,
}

impl Default for PinterestScrapeRequest {
    fn default() -> Self {
        Self {
            pin_urls: Vec::new(),
            board_urls: Vec::new(),
            profile_urls: Vec::new(),
            search_queries: Vec::new(),
            max_items: DEFAULT_RESULTS,
            end_page: DEFAULT_END_PAGE,
        }
    }
}

impl ActorRequest for PinterestScrapeRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("pinUrls", present(&self.pin_urls)),
            ("boardUrls", present(&self.board_urls)),
            ("profileUrls", present(&self.profile_urls)),
            ("searchQueries", present(&self.search_queries)),
        ])?;
        check_limit("maxItems", self.max_items, MAX_RESULTS)?;
        check_range("endPage", self.end_page, 1, MAX_END_PAGE)
    }

    fn build_input(&self) -> Value {
        let start_urls: Vec<StartUrl> = self
            .pin_urls
            .iter()
            .chain(self.board_urls.iter())
            .chain(self.profile_urls.iter())
            .cloned()
            .chain(self.search_queries.iter().map(|q| search_url(q)))
            .map(StartUrl::new)
            .collect();

        json!({
            "startUrls": start_urls,
            "maxItems": self.max_items,
            "endPage": self.end_page,
            "proxy": ProxyConfig::apify(),
        })
    }
}

#[derive(Clone)]
pub struct PinterestService {
    gateway: Arc<dyn ActorGateway>,
}

impl PinterestService {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn scrape(&self, request: &PinterestScrapeRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn scrape_board(&self, board_url: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&PinterestScrapeRequest {
            board_urls: vec![board_url.to_string()],
            max_items: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn scrape_profile(&self, profile_url: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&PinterestScrapeRequest {
            profile_urls: vec![profile_url.to_string()],
            max_items: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn search(&self, query: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&PinterestScrapeRequest {
            search_queries: vec![query.to_string()],
            max_items: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn get_pin(&self, pin_url: &str) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&PinterestScrapeRequest {
            pin_urls: vec![pin_url.to_string()],
            max_items: 1,
            ..Default::default()
        })
        .await
    }
}
