//! TikTok videos, profiles, hashtags and search via `clockworks/tiktok-scraper`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::runner::{check_limit, execute, present, require_any, ActorRequest};

pub const ACTOR_ID: &str = "clockworks/tiktok-scraper";
pub const DEFAULT_RESULTS: u32 = 10;
pub const MAX_RESULTS_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Video,
    User,
    Top,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Video => "video",
            SearchType::User => "user",
            SearchType::Top => "top",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Latest,
    Oldest,
    Popular,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokScrapeRequest {
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub profiles: Vec<String>,
    #[serde(default, alias = "search_queries")]
    pub search_queries: Vec<String>,
    #[serde(default, alias = "video_urls")]
    pub video_urls: Vec<String>,
    #[serde(default = "default_results", alias = "results_per_page")]
    pub results_per_page: u32,
    #[serde(default, alias = "search_type")]
    pub search_type: Option<SearchType>,
    #[serde(default, alias = "sort_type")]
    pub sort_type: Option<SortType>,
}

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

impl Default for TikTokScrapeRequest {
    fn default() -> Self {
        Self {
            hashtags: Vec::new(),
            profiles: Vec::new(),
            search_queries: Vec::new(),
            video_urls: Vec::new(),
            results_per_page: DEFAULT_RESULTS,
            search_type: None,
            sort_type: None,
        }
    }
}

impl ActorRequest for TikTokScrapeRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("hashtags", present(&self.hashtags)),
            ("profiles", present(&self.profiles)),
            ("searchQueries", present(&self.search_queries)),
            ("videoUrls", present(&self.video_urls)),
        ])?;
        check_limit("resultsPerPage", self.results_per_page, MAX_RESULTS_PER_PAGE)
    }

    fn build_input(&self) -> Value {
        let mut input = Map::new();
        input.insert("resultsPerPage".into(), json!(self.results_per_page));
        if present(&self.hashtags) {
            input.insert("hashtags".into(), json!(self.hashtags));
        }
        if present(&self.profiles) {
            input.insert("profiles".into(), json!(self.profiles));
        }
        if present(&self.search_queries) {
            input.insert("searchQueries".into(), json!(self.search_queries));
        }
        if present(&self.video_urls) {
            input.insert("postURLs".into(), json!(self.video_urls));
        }
        if let Some(search_type) = self.search_type {
            input.insert("searchSection".into(), json!(search_type.as_str()));
        }
        if let Some(sort_type) = self.sort_type {
            input.insert("oldestFirst".into(), json!(sort_type == SortType::Oldest));
        }
        Value::Object(input)
    }
}

#[derive(Clone)]
pub struct TikTokService {
    gateway: Arc<dyn ActorGateway>,
}

impl TikTokService {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn scrape(&self, request: &TikTokScrapeRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn scrape_hashtag(&self, hashtag: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&TikTokScrapeRequest {
            hashtags: vec![hashtag.to_string()],
            results_per_page: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn scrape_profile(&self, username: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&TikTokScrapeRequest {
            profiles: vec![username.to_string()],
            results_per_page: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn search(
        &self,
        query: &str,
        search_type: SearchType,
        limit: u32,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&TikTokScrapeRequest {
            search_queries: vec![query.to_string()],
            results_per_page: limit,
            search_type: Some(search_type),
            ..Default::default()
        })
        .await
    }

    pub async fn get_video(&self, url: &str) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&TikTokScrapeRequest {
            video_urls: vec![url.to_string()],
            results_per_page: 1,
            ..Default::default()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{records, MockGateway};

    #[test]
    fn hashtag_request_builds_minimal_input() {
        let request = TikTokScrapeRequest {
            hashtags: vec!["dance".into()],
            ..Default::default()
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            request.build_input(),
            json!({"hashtags": ["dance"], "resultsPerPage": 10})
        );
    }

    #[test]
    fn every_selector_and_mode_is_mapped() {
        let request = TikTokScrapeRequest {
            hashtags: vec!["a".into()],
            profiles: vec!["b".into()],
            search_queries: vec!["c".into()],
            video_urls: vec!["https://www.tiktok.com/@u/video/1".into()],
            results_per_page: 25,
            search_type: Some(SearchType::Video),
            sort_type: Some(SortType::Oldest),
        };
        assert_eq!(
            request.build_input(),
            json!({
                "resultsPerPage": 25,
                "hashtags": ["a"],
                "profiles": ["b"],
                "searchQueries": ["c"],
                "postURLs": ["https://www.tiktok.com/@u/video/1"],
                "searchSection": "video",
                "oldestFirst": true
            })
        );
    }

    #[test]
    fn non_oldest_sort_sends_false() {
        let request = TikTokScrapeRequest {
            profiles: vec!["b".into()],
            sort_type: Some(SortType::Popular),
            ..Default::default()
        };
        assert_eq!(request.build_input()["oldestFirst"], json!(false));
    }

    #[test]
    fn empty_lists_are_not_selectors() {
        let request = TikTokScrapeRequest {
            hashtags: vec![],
            ..Default::default()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one of hashtags, profiles, searchQueries, or videoUrls must be provided"
        );
    }

    #[test]
    fn results_per_page_is_bounded() {
        let request = TikTokScrapeRequest {
            hashtags: vec!["a".into()],
            results_per_page: 101,
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn body_accepts_camel_case_and_snake_case() {
        let camel: TikTokScrapeRequest =
            serde_json::from_value(json!({"searchQueries": ["x"], "searchType": "user"})).unwrap();
        let snake: TikTokScrapeRequest =
            serde_json::from_value(json!({"search_queries": ["x"], "search_type": "user"})).unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.results_per_page, DEFAULT_RESULTS);
        assert_eq!(camel.search_type, Some(SearchType::User));
    }

    #[tokio::test]
    async fn search_defaults_section_to_requested_type() {
        let gateway = Arc::new(MockGateway::new());
        let service = TikTokService::new(gateway.clone());

        service.search("cooking", SearchType::Top, 5).await.unwrap();

        assert_eq!(gateway.last_actor().as_deref(), Some(ACTOR_ID));
        assert_eq!(
            gateway.last_input().unwrap(),
            json!({"searchQueries": ["cooking"], "resultsPerPage": 5, "searchSection": "top"})
        );
    }

    #[tokio::test]
    async fn get_video_asks_for_one_result() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_run(Some("run-9"), Some("ds-9"))
                .on_dataset("ds-9", records(1)),
        );
        let service = TikTokService::new(gateway.clone());

        let resp = service.get_video("https://www.tiktok.com/@u/video/1").await.unwrap();

        assert_eq!(resp.total_results, 1);
        assert_eq!(
            gateway.last_input().unwrap(),
            json!({"postURLs": ["https://www.tiktok.com/@u/video/1"], "resultsPerPage": 1})
        );
    }
}
