//! Threads posts, profiles, hashtags and search via `curious_coder/threads-scraper`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::runner::{check_limit, execute, present, require_any, ActorRequest};

pub const ACTOR_ID: &str = "curious_coder/threads-scraper";
pub const DEFAULT_RESULTS: u32 = 20;
pub const MAX_RESULTS: u32 = 100;

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadsScrapeRequest {
    #[serde(default)]
    pub usernames: Vec<String>,
    #[serde(default, alias = "thread_urls")]
    pub thread_urls: Vec<String>,
    #[serde(default, alias = "search_queries")]
    pub search_queries: Vec<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default = "default_results", alias = "results_limit")]
    pub results_limit: u32,
    #[serde(default, alias = "include_replies")]
    pub include_replies: bool,
}

impl Default for ThreadsScrapeRequest {
    fn default() -> Self {
        Self {
            usernames: Vec::new(),
            thread_urls: Vec::new(),
            search_queries: Vec::new(),
            hashtags: Vec::new(),
            results_limit: DEFAULT_RESULTS,
            include_replies: false,
        }
    }
}

impl ActorRequest for ThreadsScrapeRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("usernames", present(&self.usernames)),
            ("threadUrls", present(&self.thread_urls)),
            ("searchQueries", present(&self.search_queries)),
            ("hashtags", present(&self.hashtags)),
        ])?;
        check_limit("resultsLimit", self.results_limit, MAX_RESULTS)
    }

    fn build_input(&self) -> Value {
        let mut input = Map::new();
        input.insert("maxItems".into(), json!(self.results_limit));
        if present(&self.usernames) {
            input.insert("usernames".into(), json!(self.usernames));
        }
        if present(&self.thread_urls) {
            input.insert("threadUrls".into(), json!(self.thread_urls));
        }

        // The actor has no hashtag mode; tags ride along as `#tag` queries.
        let queries: Vec<String> = self
            .search_queries
            .iter()
            .cloned()
            .chain(self.hashtags.iter().map(|tag| format!("#{tag}")))
            .collect();
        if present(&queries) {
            input.insert("searchQueries".into(), json!(queries));
        }

        if self.include_replies {
            input.insert("includeReplies".into(), json!(true));
        }
        Value::Object(input)
    }
}

#[derive(Clone)]
pub struct ThreadsService {
    gateway: Arc<dyn ActorGateway>,
}

impl ThreadsService {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn scrape(&self, request: &ThreadsScrapeRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn scrape_profile(&self, username: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&ThreadsScrapeRequest {
            usernames: vec![username.to_string()],
            results_limit: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn scrape_hashtag(&self, hashtag: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&ThreadsScrapeRequest {
            hashtags: vec![hashtag.to_string()],
            results_limit: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn search(&self, query: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&ThreadsScrapeRequest {
            search_queries: vec![query.to_string()],
            results_limit: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn get_thread(&self, thread_url: &str, include_replies: bool) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&ThreadsScrapeRequest {
            thread_urls: vec![thread_url.to_string()],
            results_limit: 1,
            include_replies,
            ..Default::default()
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockGateway;

    #[test]
    fn hashtags_are_appended_to_search_queries() {
        let request = ThreadsScrapeRequest {
            search_queries: vec!["rust lang".into()],
            hashtags: vec!["rustlang".into(), "ferris".into()],
            ..Default::default()
        };
        assert_eq!(
            request.build_input(),
            json!({
                "maxItems": 20,
                "searchQueries": ["rust lang", "#rustlang", "#ferris"]
            })
        );
    }

    #[test]
    fn replies_flag_only_when_set() {
        let mut request = ThreadsScrapeRequest {
            usernames: vec!["zuck".into()],
            ..Default::default()
        };
        assert!(request.build_input().get("includeReplies").is_none());

        request.include_replies = true;
        assert_eq!(request.build_input()["includeReplies"], json!(true));
    }

    #[test]
    fn needs_a_selector() {
        let err = ThreadsScrapeRequest::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one of usernames, threadUrls, searchQueries, or hashtags must be provided"
        );
    }

    #[tokio::test]
    async fn get_thread_fetches_one_item() {
        let gateway = Arc::new(MockGateway::new());
        let service = ThreadsService::new(gateway.clone());

        service
            .get_thread("https://www.threads.net/@zuck/post/abc", true)
            .await
            .unwrap();

        assert_eq!(
            gateway.last_input().unwrap(),
            json!({
                "maxItems": 1,
                "threadUrls": ["https://www.threads.net/@zuck/post/abc"],
                "includeReplies": true
            })
        );
    }

    #[tokio::test]
    async fn hashtag_op_searches_for_tag() {
        let gateway = Arc::new(MockGateway::new());
        let service = ThreadsService::new(gateway.clone());

        service.scrape_hashtag("coffee", 15).await.unwrap();

        assert_eq!(
            gateway.last_input().unwrap(),
            json!({"maxItems": 15, "searchQueries": ["#coffee"]})
        );
    }
}
