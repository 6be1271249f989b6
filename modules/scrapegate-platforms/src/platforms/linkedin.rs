//! LinkedIn posts from profiles and company pages via `apimaestro/linkedin-profile-posts`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::runner::{check_limit, execute, present, require_any, ActorRequest};

pub const ACTOR_ID: &str = "apimaestro/linkedin-profile-posts";
pub const DEFAULT_RESULTS: u32 = 20;
pub const MAX_RESULTS: u32 = 100;

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInScrapeRequest {
    #[serde(default, alias = "profile_urls")]
    pub profile_urls: Vec<String>,
    #[serde(default, alias = "company_urls")]
    pub company_urls: Vec<String>,
    #[serde(default, alias = "search_queries")]
    pub search_queries: Vec<String>,
    #[serde(default = "default_results", alias = "results_limit")]
    pub results_limit: u32,
    #[serde(default, alias = "include_comments")]
    pub include_comments: bool,
    #[serde(default = "default_true", alias = "include_reactions")]
    pub include_reactions: bool,
}

impl Default for LinkedInScrapeRequest {
    fn default() -> Self {
        Self {
            profile_urls: Vec::new(),
            company_urls: Vec::new(),
            search_queries: Vec::new(),
            results_limit: DEFAULT_RESULTS,
            include_comments: false,
            include_reactions: true,
        }
    }
}

impl ActorRequest for LinkedInScrapeRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("profileUrls", present(&self.profile_urls)),
            ("companyUrls", present(&self.company_urls)),
            ("searchQueries", present(&self.search_queries)),
        ])?;
        check_limit("resultsLimit", self.results_limit, MAX_RESULTS)
    }

    fn build_input(&self) -> Value {
        let mut input = Map::new();
        input.insert("maxPosts".into(), json!(self.results_limit));

        // Company pages share the profile URL slot.
        let urls: Vec<&String> = self.profile_urls.iter().chain(self.company_urls.iter()).collect();
        if present(&urls) {
            input.insert("profileUrls".into(), json!(urls));
        }
        if present(&self.search_queries) {
            input.insert("searchQueries".into(), json!(self.search_queries));
        }
        if self.include_comments {
            input.insert("includeComments".into(), json!(true));
        }
        if self.include_reactions {
            input.insert("includeReactions".into(), json!(true));
        }
        Value::Object(input)
    }
}

#[derive(Clone)]
pub struct LinkedInService {
    gateway: Arc<dyn ActorGateway>,
}

impl LinkedInService {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn scrape(&self, request: &LinkedInScrapeRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn scrape_profile_posts(
        &self,
        profile_url: &str,
        limit: u32,
        include_comments: bool,
        include_reactions: bool,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&LinkedInScrapeRequest {
            profile_urls: vec![profile_url.to_string()],
            results_limit: limit,
            include_comments,
            include_reactions,
            ..Default::default()
        })
        .await
    }

    pub async fn scrape_company_posts(
        &self,
        company_url: &str,
        limit: u32,
        include_comments: bool,
        include_reactions: bool,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&LinkedInScrapeRequest {
            company_urls: vec![company_url.to_string()],
            results_limit: limit,
            include_comments,
            include_reactions,
            ..Default::default()
        })
        .await
    }

    pub async fn search_posts(&self, query: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&LinkedInScrapeRequest {
            search_queries: vec![query.to_string()],
            results_limit: limit,
            include_reactions: false,
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
    fn company_urls_follow_profile_urls() {
        let request = LinkedInScrapeRequest {
            profile_urls: vec!["https://www.linkedin.com/in/someone".into()],
            company_urls: vec!["https://www.linkedin.com/company/acme".into()],
            ..Default::default()
        };
        assert_eq!(
            request.build_input(),
            json!({
                "maxPosts": 20,
                "profileUrls": [
                    "https://www.linkedin.com/in/someone",
                    "https://www.linkedin.com/company/acme"
                ],
                "includeReactions": true
            })
        );
    }

    #[test]
    fn toggles_are_only_sent_when_true() {
        let request: LinkedInScrapeRequest = serde_json::from_value(json!({
            "searchQueries": ["hiring"],
            "includeComments": true,
            "include_reactions": false
        }))
        .unwrap();
        assert_eq!(
            request.build_input(),
            json!({"maxPosts": 20, "searchQueries": ["hiring"], "includeComments": true})
        );
    }

    #[test]
    fn needs_a_selector() {
        let err = LinkedInScrapeRequest::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one of profileUrls, companyUrls, or searchQueries must be provided"
        );
    }

    #[tokio::test]
    async fn search_sends_only_queries_and_limit() {
        let gateway = Arc::new(MockGateway::new());
        let service = LinkedInService::new(gateway.clone());

        service.search_posts("rust jobs", 10).await.unwrap();

        assert_eq!(
            gateway.last_input().unwrap(),
            json!({"maxPosts": 10, "searchQueries": ["rust jobs"]})
        );
    }
}
