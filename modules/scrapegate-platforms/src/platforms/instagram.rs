//! Instagram profiles, posts, comments, hashtags, reels, post details and search.
//!
//! Unlike the other platforms, every Instagram operation has its own request
//! type with a single required selector, and several operations run against
//! dedicated actors. All inputs go through the residential proxy group.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use apify_client::ProxyConfig;
use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::runner::{check_limit, execute, present, require_any, ActorRequest};

pub const ACTOR_ID: &str = "apify/instagram-scraper";
pub const PROFILE_ACTOR_ID: &str = "apify/instagram-profile-scraper";
pub const POST_ACTOR_ID: &str = "apify/instagram-post-scraper";
pub const HASHTAG_ACTOR_ID: &str = "apify/instagram-hashtag-scraper";

pub const DEFAULT_RESULTS: u32 = 20;
pub const MAX_RESULTS: u32 = 200;
pub const DEFAULT_COMMENTS: u32 = 100;
pub const MAX_COMMENTS: u32 = 1000;
pub const DEFAULT_SEARCH_RESULTS: u32 = 10;
pub const MAX_SEARCH_RESULTS: u32 = 100;

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

fn default_comments() -> u32 {
    DEFAULT_COMMENTS
}

fn default_search_results() -> u32 {
    DEFAULT_SEARCH_RESULTS
}

fn proxy() -> Value {
    json!(ProxyConfig::residential())
}

pub fn profile_url(username: &str) -> String {
    format!("https://www.instagram.com/{username}/")
}

/// Point a profile URL at its reels tab unless it already does.
pub fn reels_url(profile_url: &str) -> String {
    if profile_url.contains("/reels") {
        profile_url.to_string()
    } else {
        format!("{}/reels/", profile_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    User,
    Hashtag,
    Place,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::User => "user",
            SearchType::Hashtag => "hashtag",
            SearchType::Place => "place",
        }
    }
}

// --- Profile ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstagramProfileRequest {
    #[serde(default)]
    pub usernames: Vec<String>,
}

impl ActorRequest for InstagramProfileRequest {
    fn actor_id(&self) -> &'static str {
        PROFILE_ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[("usernames", present(&self.usernames))])
    }

    fn build_input(&self) -> Value {
        json!({
            "usernames": self.usernames,
            "proxy": proxy(),
        })
    }
}

// --- Posts ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPostsRequest {
    #[serde(default)]
    pub usernames: Vec<String>,
    #[serde(default, alias = "profile_urls")]
    pub profile_urls: Vec<String>,
    #[serde(default = "default_results", alias = "results_limit")]
    pub results_limit: u32,
}

impl Default for InstagramPostsRequest {
    fn default() -> Self {
        Self {
            usernames: Vec::new(),
            profile_urls: Vec::new(),
            results_limit: DEFAULT_RESULTS,
        }
    }
}

impl ActorRequest for InstagramPostsRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("usernames", present(&self.usernames)),
            ("profileUrls", present(&self.profile_urls)),
        ])?;
        check_limit("resultsLimit", self.results_limit, MAX_RESULTS)
    }

    fn build_input(&self) -> Value {
        let direct_urls: Vec<String> = self
            .usernames
            .iter()
            .map(|u| profile_url(u))
            .chain(self.profile_urls.iter().cloned())
            .collect();
        json!({
            "directUrls": direct_urls,
            "resultsType": "posts",
            "resultsLimit": self.results_limit,
            "proxy": proxy(),
        })
    }
}

// --- Comments ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramCommentsRequest {
    #[serde(default, alias = "post_urls")]
    pub post_urls: Vec<String>,
    #[serde(default = "default_comments", alias = "results_limit")]
    pub results_limit: u32,
}

impl ActorRequest for InstagramCommentsRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[("postUrls", present(&self.post_urls))])?;
        check_limit("resultsLimit", self.results_limit, MAX_COMMENTS)
    }

    fn build_input(&self) -> Value {
        json!({
            "directUrls": self.post_urls,
            "resultsType": "comments",
            "resultsLimit": self.results_limit,
            "proxy": proxy(),
        })
    }
}

// --- Hashtag ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramHashtagRequest {
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default = "default_results", alias = "results_limit")]
    pub results_limit: u32,
}

impl ActorRequest for InstagramHashtagRequest {
    fn actor_id(&self) -> &'static str {
        HASHTAG_ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[("hashtags", present(&self.hashtags))])?;
        check_limit("resultsLimit", self.results_limit, MAX_RESULTS)
    }

    fn build_input(&self) -> Value {
        json!({
            "hashtags": self.hashtags,
            "resultsLimit": self.results_limit,
            "proxy": proxy(),
        })
    }
}

// --- Reels ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramReelsRequest {
    #[serde(default)]
    pub usernames: Vec<String>,
    #[serde(default, alias = "profile_urls")]
    pub profile_urls: Vec<String>,
    #[serde(default = "default_results", alias = "results_limit")]
    pub results_limit: u32,
}

impl ActorRequest for InstagramReelsRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("usernames", present(&self.usernames)),
            ("profileUrls", present(&self.profile_urls)),
        ])?;
        check_limit("resultsLimit", self.results_limit, MAX_RESULTS)
    }

    fn build_input(&self) -> Value {
        let direct_urls: Vec<String> = self
            .usernames
            .iter()
            .map(|u| format!("https://www.instagram.com/{u}/reels/"))
            .chain(self.profile_urls.iter().map(|url| reels_url(url)))
            .collect();
        json!({
            "directUrls": direct_urls,
            "resultsType": "posts",
            "resultsLimit": self.results_limit,
            "proxy": proxy(),
        })
    }
}

// --- Post details ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPostDetailRequest {
    #[serde(default, alias = "post_urls")]
    pub post_urls: Vec<String>,
}

impl ActorRequest for InstagramPostDetailRequest {
    fn actor_id(&self) -> &'static str {
        POST_ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[("postUrls", present(&self.post_urls))])
    }

    fn build_input(&self) -> Value {
        json!({
            "directUrls": self.post_urls,
            "resultsType": "details",
            "proxy": proxy(),
        })
    }
}

// --- Search ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramSearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default, alias = "search_type")]
    pub search_type: SearchType,
    #[serde(default = "default_search_results", alias = "results_limit")]
    pub results_limit: u32,
}

impl ActorRequest for InstagramSearchRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[("query", !self.query.trim().is_empty())])?;
        check_limit("resultsLimit", self.results_limit, MAX_SEARCH_RESULTS)
    }

    fn build_input(&self) -> Value {
        json!({
            "search": self.query,
            "searchType": self.search_type.as_str(),
            "searchLimit": self.results_limit,
            "resultsType": "details",
            "proxy": proxy(),
        })
    }
}

// --- Service ---

#[derive(Clone)]
pub struct InstagramService {
    gateway: Arc<dyn ActorGateway>,
}

impl InstagramService {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self { gateway }
    }

    /// Generic scrape: posts from usernames and/or profile URLs.
    pub async fn scrape(&self, request: &InstagramPostsRequest) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape_posts(request).await
    }

    pub async fn scrape_profiles(&self, request: &InstagramProfileRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn get_profile(&self, username: &str) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape_profiles(&InstagramProfileRequest {
            usernames: vec![username.to_string()],
        })
        .await
    }

    pub async fn scrape_posts(&self, request: &InstagramPostsRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn get_user_posts(&self, username: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape_posts(&InstagramPostsRequest {
            usernames: vec![username.to_string()],
            results_limit: limit,
            ..Default::default()
        })
        .await
    }

    pub async fn scrape_comments(&self, request: &InstagramCommentsRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn get_post_comments(&self, post_url: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape_comments(&InstagramCommentsRequest {
            post_urls: vec![post_url.to_string()],
            results_limit: limit,
        })
        .await
    }

    pub async fn scrape_hashtag(&self, request: &InstagramHashtagRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn get_hashtag_posts(&self, hashtag: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape_hashtag(&InstagramHashtagRequest {
            hashtags: vec![hashtag.to_string()],
            results_limit: limit,
        })
        .await
    }

    pub async fn scrape_reels(&self, request: &InstagramReelsRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn get_user_reels(&self, username: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape_reels(&InstagramReelsRequest {
            usernames: vec![username.to_string()],
            profile_urls: Vec::new(),
            results_limit: limit,
        })
        .await
    }

    pub async fn scrape_post_details(
        &self,
        request: &InstagramPostDetailRequest,
    ) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn get_post_details(&self, post_url: &str) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape_post_details(&InstagramPostDetailRequest {
            post_urls: vec![post_url.to_string()],
        })
        .await
    }

    pub async fn search(&self, request: &InstagramSearchRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn search_users(&self, query: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.search_as(query, SearchType::User, limit).await
    }

    pub async fn search_hashtags(&self, query: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.search_as(query, SearchType::Hashtag, limit).await
    }

    pub async fn search_places(&self, query: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.search_as(query, SearchType::Place, limit).await
    }

    async fn search_as(
        &self,
        query: &str,
        search_type: SearchType,
        limit: u32,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.search(&InstagramSearchRequest {
            query: query.to_string(),
            search_type,
            results_limit: limit,
        })
        .await
    }
}
