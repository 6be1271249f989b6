//! YouTube search, channels, videos and playlists via `streamers/youtube-scraper`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use apify_client::StartUrl;
use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::runner::{check_limit, execute, present, require_any, ActorRequest};

pub const ACTOR_ID: &str = "streamers/youtube-scraper";
pub const DEFAULT_RESULTS: u32 = 50;
pub const MAX_RESULTS: u32 = 500;
pub const DEFAULT_VIDEO_COMMENTS: u32 = 100;

pub fn search_url(query: &str) -> String {
    format!("https://www.youtube.com/results?search_query={query}")
}

/// Channel URLs are scraped from their videos tab.
pub fn channel_videos_url(url: &str) -> String {
    if url.contains("/videos") {
        url.to_string()
    } else {
        format!("{}/videos", url.trim_end_matches('/'))
    }
}

fn default_results() -> u32 {
    DEFAULT_RESULTS
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeScrapeRequest {
    #[serde(default, alias = "search_queries")]
    pub search_queries: Vec<String>,
    #[serde(default, alias = "channel_urls")]
    pub channel_urls: Vec<String>,
    #[serde(default, alias = "video_urls")]
    pub video_urls: Vec<String>,
    #[serde(default, alias = "playlist_urls")]
    pub playlist_urls: Vec<String>,
    #[serde(default = "default_results", alias = "max_results")]
    pub max_results: u32,
    #[serde(default, alias = "max_comments")]
    pub max_comments: u32,
    #[serde(default = "default_true", alias = "include_shorts")]
    pub include_shorts: bool,
    #[serde(default = "default_true", alias = "include_streams")]
    pub include_streams: bool,
}

impl Default for YouTubeScrapeRequest {
    fn default() -> Self {
        Self {
            search_queries: Vec::new(),
            channel_urls: Vec::new(),
            video_urls: Vec::new(),
            playlist_urls: Vec::new(),
            max_results: DEFAULT_RESULTS,
            max_comments: 0,
            include_shorts: true,
            include_streams: true,
        }
    }
}

impl ActorRequest for YouTubeScrapeRequest {
    fn actor_id(&self) -> &'static str {
        ACTOR_ID
    }

    fn validate(&self) -> Result<(), ScrapeError> {
        require_any(&[
            ("searchQueries", present(&self.search_queries)),
            ("channelUrls", present(&self.channel_urls)),
            ("videoUrls", present(&self.video_urls)),
            ("playlistUrls", present(&self.playlist_urls)),
        ])?;
        check_limit("maxResults", self.max_results, MAX_RESULTS)
    }

    fn build_input(&self) -> Value {
        let start_urls: Vec<StartUrl> = self
            .search_queries
            .iter()
            .map(|q| search_url(q))
            .chain(self.channel_urls.iter().map(|url| channel_videos_url(url)))
            .chain(self.video_urls.iter().cloned())
            .chain(self.playlist_urls.iter().cloned())
            .map(StartUrl::new)
            .collect();

        json!({
            "startUrls": start_urls,
            "maxResults": self.max_results,
            "maxResultsShorts": if self.include_shorts { self.max_results } else { 0 },
            "maxResultStreams": if self.include_streams { self.max_results } else { 0 },
            "maxComments": self.max_comments,
        })
    }
}

#[derive(Clone)]
pub struct YouTubeService {
    gateway: Arc<dyn ActorGateway>,
}

impl YouTubeService {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn scrape(&self, request: &YouTubeScrapeRequest) -> Result<ScrapeResponse, ScrapeError> {
        execute(self.gateway.as_ref(), request).await
    }

    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        include_shorts: bool,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&YouTubeScrapeRequest {
            search_queries: vec![query.to_string()],
            max_results: limit,
            include_shorts,
            ..Default::default()
        })
        .await
    }

    pub async fn scrape_channel(
        &self,
        channel_url: &str,
        limit: u32,
        include_shorts: bool,
        include_streams: bool,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&YouTubeScrapeRequest {
            channel_urls: vec![channel_url.to_string()],
            max_results: limit,
            include_shorts,
            include_streams,
            ..Default::default()
        })
        .await
    }

    pub async fn get_video(
        &self,
        video_url: &str,
        include_comments: bool,
        max_comments: u32,
    ) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&YouTubeScrapeRequest {
            video_urls: vec![video_url.to_string()],
            max_results: 1,
            max_comments: if include_comments { max_comments } else { 0 },
            ..Default::default()
        })
        .await
    }

    pub async fn scrape_playlist(&self, playlist_url: &str, limit: u32) -> Result<ScrapeResponse, ScrapeError> {
        self.scrape(&YouTubeScrapeRequest {
            playlist_urls: vec![playlist_url.to_string()],
            max_results: limit,
            ..Default::default()
        })
        .await
    }
}
