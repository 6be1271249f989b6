use serde::{Deserialize, Serialize};

use scrapegate_common::ScrapeError;
use scrapegate_platforms::instagram::{
    InstagramHashtagRequest, InstagramPostsRequest, InstagramProfileRequest,
};
use scrapegate_platforms::runner::ActorRequest;
use scrapegate_platforms::tiktok::TikTokScrapeRequest;
use scrapegate_platforms::youtube::YouTubeScrapeRequest;

pub const MAX_YOUTUBE_JOB_RESULTS: u32 = 50;

fn default_instagram_limit() -> u32 {
    20
}

fn default_short_limit() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramPostsJob {
    #[serde(default)]
    pub usernames: Vec<String>,
    #[serde(default = "default_instagram_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramProfileJob {
    #[serde(default)]
    pub usernames: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramHashtagJob {
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default = "default_instagram_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TikTokHashtagJob {
    #[serde(default)]
    pub hashtag: String,
    #[serde(default = "default_short_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeSearchJob {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_short_limit")]
    pub limit: u32,
}

/// A unit of background work. Each variant maps onto one platform request.
#[derive(Debug, Clone, PartialEq)]
pub enum JobSpec {
    InstagramPosts(InstagramPostsJob),
    InstagramProfile(InstagramProfileJob),
    InstagramHashtag(InstagramHashtagJob),
    TikTokHashtag(TikTokHashtagJob),
    YouTubeSearch(YouTubeSearchJob),
}

impl JobSpec {
    pub fn name(&self) -> &'static str {
        match self {
            JobSpec::InstagramPosts(_) => "instagram.scrape_posts",
            JobSpec::InstagramProfile(_) => "instagram.scrape_profile",
            JobSpec::InstagramHashtag(_) => "instagram.scrape_hashtag",
            JobSpec::TikTokHashtag(_) => "tiktok.scrape_hashtag",
            JobSpec::YouTubeSearch(_) => "youtube.search",
        }
    }

    /// The platform request this job runs.
    pub fn request(&self) -> Box<dyn ActorRequest> {
        match self {
            JobSpec::InstagramPosts(job) => Box::new(InstagramPostsRequest {
                usernames: job.usernames.clone(),
                profile_urls: Vec::new(),
                results_limit: job.limit,
            }),
            JobSpec::InstagramProfile(job) => Box::new(InstagramProfileRequest {
                usernames: job.usernames.clone(),
            }),
            JobSpec::InstagramHashtag(job) => Box::new(InstagramHashtagRequest {
                hashtags: job.hashtags.clone(),
                results_limit: job.limit,
            }),
            JobSpec::TikTokHashtag(job) => Box::new(TikTokScrapeRequest {
                hashtags: non_blank(&job.hashtag),
                results_per_page: job.limit,
                ..Default::default()
            }),
            JobSpec::YouTubeSearch(job) => Box::new(YouTubeScrapeRequest {
                search_queries: non_blank(&job.query),
                max_results: job.limit,
                ..Default::default()
            }),
        }
    }

    /// Job bodies carry a single target; report it by the body's own field name.
    pub fn validate(&self) -> Result<(), ScrapeError> {
        match self {
            JobSpec::TikTokHashtag(job) if job.hashtag.trim().is_empty() => {
                return Err(ScrapeError::validation("hashtag must be provided"));
            }
            JobSpec::YouTubeSearch(job) if job.query.trim().is_empty() => {
                return Err(ScrapeError::validation("query must be provided"));
            }
            JobSpec::YouTubeSearch(job) if job.limit > MAX_YOUTUBE_JOB_RESULTS => {
                return Err(ScrapeError::Validation(format!(
                    "limit must be between 1 and {MAX_YOUTUBE_JOB_RESULTS}, got {}",
                    job.limit
                )));
            }
            _ => {}
        }
        self.request().validate()
    }
}

fn non_blank(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        Vec::new()
    } else {
        vec![value.to_string()]
    }
}
