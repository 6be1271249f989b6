use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One opaque dataset record. Its shape is owned by the remote actor.
pub type Record = Map<String, Value>;

/// Uniform envelope returned by every platform operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub data: Vec<Record>,
    #[serde(rename = "totalResults", alias = "total_results")]
    pub total_results: usize,
    #[serde(rename = "runId", alias = "run_id")]
    pub run_id: Option<String>,
}

impl ScrapeResponse {
    /// `total_results` always mirrors the fetched records, never a remote count.
    pub fn from_records(data: Vec<Record>, run_id: Option<String>) -> Self {
        Self {
            success: true,
            total_results: data.len(),
            data,
            run_id,
        }
    }
}

// --- Platform ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Tiktok,
    Instagram,
    Youtube,
    MetaAds,
    Threads,
    Linkedin,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Tiktok,
        Platform::Instagram,
        Platform::Youtube,
        Platform::MetaAds,
        Platform::Threads,
        Platform::Linkedin,
        Platform::Pinterest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Youtube => "youtube",
            Platform::MetaAds => "meta_ads",
            Platform::Threads => "threads",
            Platform::Linkedin => "linkedin",
            Platform::Pinterest => "pinterest",
        }
    }

    /// Path segment used by the HTTP routes.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Platform::MetaAds => "meta-ads",
            other => other.as_str(),
        }
    }

    /// The actor behind the platform's generic scrape operation.
    pub fn actor_id(&self) -> &'static str {
        match self {
            Platform::Tiktok => "clockworks/tiktok-scraper",
            Platform::Instagram => "apify/instagram-scraper",
            Platform::Youtube => "streamers/youtube-scraper",
            Platform::MetaAds => "apify/facebook-ads-scraper",
            Platform::Threads => "curious_coder/threads-scraper",
            Platform::Linkedin => "apimaestro/linkedin-profile-posts",
            Platform::Pinterest => "epctex/pinterest-scraper",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Platform::Tiktok => "TikTok video and profile scraping",
            Platform::Instagram => "Instagram posts, reels, comments, and profiles",
            Platform::Youtube => "YouTube videos, channels, and playlists",
            Platform::MetaAds => "Facebook/Instagram Ad Library scraping",
            Platform::Threads => "Threads posts and profiles",
            Platform::Linkedin => "LinkedIn posts from profiles and companies",
            Platform::Pinterest => "Pinterest pins, boards, and profiles",
        }
    }

    pub fn endpoints(&self) -> &'static [&'static str] {
        match self {
            Platform::Tiktok => &["/hashtag", "/profile", "/search", "/video", "/scrape"],
            Platform::Instagram => &[
                "/profile",
                "/posts",
                "/comments",
                "/hashtag",
                "/reels",
                "/post-details",
                "/search/users",
                "/search/hashtags",
                "/search/places",
                "/scrape",
            ],
            Platform::Youtube => &["/search", "/channel", "/video", "/playlist", "/scrape"],
            Platform::MetaAds => &["/page", "/search", "/political", "/scrape"],
            Platform::Threads => &["/profile", "/hashtag", "/search", "/thread", "/scrape"],
            Platform::Linkedin => &["/profile", "/company", "/search", "/scrape"],
            Platform::Pinterest => &["/board", "/profile", "/search", "/pin", "/scrape"],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tiktok" => Ok(Platform::Tiktok),
            "instagram" => Ok(Platform::Instagram),
            "youtube" => Ok(Platform::Youtube),
            "meta_ads" | "meta-ads" => Ok(Platform::MetaAds),
            "threads" => Ok(Platform::Threads),
            "linkedin" => Ok(Platform::Linkedin),
            "pinterest" => Ok(Platform::Pinterest),
            other => Err(format!("Unknown platform: {other}")),
        }
    }
}
