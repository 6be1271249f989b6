use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use scrapegate_common::{Platform, ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;
use crate::platforms::instagram::InstagramService;
use crate::platforms::linkedin::LinkedInService;
use crate::platforms::meta_ads::MetaAdsService;
use crate::platforms::pinterest::PinterestService;
use crate::platforms::threads::ThreadsService;
use crate::platforms::tiktok::TikTokService;
use crate::platforms::youtube::YouTubeService;

/// Every platform service, constructed once at startup over a shared gateway.
#[derive(Clone)]
pub struct ServiceRegistry {
    pub tiktok: TikTokService,
    pub instagram: InstagramService,
    pub youtube: YouTubeService,
    pub meta_ads: MetaAdsService,
    pub threads: ThreadsService,
    pub linkedin: LinkedInService,
    pub pinterest: PinterestService,
}

impl ServiceRegistry {
    pub fn new(gateway: Arc<dyn ActorGateway>) -> Self {
        Self {
            tiktok: TikTokService::new(gateway.clone()),
            instagram: InstagramService::new(gateway.clone()),
            youtube: YouTubeService::new(gateway.clone()),
            meta_ads: MetaAdsService::new(gateway.clone()),
            threads: ThreadsService::new(gateway.clone()),
            linkedin: LinkedInService::new(gateway.clone()),
            pinterest: PinterestService::new(gateway),
        }
    }

    /// Run a platform's generic scrape from a raw JSON body.
    ///
    /// A body that does not fit the platform's request shape is a caller-input error.
    pub async fn scrape(&self, platform: Platform, body: Value) -> Result<ScrapeResponse, ScrapeError> {
        match platform {
            Platform::Tiktok => self.tiktok.scrape(&parse_body(body)?).await,
            Platform::Instagram => self.instagram.scrape(&parse_body(body)?).await,
            Platform::Youtube => self.youtube.scrape(&parse_body(body)?).await,
            Platform::MetaAds => self.meta_ads.scrape(&parse_body(body)?).await,
            Platform::Threads => self.threads.scrape(&parse_body(body)?).await,
            Platform::Linkedin => self.linkedin.scrape(&parse_body(body)?).await,
            Platform::Pinterest => self.pinterest.scrape(&parse_body(body)?).await,
        }
    }
}

/// Deserialize a request body, reporting a shape mismatch as a caller-input error.
pub fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, ScrapeError> {
    serde_json::from_value(body).map_err(|e| ScrapeError::Validation(format!("Invalid request body: {e}")))
}
