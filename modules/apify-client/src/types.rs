use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    /// Absent until the platform has provisioned the run's default dataset.
    #[serde(rename = "defaultDatasetId", default)]
    pub default_dataset_id: Option<String>,
    #[serde(rename = "startedAt", default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt", default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunData {
    pub fn run_status(&self) -> RunStatus {
        RunStatus::from_str(&self.status)
    }
}

/// Lifecycle state of an actor run as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    TimingOut,
    TimedOut,
    Aborting,
    Aborted,
    Unknown(String),
}

impl RunStatus {
    fn from_str(s: &str) -> Self {
        match s {
            "READY" => Self::Ready,
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "TIMING-OUT" => Self::TimingOut,
            "TIMED-OUT" => Self::TimedOut,
            "ABORTING" => Self::Aborting,
            "ABORTED" => Self::Aborted,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// True once the run can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::TimedOut | Self::Aborted
        )
    }
}

/// A start URL entry, the shape most scraping actors accept in `startUrls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartUrl {
    pub url: String,
}

impl StartUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Proxy settings understood by Apify actors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(rename = "useApifyProxy")]
    pub use_apify_proxy: bool,
    #[serde(
        rename = "apifyProxyGroups",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub apify_proxy_groups: Option<Vec<String>>,
}

impl ProxyConfig {
    /// Apify's shared datacenter proxy pool.
    pub fn apify() -> Self {
        Self {
            use_apify_proxy: true,
            apify_proxy_groups: None,
        }
    }

    /// Apify proxy restricted to the residential group.
    pub fn residential() -> Self {
        Self {
            use_apify_proxy: true,
            apify_proxy_groups: Some(vec!["RESIDENTIAL".to_string()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_data_tolerates_missing_dataset() {
        let run: RunData =
            serde_json::from_str(r#"{"id":"abc","status":"READY"}"#).unwrap();
        assert_eq!(run.id, "abc");
        assert!(run.default_dataset_id.is_none());
        assert!(!run.run_status().is_terminal());
    }

    #[test]
    fn terminal_statuses() {
        assert!(RunStatus::from_str("SUCCEEDED").is_terminal());
        assert!(RunStatus::from_str("TIMED-OUT").is_terminal());
        assert!(!RunStatus::from_str("TIMING-OUT").is_terminal());
        assert_eq!(
            RunStatus::from_str("WEIRD"),
            RunStatus::Unknown("WEIRD".to_string())
        );
    }

    #[test]
    fn residential_proxy_serializes_group() {
        let value = serde_json::to_value(ProxyConfig::residential()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"useApifyProxy": true, "apifyProxyGroups": ["RESIDENTIAL"]})
        );
        let value = serde_json::to_value(ProxyConfig::apify()).unwrap();
        assert_eq!(value, serde_json::json!({"useApifyProxy": true}));
    }
}
