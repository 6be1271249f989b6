use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApifyError>;

#[derive(Debug, Error)]
pub enum ApifyError {
    #[error("Apify request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Apify API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid Apify response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The run reached a terminal status other than `SUCCEEDED`.
    #[error("Actor run {run_id} finished with status {status}")]
    RunFailed { run_id: String, status: String },
}
