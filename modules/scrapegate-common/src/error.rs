use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The caller's request is missing a target or carries an out-of-range value.
    #[error("{0}")]
    Validation(String),

    /// The remote actor run or dataset fetch failed.
    #[error("{0}")]
    Remote(#[from] anyhow::Error),
}

impl ScrapeError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
