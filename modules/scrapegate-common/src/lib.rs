pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::ScrapeError;
pub use types::*;
