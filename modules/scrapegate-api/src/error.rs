use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use scrapegate_common::ScrapeError;

/// Error surfaced by a handler, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Scrape(ScrapeError),
    /// Query string or body that could not be decoded.
    BadRequest(String),
    UnknownPlatform(String),
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Scrape(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Scrape(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnknownPlatform(_) | ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Scrape(e) => e.to_string(),
            ApiError::BadRequest(message) => message.clone(),
            ApiError::UnknownPlatform(key) => format!("Unknown platform: {key}"),
            ApiError::NotFound => "Not Found".to_string(),
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(e: ScrapeError) -> Self {
        ApiError::Scrape(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

/// Render a service result, logging the failure under `context`.
pub fn respond<T: Serialize>(result: Result<T, ScrapeError>, context: &str) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) if e.is_validation() => {
            warn!(error = %e, "{context}: rejected request");
            ApiError::Scrape(e).into_response()
        }
        Err(e) => {
            warn!(error = %e, "{context}: scrape failed");
            ApiError::Scrape(e).into_response()
        }
    }
}

/// A query parameter that must be present and non-blank.
pub fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ScrapeError::validation(format!("{name} query parameter is required")).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::from(ScrapeError::validation("hashtags must be provided"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "hashtags must be provided");
    }

    #[test]
    fn remote_failure_maps_to_server_error() {
        let err = ApiError::from(ScrapeError::from(anyhow::anyhow!("Actor run r1 finished with status FAILED")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "Actor run r1 finished with status FAILED");
    }

    #[test]
    fn undecodable_input_is_bad_request() {
        let err = ApiError::BadRequest("Failed to deserialize query string".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "Failed to deserialize query string");
    }

    #[test]
    fn unknown_platform_is_not_found() {
        let err = ApiError::UnknownPlatform("myspace".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Unknown platform: myspace");
    }

    #[test]
    fn blank_query_parameter_is_rejected() {
        assert!(required(Some("  ".into()), "q").is_err());
        assert!(required(None, "url").is_err());
        assert_eq!(required(Some("lofi".into()), "q").unwrap(), "lofi");
    }
}
