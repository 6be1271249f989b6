use serde_json::Value;
use tracing::info;

use scrapegate_common::{ScrapeError, ScrapeResponse};

use crate::gateway::ActorGateway;

/// A typed, platform-specific scrape request.
///
/// `validate` and `build_input` are pure: no I/O, no clock, no hidden state.
/// Calling `build_input` twice on the same request yields equal objects.
pub trait ActorRequest: Send + Sync {
    /// The remote actor that serves this request.
    fn actor_id(&self) -> &'static str;

    /// Reject requests with no target selector or out-of-range values.
    fn validate(&self) -> Result<(), ScrapeError>;

    /// Translate the request into the actor's input object.
    fn build_input(&self) -> Value;
}

/// Validate, build, run the actor, and collect its dataset into the envelope.
///
/// Validation failures return before the gateway is touched. A run without a
/// dataset yields an empty, successful response.
pub async fn execute<R>(
    gateway: &dyn ActorGateway,
    request: &R,
) -> Result<ScrapeResponse, ScrapeError>
where
    R: ActorRequest + ?Sized,
{
    request.validate()?;

    let actor_id = request.actor_id();
    let input = request.build_input();
    info!(actor_id, "Starting actor run");

    let run = gateway.invoke(actor_id, &input).await?;

    let data = match run.default_dataset_id.as_deref() {
        Some(dataset_id) => gateway.fetch(dataset_id).await?,
        None => Vec::new(),
    };

    info!(
        actor_id,
        run_id = run.id.as_deref().unwrap_or("-"),
        count = data.len(),
        "Actor run finished"
    );
    Ok(ScrapeResponse::from_records(data, run.id))
}

// --- Validation helpers shared by the platform modules ---

/// Fail unless at least one named selector is present.
pub(crate) fn require_any(selectors: &[(&str, bool)]) -> Result<(), ScrapeError> {
    if selectors.iter().any(|(_, present)| *present) {
        return Ok(());
    }
    let names: Vec<&str> = selectors.iter().map(|(name, _)| *name).collect();
    let message = match names.as_slice() {
        [only] => format!("{only} must be provided"),
        [a, b] => format!("Either {a} or {b} must be provided"),
        [init @ .., last] => format!("At least one of {}, or {last} must be provided", init.join(", ")),
        [] => "A target must be provided".to_string(),
    };
    Err(ScrapeError::Validation(message))
}

/// A list selector only counts when it holds at least one entry.
pub(crate) fn present<T>(list: &[T]) -> bool {
    !list.is_empty()
}

pub(crate) fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), ScrapeError> {
    if value < min || value > max {
        return Err(ScrapeError::Validation(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn check_limit(field: &str, value: u32, max: u32) -> Result<(), ScrapeError> {
    check_range(field, value, 1, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{records, MockGateway};
    use serde_json::json;

    struct Sample {
        valid: bool,
    }

    impl ActorRequest for Sample {
        fn actor_id(&self) -> &'static str {
            "owner/sample"
        }

        fn validate(&self) -> Result<(), ScrapeError> {
            if self.valid {
                Ok(())
            } else {
                Err(ScrapeError::validation("sample needs a target"))
            }
        }

        fn build_input(&self) -> Value {
            json!({"sample": true})
        }
    }

    #[tokio::test]
    async fn invalid_request_never_reaches_gateway() {
        let gateway = MockGateway::new();
        let err = execute(&gateway, &Sample { valid: false }).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "sample needs a target");
        assert_eq!(gateway.invocation_count(), 0);
    }

    #[tokio::test]
    async fn envelope_reflects_fetched_dataset() {
        let gateway = MockGateway::new()
            .with_run(Some("run-42"), Some("ds-1"))
            .on_dataset("ds-1", records(3));

        let resp = execute(&gateway, &Sample { valid: true }).await.unwrap();

        assert!(resp.success);
        assert_eq!(resp.total_results, 3);
        assert_eq!(resp.data.len(), 3);
        assert_eq!(resp.run_id.as_deref(), Some("run-42"));
        assert_eq!(
            gateway.invocations(),
            vec![("owner/sample".to_string(), json!({"sample": true}))]
        );
    }

    #[tokio::test]
    async fn missing_dataset_is_an_empty_success() {
        let gateway = MockGateway::new().with_run(Some("run-7"), None);

        let resp = execute(&gateway, &Sample { valid: true }).await.unwrap();

        assert!(resp.success);
        assert!(resp.data.is_empty());
        assert_eq!(resp.total_results, 0);
        assert_eq!(gateway.fetch_count(), 0);
    }

    #[tokio::test]
    async fn missing_run_id_is_reported_as_absent() {
        let gateway = MockGateway::new().with_run(None, Some("ds-1")).on_dataset("ds-1", records(1));

        let resp = execute(&gateway, &Sample { valid: true }).await.unwrap();
        assert_eq!(resp.run_id, None);
        assert_eq!(resp.total_results, 1);
    }

    #[tokio::test]
    async fn gateway_failure_is_a_remote_error() {
        let gateway = MockGateway::new().failing("Actor run abc finished with status FAILED");

        let err = execute(&gateway, &Sample { valid: true }).await.unwrap_err();

        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Actor run abc finished with status FAILED");
    }

    #[tokio::test]
    async fn failed_dataset_fetch_yields_no_envelope() {
        let gateway = MockGateway::new().with_run(Some("r"), Some("missing"));

        let result = execute(&gateway, &Sample { valid: true }).await;

        let err = match result {
            Ok(resp) => panic!("expected an error, got {resp:?}"),
            Err(e) => e,
        };
        assert!(!err.is_validation());
        assert!(err.to_string().contains("missing"));
        assert_eq!(gateway.invocation_count(), 1);
        assert_eq!(gateway.fetch_count(), 1);
    }

    #[test]
    fn require_any_names_every_selector() {
        let err = require_any(&[("hashtags", false), ("profiles", false), ("videoUrls", false)])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "At least one of hashtags, profiles, or videoUrls must be provided"
        );

        let err = require_any(&[("usernames", false), ("profileUrls", false)]).unwrap_err();
        assert_eq!(err.to_string(), "Either usernames or profileUrls must be provided");

        assert!(require_any(&[("usernames", false), ("profileUrls", true)]).is_ok());
    }

    #[test]
    fn limits_are_inclusive() {
        assert!(check_limit("limit", 1, 100).is_ok());
        assert!(check_limit("limit", 100, 100).is_ok());
        assert!(check_limit("limit", 0, 100).is_err());
        assert_eq!(
            check_limit("resultsLimit", 201, 200).unwrap_err().to_string(),
            "resultsLimit must be between 1 and 200, got 201"
        );
    }
}
