use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use scrapegate_api::{router, AppState};
use scrapegate_common::Config;
use scrapegate_jobs::JobQueue;
use scrapegate_platforms::testing::{records, MockGateway};
use scrapegate_platforms::ServiceRegistry;

fn app(gateway: MockGateway) -> (Arc<MockGateway>, Router) {
    let gateway = Arc::new(gateway);
    let config = Config::for_token("test-token");
    let state = Arc::new(AppState {
        services: ServiceRegistry::new(gateway.clone()),
        jobs: JobQueue::start(gateway.clone(), &config),
    });
    (gateway, router(state))
}

fn with_dataset(n: usize) -> MockGateway {
    MockGateway::new()
        .with_run(Some("run-1"), Some("ds-1"))
        .on_dataset("ds-1", records(n))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// --- Meta routes ---

#[tokio::test]
async fn health_reports_healthy() {
    let (_, app) = app(MockGateway::new());
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy"}));
}

#[tokio::test]
async fn root_lists_every_platform() {
    let (_, app) = app(MockGateway::new());
    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Social Media Scraper API");
    assert_eq!(
        body["platforms"],
        json!(["tiktok", "instagram", "youtube", "meta_ads", "threads", "linkedin", "pinterest"])
    );
}

#[tokio::test]
async fn platforms_describes_endpoints() {
    let (_, app) = app(MockGateway::new());
    let (_, body) = send(&app, get("/platforms")).await;
    assert_eq!(
        body["platforms"]["meta_ads"]["endpoints"],
        json!(["/page", "/search", "/political", "/scrape"])
    );
    assert_eq!(
        body["platforms"]["pinterest"]["description"],
        "Pinterest pins, boards, and profiles"
    );
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (_, app) = app(MockGateway::new());
    let request = Request::builder()
        .uri("/health")
        .header("origin", "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

// --- Platform routes ---

#[tokio::test]
async fn tiktok_hashtag_returns_envelope() {
    let (gateway, app) = app(with_dataset(3));

    let (status, body) = send(&app, get("/api/v1/tiktok/hashtag/dance")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["totalResults"], 3);
    assert_eq!(body["runId"], "run-1");
    assert_eq!(body["data"][0], json!({"id": "item-0"}));
    assert_eq!(
        gateway.invocations(),
        vec![(
            "clockworks/tiktok-scraper".to_string(),
            json!({"hashtags": ["dance"], "resultsPerPage": 10})
        )]
    );
}

#[tokio::test]
async fn out_of_range_limit_is_bad_request() {
    let (gateway, app) = app(MockGateway::new());

    let (status, body) = send(&app, get("/api/v1/tiktok/hashtag/dance?limit=500")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "resultsPerPage must be between 1 and 100, got 500");
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn missing_query_parameter_is_bad_request() {
    let (gateway, app) = app(MockGateway::new());

    let (status, body) = send(&app, get("/api/v1/youtube/search")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "q query parameter is required");
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn remote_failure_is_server_error() {
    let (_, app) = app(MockGateway::new().failing("Actor run r1 finished with status FAILED"));

    let (status, body) = send(&app, get("/api/v1/threads/profile/zuck")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Actor run r1 finished with status FAILED");
}

#[tokio::test]
async fn failed_dataset_fetch_is_server_error() {
    let (gateway, app) = app(MockGateway::new().with_run(Some("r"), Some("missing")));

    let (status, body) = send(&app, get("/api/v1/tiktok/hashtag/dance")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("missing"));
    assert!(body.get("success").is_none());
    assert_eq!(gateway.fetch_count(), 1);
}

#[tokio::test]
async fn undecodable_query_is_bad_request_with_detail() {
    let (gateway, app) = app(MockGateway::new());

    for uri in [
        "/api/v1/tiktok/hashtag/dance?limit=abc",
        "/api/v1/tiktok/search?q=dance&searchType=bogus",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["detail"].is_string(), "{uri}: {body}");
    }
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn body_without_json_content_type_is_bad_request_with_detail() {
    let (gateway, app) = app(MockGateway::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/tiktok/scrape")
        .body(Body::from(r#"{"hashtags": ["dance"]}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn youtube_channel_flags_reach_actor_input() {
    let (gateway, app) = app(MockGateway::new());

    let (status, _) = send(
        &app,
        get("/api/v1/youtube/channel?url=https://www.youtube.com/@rust&limit=5&includeShorts=false"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let input = gateway.last_input().unwrap();
    assert_eq!(
        input["startUrls"],
        json!([{"url": "https://www.youtube.com/@rust/videos"}])
    );
    assert_eq!(input["maxResults"], 5);
    assert_eq!(input["maxResultsShorts"], 0);
    assert_eq!(input["maxResultStreams"], 5);
}

#[tokio::test]
async fn meta_ads_political_defaults_to_us() {
    let (gateway, app) = app(MockGateway::new());

    let (status, _) = send(&app, get("/api/v1/meta-ads/political")).await;

    assert_eq!(status, StatusCode::OK);
    let input = gateway.last_input().unwrap();
    assert_eq!(input["country"], "US");
    assert_eq!(input["adType"], "political_and_issue_ads");
    assert_eq!(input["searchTerms"], json!(["*"]));
}

#[tokio::test]
async fn instagram_search_kind_selects_search_type() {
    let (gateway, app) = app(MockGateway::new());

    let (status, _) = send(&app, get("/api/v1/instagram/search/places?q=paris")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(gateway.last_input().unwrap()["searchType"], "place");

    let (status, _) = send(&app, get("/api/v1/instagram/search/cities?q=paris")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(gateway.invocation_count(), 1);
}

#[tokio::test]
async fn instagram_profiles_body_requires_usernames() {
    let (gateway, app) = app(MockGateway::new());

    let (status, body) = send(
        &app,
        post_json("/api/v1/instagram/profiles", json!({"usernames": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "usernames must be provided");
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn instagram_profiles_uses_profile_actor() {
    let (gateway, app) = app(with_dataset(1));

    let (status, body) = send(
        &app,
        post_json("/api/v1/instagram/profiles", json!({"usernames": ["natgeo"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalResults"], 1);
    assert_eq!(
        gateway.last_actor().as_deref(),
        Some("apify/instagram-profile-scraper")
    );
}

// --- Generic scrape ---

#[tokio::test]
async fn generic_scrape_accepts_both_meta_ads_spellings() {
    let (gateway, app) = app(MockGateway::new());

    for uri in ["/api/v1/meta-ads/scrape", "/api/v1/meta_ads/scrape"] {
        let (status, _) = send(&app, post_json(uri, json!({"searchTerms": ["shoes"]}))).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
    assert_eq!(gateway.invocation_count(), 2);
    assert_eq!(
        gateway.last_actor().as_deref(),
        Some("apify/facebook-ads-scraper")
    );
}

#[tokio::test]
async fn generic_scrape_platform_key_is_case_insensitive() {
    let (gateway, app) = app(MockGateway::new());

    let (status, body) = send(
        &app,
        post_json("/api/v1/TikTok/scrape", json!({"hashtags": ["dance"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        gateway.last_actor().as_deref(),
        Some("clockworks/tiktok-scraper")
    );
}

#[tokio::test]
async fn generic_scrape_with_malformed_json_is_bad_request() {
    let (gateway, app) = app(MockGateway::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/meta_ads/scrape")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().starts_with("Invalid JSON body"));
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn generic_scrape_with_empty_body_is_bad_request() {
    let (gateway, app) = app(MockGateway::new());

    let (status, body) = send(&app, post_json("/api/v1/pinterest/scrape", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "At least one of pinUrls, boardUrls, profileUrls, or searchQueries must be provided"
    );
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn unknown_platform_is_not_found() {
    let (_, app) = app(MockGateway::new());

    let (status, body) = send(&app, post_json("/api/v1/myspace/scrape", json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Unknown platform: myspace");
}

// --- Jobs ---

#[tokio::test]
async fn job_runs_and_reports_result() {
    let (_, app) = app(with_dataset(2));

    let (status, submission) = send(
        &app,
        post_json("/api/v1/jobs/tiktok/hashtag", json!({"hashtag": "dance"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submission["status"], "PENDING");
    let job_id = submission["job_id"].as_str().unwrap().to_string();
    assert_eq!(
        submission["message"],
        format!("Job submitted. Check status at /api/v1/jobs/{job_id}")
    );

    let mut body = Value::Null;
    for _ in 0..200 {
        let (_, status) = send(&app, get(&format!("/api/v1/jobs/{job_id}"))).await;
        body = status;
        if body["status"] == "SUCCESS" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["job_id"], job_id);
    assert_eq!(body["result"]["totalResults"], 2);
    assert!(body["error"].is_null());
}

#[tokio::test]
async fn invalid_job_is_rejected() {
    let (gateway, app) = app(MockGateway::new());

    let (status, body) = send(
        &app,
        post_json("/api/v1/jobs/youtube/search", json!({"query": "lofi", "limit": 51})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "limit must be between 1 and 50, got 51");
    assert_eq!(gateway.invocation_count(), 0);
}

#[tokio::test]
async fn unknown_job_is_expired() {
    let (_, app) = app(MockGateway::new());

    let (status, body) = send(
        &app,
        get("/api/v1/jobs/6f1c2d9e-0d7a-4b5e-9a44-3f2b1c0d9e8f"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "EXPIRED");
    assert_eq!(body["error"], "Job result not found or expired");
    assert!(body["result"].is_null());
}
