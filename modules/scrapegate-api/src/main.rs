use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apify_client::ApifyClient;
use scrapegate_api::{router, AppState};
use scrapegate_common::Config;
use scrapegate_jobs::JobQueue;
use scrapegate_platforms::{ActorGateway, ServiceRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("scrapegate=info".parse()?)
        .add_directive("apify_client=info".parse()?);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }

    let config = Config::from_env()?;

    let gateway: Arc<dyn ActorGateway> = Arc::new(ApifyClient::with_base_url(
        config.apify_api_token.clone(),
        config.apify_base_url.clone(),
    ));
    let state = Arc::new(AppState {
        services: ServiceRegistry::new(gateway.clone()),
        jobs: JobQueue::start(gateway, &config),
    });
    let addr = config.bind_addr();
    let app = router(state);

    info!("Scraper API starting on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
