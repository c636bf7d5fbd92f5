use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use status_fetch_core::config::FetcherConfig;
use status_fetch_core::contract::ApiResponse;
use status_fetch_lambda::adapters::fetch::HttpPageFetcher;
use status_fetch_lambda::handlers::status::StatusFileFetcher;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn handle_request(
    handler: &StatusFileFetcher<HttpPageFetcher>,
    event: LambdaEvent<Value>,
) -> Result<ApiResponse, Error> {
    info!(request_id = %event.context.request_id, "invocation started");
    Ok(handler.handle_event(&event.payload).await)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = FetcherConfig::from_env()?;
    let fetcher = HttpPageFetcher::new(&config)?;
    let handler = StatusFileFetcher::new(config, fetcher);
    let config = handler.config();
    info!(
        status_page_url = %config.status_page_url,
        download_base_url = %config.download_base_url,
        link_selector = %config.link_selector,
        http_timeout_secs = config.http_timeout.as_secs(),
        "status lambda configured"
    );

    let handler = &handler;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(handler, event).await
    }))
    .await
}
