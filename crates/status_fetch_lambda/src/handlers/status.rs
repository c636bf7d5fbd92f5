use serde_json::Value;
use status_fetch_core::config::FetcherConfig;
use status_fetch_core::contract::{ApiResponse, QueryParameters, SpreadsheetSummary};
use status_fetch_core::error::ProcessingError;
use status_fetch_core::link::extract_download_link;
use status_fetch_core::workbook::summarize_workbook;
use tracing::{debug, error, info};

use crate::adapters::fetch::PageFetcher;

/// Scrapes the status page for the current spreadsheet and summarizes it.
#[derive(Debug, Clone)]
pub struct StatusFileFetcher<F> {
    config: FetcherConfig,
    fetcher: F,
}

impl<F: PageFetcher> StatusFileFetcher<F> {
    pub fn new(config: FetcherConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Runs the whole pipeline once. Never fails: every error becomes a 500.
    ///
    /// Query parameters are accepted for interface compatibility and have no
    /// effect on processing.
    pub async fn handle(&self, query_parameters: &QueryParameters) -> ApiResponse {
        debug!(
            parameter_count = query_parameters.len(),
            "status request received"
        );

        let result = self.fetch_summary().await;
        match &result {
            Ok(summary) => info!(pages = %summary.pages, "status request completed"),
            Err(failure) => error!(
                error_kind = failure.kind(),
                error = %failure,
                "status request failed"
            ),
        }
        ApiResponse::from(result)
    }

    /// Decodes an API Gateway proxy event and runs [`Self::handle`].
    pub async fn handle_event(&self, event: &Value) -> ApiResponse {
        self.handle(&query_parameters_from_event(event)).await
    }

    async fn fetch_summary(&self) -> Result<SpreadsheetSummary, ProcessingError> {
        let page = self.fetcher.fetch_text(&self.config.status_page_url).await?;
        debug!(
            url = %self.config.status_page_url,
            bytes = page.len(),
            "status page fetched"
        );

        let link = extract_download_link(
            &page,
            &self.config.link_selector,
            &self.config.download_base_url,
        )?;
        info!(url = %link, "download link resolved");

        let file = self.fetcher.fetch_bytes(&link).await?;
        debug!(bytes = file.len(), "spreadsheet downloaded");

        summarize_workbook(&file)
    }
}

/// Reads `queryStringParameters` from a proxy event.
///
/// Missing, `null` or non-object values yield an empty map; non-string entries
/// are skipped.
pub fn query_parameters_from_event(event: &Value) -> QueryParameters {
    event
        .get("queryStringParameters")
        .and_then(Value::as_object)
        .map(|parameters| {
            parameters
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .as_str()
                        .map(|text| (name.clone(), text.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::adapters::fetch::HttpPageFetcher;

    #[test]
    fn exposes_the_config_it_was_built_with() {
        let config = FetcherConfig {
            link_selector: "a.download".to_string(),
            ..FetcherConfig::default()
        };
        let fetcher = HttpPageFetcher::new(&config).expect("client should build");

        let handler = StatusFileFetcher::new(config.clone(), fetcher);

        assert_eq!(handler.config(), &config);
    }

    #[test]
    fn reads_string_query_parameters() {
        let event = json!({
            "httpMethod": "GET",
            "queryStringParameters": {"lang": "en", "ref": "home"}
        });

        let parameters = query_parameters_from_event(&event);
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters.get("lang").map(String::as_str), Some("en"));
    }

    #[test]
    fn null_query_parameters_are_empty() {
        let event = json!({"queryStringParameters": null});
        assert!(query_parameters_from_event(&event).is_empty());
    }

    #[test]
    fn missing_query_parameters_are_empty() {
        assert!(query_parameters_from_event(&json!({})).is_empty());
        assert!(query_parameters_from_event(&json!("not an object")).is_empty());
    }

    #[test]
    fn skips_non_string_values() {
        let event = json!({"queryStringParameters": {"page": 2, "lang": "cs"}});
        let parameters = query_parameters_from_event(&event);
        assert_eq!(parameters.len(), 1);
        assert!(parameters.contains_key("lang"));
    }
}
