use std::time::Duration;

use crate::error::ProcessingError;

pub const DEFAULT_STATUS_PAGE_URL: &str =
    "https://www.mvcr.cz/mvcren/article/status-of-your-application.aspx";
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://www.mvcr.cz/mvcren/";
pub const DEFAULT_DOWNLOAD_LINK_SELECTOR: &str = "a.dark";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Upstream locations and the link heuristic used by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub status_page_url: String,
    /// Prefix the scraped `href` is appended to, verbatim.
    pub download_base_url: String,
    pub link_selector: String,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            status_page_url: DEFAULT_STATUS_PAGE_URL.to_string(),
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            link_selector: DEFAULT_DOWNLOAD_LINK_SELECTOR.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("status-fetch-lambda/{}", env!("CARGO_PKG_VERSION"))
}

impl FetcherConfig {
    /// Builds a config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ProcessingError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProcessingError> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let http_timeout = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|error| {
                    ProcessingError::Configuration(format!(
                        "HTTP_TIMEOUT_SECS must be a positive integer: {error}"
                    ))
                })?;
                if secs == 0 {
                    return Err(ProcessingError::Configuration(
                        "HTTP_TIMEOUT_SECS must be a positive integer".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.http_timeout,
        };

        Ok(Self {
            status_page_url: non_empty("STATUS_PAGE_URL").unwrap_or(defaults.status_page_url),
            download_base_url: non_empty("DOWNLOAD_BASE_URL")
                .unwrap_or(defaults.download_base_url),
            link_selector: non_empty("DOWNLOAD_LINK_SELECTOR").unwrap_or(defaults.link_selector),
            http_timeout,
            user_agent: non_empty("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        })
    }
}
