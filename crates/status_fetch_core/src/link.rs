use scraper::{Html, Selector};

use crate::error::ProcessingError;

/// Resolves the spreadsheet download link from the status page markup.
///
/// The first element matching `selector` wins. Its `href` is appended to
/// `base_url` as-is; no URL normalization is applied.
pub fn extract_download_link(
    html: &str,
    selector: &str,
    base_url: &str,
) -> Result<String, ProcessingError> {
    let parsed_selector = Selector::parse(selector).map_err(|error| {
        ProcessingError::Configuration(format!("invalid link selector '{selector}': {error}"))
    })?;

    let document = Html::parse_document(html);
    let href = document
        .select(&parsed_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .ok_or_else(|| ProcessingError::link_not_found(selector))?;

    Ok(format!("{base_url}{href}"))
}
