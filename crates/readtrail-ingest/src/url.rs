//! URL validation, run before any network call.

use readtrail_core::IngestError;
use reqwest::Url;

/// Parse an image URL, accepting only absolute `http`/`https` URLs.
pub fn parse_image_url(input: &str) -> Result<Url, IngestError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(IngestError::InvalidUrl("URL is empty".to_string()));
    }

    let parsed = Url::parse(input)
        .map_err(|e| IngestError::InvalidUrl(format!("{}: {}", input, e)))?;

    // Only allow HTTP/HTTPS
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(IngestError::InvalidUrl(format!(
            "only HTTP and HTTPS URLs are allowed, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(parsed)
}

pub fn is_valid_image_url(input: &str) -> bool {
    parse_image_url(input).is_ok()
}

/// Untyped variant for callers holding arbitrary JSON input.
/// Anything that is not a string is rejected.
pub fn is_valid_image_url_value(input: &serde_json::Value) -> bool {
    input.as_str().is_some_and(is_valid_image_url)
}
