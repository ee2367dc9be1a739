//! # marque-fetch
//!
//! Page title scraping for marque.
//!
//! Fetches a URL with a short total timeout and extracts the page title
//! from the HTML: the `<title>` element is preferred, with a
//! `<meta name="title" content="...">` fallback.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

use marque_core::defaults::{FETCH_TIMEOUT_SECS, FETCH_USER_AGENT};
use marque_core::{validate_url, Error, Result};

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("title regex is valid")
});

static META_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']title["'][^>]*content=["']([^"']+)["']"#)
        .expect("meta title regex is valid")
});

/// Extract a page title from raw HTML.
///
/// Prefers the `<title>` element; falls back to a `<meta name="title">`
/// tag. Results are whitespace-trimmed; a blank title yields `None`.
pub fn extract_title(html: &str) -> Option<String> {
    let from_title = TITLE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty());

    if let Some(title) = from_title {
        return Some(title.to_string());
    }

    META_TITLE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
}

/// Scrapes page titles over HTTP.
pub struct TitleFetcher {
    client: Client,
    timeout_secs: u64,
}

impl TitleFetcher {
    /// Create a new fetcher with the default 5-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT_SECS)
    }

    /// Create a new fetcher with a custom total timeout (seconds).
    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(FETCH_USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            timeout_secs,
        }
    }

    /// Create from environment variables.
    ///
    /// `MARQUE_FETCH_TIMEOUT_SECS` overrides the default timeout.
    pub fn from_env() -> Self {
        let timeout_secs = std::env::var("MARQUE_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(FETCH_TIMEOUT_SECS);
        Self::with_timeout(timeout_secs)
    }

    /// The configured total timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Fetch a URL and extract its page title.
    ///
    /// Returns `Ok(None)` when the page loads but carries no usable title.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` for malformed or non-http(s) URLs
    /// - `Error::Fetch` for upstream non-success status, timeouts, and
    ///   transport failures
    pub async fn fetch_title(&self, url: &str) -> Result<Option<String>> {
        validate_url(url).map_err(Error::InvalidInput)?;

        let response = self.client.get(url.trim()).send().await.map_err(|e| {
            warn!(
                subsystem = "fetch",
                component = "title_fetcher",
                url,
                error = %e,
                "Page fetch failed"
            );
            if e.is_timeout() {
                Error::Fetch(format!(
                    "Timed out fetching page after {}s",
                    self.timeout_secs
                ))
            } else {
                Error::Fetch(format!("Failed to fetch page: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "Failed to fetch page: upstream returned {}",
                status
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("Failed to read page body: {}", e)))?;

        let title = extract_title(&html);
        debug!(
            subsystem = "fetch",
            component = "title_fetcher",
            op = "fetch_title",
            url,
            success = title.is_some(),
            "Title extraction complete"
        );
        Ok(title)
    }
}

impl Default for TitleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_extract_title_basic() {
        let html = "<html><head><title>Example Domain</title></head></html>";
        assert_eq!(extract_title(html), Some("Example Domain".to_string()));
    }

    #[test]
    fn test_extract_title_trims_whitespace() {
        let html = "<title>  Padded Title  </title>";
        assert_eq!(extract_title(html), Some("Padded Title".to_string()));
    }

    #[test]
    fn test_extract_title_with_attributes_and_mixed_case() {
        let html = r#"<TITLE data-rh="true">Attributed</TITLE>"#;
        assert_eq!(extract_title(html), Some("Attributed".to_string()));
    }

    #[test]
    fn test_extract_title_meta_fallback() {
        let html = r#"<head><meta name="title" content="Meta Title"></head>"#;
        assert_eq!(extract_title(html), Some("Meta Title".to_string()));
    }

    #[test]
    fn test_extract_title_prefers_title_element() {
        let html = r#"<title>Element</title><meta name="title" content="Meta">"#;
        assert_eq!(extract_title(html), Some("Element".to_string()));
    }

    #[test]
    fn test_extract_title_blank_title_falls_back_to_meta() {
        let html = r#"<title>   </title><meta name="title" content="Meta">"#;
        assert_eq!(extract_title(html), Some("Meta".to_string()));
    }

    #[test]
    fn test_extract_title_none_when_absent() {
        assert_eq!(extract_title("<html><body>No title</body></html>"), None);
        assert_eq!(extract_title(""), None);
    }

    #[tokio::test]
    async fn test_fetch_title_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><title>Mocked Page</title></html>"),
            )
            .mount(&server)
            .await;

        let fetcher = TitleFetcher::new();
        let title = fetcher
            .fetch_title(&format!("{}/page", server.uri()))
            .await
            .expect("fetch should succeed");
        assert_eq!(title, Some("Mocked Page".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_title_untitled_page_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bare"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let fetcher = TitleFetcher::new();
        let title = fetcher
            .fetch_title(&format!("{}/bare", server.uri()))
            .await
            .expect("fetch should succeed");
        assert_eq!(title, None);
    }

    #[tokio::test]
    async fn test_fetch_title_upstream_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = TitleFetcher::new();
        let err = fetcher
            .fetch_title(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_title_times_out_on_slow_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<title>Too Late</title>")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let fetcher = TitleFetcher::with_timeout(1);
        let err = fetcher
            .fetch_title(&format!("{}/slow", server.uri()))
            .await
            .unwrap_err();
        match err {
            Error::Fetch(msg) => assert!(msg.contains("Timed out")),
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_title_rejects_invalid_url() {
        let fetcher = TitleFetcher::new();
        let err = fetcher.fetch_title("not a url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = fetcher.fetch_title("ftp://example.com").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
