//! # Wikipedia Integration
//!
//! Client for the Wikipedia REST API, providing:
//! - Page summary fetch by exact title
//! - Free-text title search (first hit only)
//!
//! # Example
//! ```rust,ignore
//! let client = WikipediaClient::for_language("de");
//! let page = client.fetch_summary("Stadtmauer Rothenburg")?;
//! println!("{}", page.extract);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::ports::{Encyclopedia, LookupError, LookupResult, PageSummary};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_S: u64 = 10;

/// Wikipedia REST API client
pub struct WikipediaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_s: u64,
    search_limit: u32,
}

/// Summary response from the REST API
#[derive(Deserialize)]
struct SummaryResponse {
    title: String,
    #[serde(default)]
    extract: String,
    thumbnail: Option<Thumbnail>,
    content_urls: Option<ContentUrls>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct Thumbnail {
    source: String,
}

#[derive(Deserialize)]
struct ContentUrls {
    desktop: Option<DesktopUrls>,
}

#[derive(Deserialize)]
struct DesktopUrls {
    page: String,
}

/// Search response from the REST API
#[derive(Deserialize)]
struct SearchResponse {
    pages: Vec<SearchPage>,
}

#[derive(Deserialize)]
struct SearchPage {
    title: String,
}

impl From<SummaryResponse> for PageSummary {
    fn from(response: SummaryResponse) -> Self {
        Self {
            title: response.title,
            extract: response.extract,
            thumbnail: response.thumbnail.map(|t| t.source),
            page_url: response
                .content_urls
                .and_then(|c| c.desktop)
                .map(|d| d.page),
            kind: response.kind,
        }
    }
}

/// Wikipedia client errors
#[derive(Debug, thiserror::Error)]
pub enum WikipediaError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("No article titled '{0}'")]
    PageMissing(String),

    #[error("Status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Timeout after {0}s")]
    Timeout(u64),
}

impl From<WikipediaError> for LookupError {
    fn from(err: WikipediaError) -> Self {
        match err {
            WikipediaError::Connection(msg) => LookupError::Transport(msg),
            WikipediaError::Request(msg) => LookupError::Transport(msg),
            WikipediaError::PageMissing(_) => LookupError::Status(404),
            WikipediaError::Status(code) => LookupError::Status(code),
            WikipediaError::Decode(msg) => LookupError::Decode(msg),
            WikipediaError::Timeout(secs) => {
                LookupError::Transport(format!("timeout after {}s", secs))
            }
        }
    }
}

impl WikipediaClient {
    /// Create a client for an explicit base URL
    ///
    /// # Arguments
    /// * `base_url` - Wiki host (e.g., "https://de.wikipedia.org")
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_S))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_s: DEFAULT_TIMEOUT_S,
            search_limit: 1,
        }
    }

    /// Create a client for a language edition (e.g., "de", "en")
    pub fn for_language(language: &str) -> Self {
        Self::new(&format!("https://{}.wikipedia.org", language))
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_s(mut self, secs: u64) -> Self {
        self.timeout_s = secs;
        self.client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(secs))
            .build()
            .expect("Failed to create HTTP client");
        self
    }

    /// Set how many search hits to request (only the first is used)
    pub fn search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the summary for an exact article title
    pub fn fetch_summary(&self, title: &str) -> Result<PageSummary, WikipediaError> {
        let mut url = reqwest::Url::parse(&format!("{}/api/rest_v1/page/summary/", self.base_url))
            .map_err(|e| WikipediaError::Request(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| WikipediaError::Request("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(title);

        let response = self.client.get(url).send().map_err(|e| self.transport(e))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(WikipediaError::PageMissing(title.to_string()));
        }
        if !status.is_success() {
            return Err(WikipediaError::Status(status.as_u16()));
        }

        let summary: SummaryResponse = response
            .json()
            .map_err(|e| WikipediaError::Decode(e.to_string()))?;

        Ok(summary.into())
    }

    /// Search for the best-matching article title
    pub fn search_title(&self, query: &str) -> Result<Option<String>, WikipediaError> {
        let limit = self.search_limit.to_string();
        let response = self
            .client
            .get(format!("{}/w/rest.php/v1/search/title", self.base_url))
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WikipediaError::Status(status.as_u16()));
        }

        let results: SearchResponse = response
            .json()
            .map_err(|e| WikipediaError::Decode(e.to_string()))?;

        Ok(results.pages.into_iter().next().map(|p| p.title))
    }

    /// Check if the service answers at all
    pub fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/rest_v1/", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn transport(&self, err: reqwest::Error) -> WikipediaError {
        if err.is_connect() {
            WikipediaError::Connection(format!(
                "Cannot reach {}. Is the network up?",
                self.base_url
            ))
        } else if err.is_timeout() {
            WikipediaError::Timeout(self.timeout_s)
        } else {
            WikipediaError::Request(err.to_string())
        }
    }
}

impl Default for WikipediaClient {
    /// German edition; the boards this reads about are German
    fn default() -> Self {
        Self::for_language("de")
    }
}

impl Encyclopedia for WikipediaClient {
    fn summary(&self, title: &str) -> LookupResult<PageSummary> {
        self.fetch_summary(title).map_err(Into::into)
    }

    fn search(&self, query: &str) -> LookupResult<Option<String>> {
        self.search_title(query).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WikipediaClient::new("https://de.wikipedia.org/");
        assert_eq!(client.base_url(), "https://de.wikipedia.org");
    }

    #[test]
    fn test_for_language() {
        let client = WikipediaClient::for_language("en");
        assert_eq!(client.base_url(), "https://en.wikipedia.org");
    }

    #[test]
    fn test_builder_pattern() {
        let client = WikipediaClient::for_language("de")
            .timeout_s(30)
            .search_limit(5);
        assert_eq!(client.timeout_s, 30);
        assert_eq!(client.search_limit, 5);
    }

    #[test]
    fn test_search_limit_floor() {
        let client = WikipediaClient::for_language("de").search_limit(0);
        assert_eq!(client.search_limit, 1);
    }

    #[test]
    fn test_summary_response_decodes() {
        let json = r#"{
            "title": "Stadtmauer Rothenburg",
            "extract": "Die Stadtmauer...",
            "thumbnail": { "source": "https://upload.wikimedia.org/x.jpg" },
            "content_urls": { "desktop": { "page": "https://de.wikipedia.org/wiki/Stadtmauer_Rothenburg" } },
            "type": "standard"
        }"#;
        let response: SummaryResponse = serde_json::from_str(json).unwrap();
        let page = PageSummary::from(response);

        assert_eq!(page.title, "Stadtmauer Rothenburg");
        assert_eq!(page.extract, "Die Stadtmauer...");
        assert_eq!(
            page.thumbnail.as_deref(),
            Some("https://upload.wikimedia.org/x.jpg")
        );
        assert_eq!(page.kind.as_deref(), Some("standard"));
        assert!(page.is_usable());
    }

    #[test]
    fn test_summary_response_minimal_fields() {
        let json = r#"{ "title": "Leer" }"#;
        let response: SummaryResponse = serde_json::from_str(json).unwrap();
        let page = PageSummary::from(response);

        assert_eq!(page.extract, "");
        assert!(page.thumbnail.is_none());
        assert!(page.page_url.is_none());
        assert!(!page.is_usable());
    }

    #[test]
    fn test_search_response_decodes() {
        let json = r#"{ "pages": [ { "id": 1, "title": "Erster" }, { "id": 2, "title": "Zweiter" } ] }"#;
        let results: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            results.pages.into_iter().next().map(|p| p.title).as_deref(),
            Some("Erster")
        );
    }

    #[test]
    fn test_error_mapping_into_port_error() {
        let err: LookupError = WikipediaError::PageMissing("X".to_string()).into();
        assert_eq!(err, LookupError::Status(404));

        let err: LookupError = WikipediaError::Timeout(10).into();
        assert!(matches!(err, LookupError::Transport(_)));

        let err: LookupError = WikipediaError::Decode("bad json".to_string()).into();
        assert!(matches!(err, LookupError::Decode(_)));
    }
}
