//! # Encyclopedia Port
//!
//! Trait for the remote lookup service.
//!
//! Two operations: fetch a page summary by exact title, and free-text
//! search for the best-matching title. Both are fallible network
//! boundaries; the pipeline treats every failure here as "this step
//! produced nothing", never as a fatal error.

/// Classification tag marking a page that points at several topics
pub const DISAMBIGUATION: &str = "disambiguation";

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// A fetched page summary, before the usability check
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    /// Canonical article title
    pub title: String,

    /// Introductory extract text (may be empty)
    pub extract: String,

    /// Thumbnail image URL, when the article has one
    pub thumbnail: Option<String>,

    /// Canonical desktop page URL
    pub page_url: Option<String>,

    /// Page classification tag; `"disambiguation"` is the sentinel
    pub kind: Option<String>,
}

impl PageSummary {
    /// Whether this summary can be shown: non-empty extract and not a
    /// disambiguation page
    pub fn is_usable(&self) -> bool {
        !self.extract.is_empty() && self.kind.as_deref() != Some(DISAMBIGUATION)
    }
}

/// Errors that can occur during lookup operations
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The remote call could not complete (network, timeout)
    Transport(String),

    /// The service answered with a non-success status
    Status(u16),

    /// The response body did not match the expected shape
    Decode(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Transport(msg) => write!(f, "Transport error: {}", msg),
            LookupError::Status(code) => write!(f, "Service answered with status {}", code),
            LookupError::Decode(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

/// Trait for the remote encyclopedia service
///
/// Client adapters implement this trait.
pub trait Encyclopedia: Send {
    /// Fetch the summary for an exact article title
    fn summary(&self, title: &str) -> LookupResult<PageSummary>;

    /// Free-text search; returns the best-matching title, if any
    fn search(&self, query: &str) -> LookupResult<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(extract: &str, kind: Option<&str>) -> PageSummary {
        PageSummary {
            title: "T".to_string(),
            extract: extract.to_string(),
            thumbnail: None,
            page_url: None,
            kind: kind.map(str::to_string),
        }
    }

    #[test]
    fn test_usable_summary() {
        assert!(summary("Some text.", None).is_usable());
        assert!(summary("Some text.", Some("standard")).is_usable());
    }

    #[test]
    fn test_empty_extract_is_unusable() {
        assert!(!summary("", None).is_usable());
    }

    #[test]
    fn test_disambiguation_is_unusable() {
        assert!(!summary("Several topics share this name.", Some(DISAMBIGUATION)).is_usable());
    }
}
