use serde_json::json;
use thiserror::Error;

/// Centralized error type for the scrape pipeline
///
/// Every failure the handler can produce is a variant here; the web layer
/// turns it into an HTTP status plus a structured JSON body via
/// [`ScrapeError::status`] and [`ScrapeError::body`]. Nothing is retried —
/// the caller decides whether a retry makes sense.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No username left after trimming and stripping a leading `@`
    #[error("Missing user parameter")]
    MissingUser,

    /// Upstream returned a non-success status
    #[error("Upstream request failed with status {status}")]
    UpstreamStatus {
        status: u16,
        /// Truncated upstream body, for diagnostics
        snippet: String,
    },

    /// None of the known embedding patterns matched the page. Expected when
    /// the platform changes its page format, not a crash.
    #[error("No embedded JSON found in page")]
    NoEmbeddedJson {
        /// Truncated page text, for diagnostics
        snippet: String,
    },

    /// Both the direct and the repaired parse failed
    #[error("Embedded JSON failed to parse: {message}")]
    Parse { message: String },

    /// Parsed fine but no item records survived extraction
    #[error("No video items found")]
    NoItems {
        /// Top-level keys of the parsed structure, for diagnostics
        keys: Vec<String>,
    },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ScrapeError {
    /// HTTP status for this error.
    ///
    /// Upstream statuses are floored at 500 so a 403/404 from the platform
    /// never reads as a client error of ours.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingUser => 400,
            Self::UpstreamStatus { status, .. } => (*status).max(500),
            Self::NoEmbeddedJson { .. } => 422,
            Self::Parse { .. } => 500,
            Self::NoItems { .. } => 422,
            Self::Http(_) => 500,
        }
    }

    /// Structured JSON body describing the failure.
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::MissingUser => json!({ "error": "Missing user parameter" }),
            Self::UpstreamStatus { status, snippet } => json!({
                "error": "Upstream fetch failed",
                "status": status,
                "body": snippet,
            }),
            Self::NoEmbeddedJson { snippet } => json!({
                "error": "No embedded JSON found in page",
                "html": snippet,
            }),
            Self::Parse { message } => json!({
                "error": "Failed to parse embedded JSON",
                "detail": message,
            }),
            Self::NoItems { keys } => json!({
                "error": "No video items found",
                "keys": keys,
            }),
            Self::Http(e) => json!({
                "error": "Upstream fetch failed",
                "detail": e.to_string(),
            }),
        }
    }
}

/// Type alias for Result with ScrapeError
pub type ScrapeResult<T> = Result<T, ScrapeError>;
