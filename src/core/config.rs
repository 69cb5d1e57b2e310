use std::env;

/// Runtime configuration, read from the environment once at startup.
///
/// The scrape handler never touches the environment directly; everything it
/// needs is resolved here and carried in the server state, which keeps the
/// handler pure and testable.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional proxy URL prefix.
    ///
    /// When set, the profile URL is URL-encoded and appended to this prefix
    /// and the combined URL is fetched instead of the profile URL itself.
    /// Read from PROXY_PREFIX; empty or unset means direct fetch.
    pub proxy_prefix: Option<String>,

    /// Port for the HTTP server.
    /// Read from PORT; default 3000.
    pub port: u16,

    /// Log file path.
    /// Read from LOG_FILE_PATH; default app.log.
    pub log_file_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let proxy_prefix = env::var("PROXY_PREFIX")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let log_file_path = env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string());

        Self {
            proxy_prefix,
            port,
            log_file_path,
        }
    }
}

/// Network configuration
pub mod network {
    use std::time::Duration;

    /// Timeout for the outbound profile fetch (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Extraction limits
pub mod limits {
    /// Maximum number of items returned per profile
    pub const MAX_ITEMS: usize = 30;

    /// Upstream body snippet length (chars) carried in fetch error responses
    pub const BODY_SNIPPET_CHARS: usize = 800;

    /// Page snippet length (chars) carried in extraction error responses
    pub const HTML_SNIPPET_CHARS: usize = 1200;

    /// Parse-error message length (chars) carried in parse error responses
    pub const PARSE_ERROR_CHARS: usize = 400;

    /// Top-level keys of the parsed structure included in the
    /// empty-result response
    pub const TOP_KEYS_SHOWN: usize = 20;

    /// Recursion depth guard for the heuristic item search
    pub const MAX_SEARCH_DEPTH: usize = 64;
}
