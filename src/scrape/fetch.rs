//! Target URL construction and the outbound page fetch

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;

use crate::core::config::{self, AppConfig};
use crate::core::error::{ScrapeError, ScrapeResult};
use crate::core::utils::truncate_chars;

/// Browser-like User-Agent sent with the profile fetch. Desktop Chrome —
/// the platform serves the full hydration payload to desktop browsers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const ACCEPT_HEADER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE_HEADER: &str = "en-US,en;q=0.9";

const PROFILE_BASE: &str = "https://www.tiktok.com/@";

/// Build the shared HTTP client: redirects followed (reqwest default
/// policy), request timeout from config.
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().timeout(config::network::timeout()).build()
}

/// Normalize the incoming username: trim whitespace, strip one leading `@`,
/// trim again. An empty result is a validation error.
pub fn normalize_user(raw: &str) -> ScrapeResult<String> {
    let trimmed = raw.trim();
    let user = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();
    if user.is_empty() {
        return Err(ScrapeError::MissingUser);
    }
    Ok(user.to_string())
}

/// Build the URL actually fetched: the profile URL, routed through the
/// proxy prefix when one is configured.
pub fn build_fetch_url(config: &AppConfig, user: &str) -> String {
    let target = format!("{}{}", PROFILE_BASE, urlencoding::encode(user));
    match &config.proxy_prefix {
        Some(prefix) => format!("{}{}", prefix, urlencoding::encode(&target)),
        None => target,
    }
}

/// Fetch the profile page HTML for an already-normalized username.
///
/// Non-success upstream statuses become [`ScrapeError::UpstreamStatus`]
/// carrying a bounded body snippet; the web layer floors the status at 500.
pub async fn fetch_profile_html(
    client: &Client,
    config: &AppConfig,
    user: &str,
) -> ScrapeResult<String> {
    let url = build_fetch_url(config, user);
    log::debug!("Fetching profile page: {}", url);

    let resp = client
        .get(&url)
        .header(USER_AGENT, DEFAULT_USER_AGENT)
        .header(ACCEPT, ACCEPT_HEADER)
        .header(ACCEPT_LANGUAGE, ACCEPT_LANGUAGE_HEADER)
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ScrapeError::UpstreamStatus {
            status: status.as_u16(),
            snippet: truncate_chars(&body, config::limits::BODY_SNIPPET_CHARS),
        });
    }

    Ok(resp.text().await?)
}
