//! Profile scraping pipeline: fetch, extract, collect
//!
//! All data is request-scoped; the pipeline holds no state beyond the
//! caller-supplied HTTP client and configuration.

pub mod embed;
pub mod fetch;
pub mod items;

use serde::Serialize;

use crate::core::config::AppConfig;
use crate::core::error::ScrapeResult;

pub use fetch::build_client;
pub use items::VideoItem;

/// Successful scrape result — the response body for `/api/videos`.
#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: String,
    pub count: usize,
    pub items: Vec<VideoItem>,
}

/// Run the full pipeline for one username.
pub async fn scrape_profile(
    client: &reqwest::Client,
    config: &AppConfig,
    raw_user: &str,
) -> ScrapeResult<ProfilePage> {
    let user = fetch::normalize_user(raw_user)?;
    let html = fetch::fetch_profile_html(client, config, &user).await?;
    let data = embed::extract_embedded_json(&html)?;
    let items = items::collect_items(&data)?;

    Ok(ProfilePage {
        count: items.len(),
        user,
        items,
    })
}
