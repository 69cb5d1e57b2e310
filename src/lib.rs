//! tokpeek — profile video scraper for TikTok
//!
//! Fetches a public profile page, extracts the embedded hydration state
//! from the HTML, and returns the profile's videos as normalized JSON
//! records over a small HTTP API.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, and the HTTP server
//! - `scrape`: the scraping pipeline (fetch, extract, collect)

pub mod cli;
pub mod core;
pub mod scrape;

// Re-export commonly used types for convenience
pub use crate::core::config::AppConfig;
pub use crate::core::error::{ScrapeError, ScrapeResult};
pub use crate::scrape::{scrape_profile, ProfilePage, VideoItem};
