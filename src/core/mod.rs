//! Core utilities: configuration, errors, logging, and the HTTP server

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;
pub mod web_server;

// Re-exports for convenience
pub use config::AppConfig;
pub use error::{ScrapeError, ScrapeResult};
pub use logging::init_logger;
