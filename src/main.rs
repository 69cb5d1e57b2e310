use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;

use tokpeek::cli::{Cli, Commands};
use tokpeek::core::config::AppConfig;
use tokpeek::core::logging::init_logger;
use tokpeek::core::web_server::start_web_server;
use tokpeek::scrape;

/// Main entry point
///
/// Parses CLI arguments and dispatches to the server or the one-shot
/// fetch command.
///
/// # Errors
/// Returns an error if initialization fails (logging, client, socket bind)
/// or if a one-shot fetch fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present, before the
    // environment is read into config.
    let _ = dotenv();

    let mut config = AppConfig::from_env();

    // Initialize logger (console + file)
    init_logger(&config.log_file_path)?;

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await
        }
        Some(Commands::Fetch { user, pretty }) => run_fetch(config, &user, pretty).await,
        None => {
            // No command specified - default to serving
            log::info!("No command specified, starting the server");
            run_server(config).await
        }
    }
}

/// Run the HTTP server until it exits.
async fn run_server(config: AppConfig) -> Result<()> {
    match &config.proxy_prefix {
        Some(prefix) => log::info!("Outbound fetches routed via proxy prefix: {}", prefix),
        None => log::info!("Outbound fetches go direct (no PROXY_PREFIX set)"),
    }

    start_web_server(Arc::new(config))
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))
}

/// Scrape one profile and print the result to stdout as JSON.
async fn run_fetch(config: AppConfig, user: &str, pretty: bool) -> Result<()> {
    let client = scrape::build_client()?;

    match scrape::scrape_profile(&client, &config, user).await {
        Ok(page) => {
            let out = if pretty {
                serde_json::to_string_pretty(&page)?
            } else {
                serde_json::to_string(&page)?
            };
            println!("{}", out);
            Ok(())
        }
        Err(err) => {
            log::error!("Scrape failed for {:?}: {}", user, err);
            Err(err.into())
        }
    }
}
