use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tokpeek")]
#[command(author, version, about = "Profile video scraper for TikTok", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides the PORT environment variable)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scrape a single profile and print the result as JSON
    Fetch {
        /// Username, with or without a leading @
        user: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
