//! CLI module for metchat-server
//!
//! Provides command-line interface parsing for the metchat-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// metchat - weather-aware chat relay
#[derive(Parser, Debug)]
#[command(
    name = "metchat-server",
    version,
    about = "Chat relay with live Met Office weather for UK cities",
    long_about = "Relays chat messages to an OpenAI-compatible completion API, adding the\n\
                  current Met Office forecast when a message asks about the weather in a UK city.\n\n\
                  Run without arguments to start the server.",
    after_help = "EXAMPLES:\n    \
                  metchat-server                      # Start the server\n    \
                  metchat-server --config my.toml     # Use a custom config file\n    \
                  metchat-server config --validate    # Check configuration and secrets\n    \
                  metchat-server weather London       # One-off forecast lookup"
)]
pub struct Cli {
    /// Path to the configuration file (defaults are used when it does not exist)
    #[arg(short, long, default_value = "metchat.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the effective configuration
    Config {
        /// Validate the configuration and required environment variables
        #[arg(long)]
        validate: bool,
    },

    /// Look up the current weather for a UK city
    Weather {
        /// City name, e.g. "London"
        city: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
