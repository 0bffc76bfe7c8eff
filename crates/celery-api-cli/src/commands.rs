//! Subcommand definitions.

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to the broker and serve the HTTP API
    Serve {
        /// Override the HTTP port from the config
        #[arg(long, env = "CELERY_API_PORT")]
        port: Option<u16>,
    },

    /// Inspect the service configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Validate Chef cookbook metadata
    Cookbook {
        #[command(subcommand)]
        command: CookbookCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as JSON (password redacted)
    Show,
}

#[derive(Subcommand)]
pub enum CookbookCommand {
    /// Load and validate one or more cookbook directories
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print a cookbook's metadata as JSON
    Show { path: PathBuf },
}
