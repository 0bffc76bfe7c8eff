//! `serve` command.

use std::path::Path;

use celery_api_core::ServiceConfig;
use tracing::info;

use crate::error::CliError;

/// Load config, apply overrides, and run the server until ctrl-c.
pub async fn execute(config_path: Option<&Path>, port: Option<u16>) -> Result<(), CliError> {
    let mut config = ServiceConfig::load(config_path)?;
    if let Some(port) = port {
        config.http_port = port;
    }
    info!(http_port = config.http_port, broker = %config.redacted_uri(), "Starting celery-api");

    celery_api_axum::start_server(config)
        .await
        .map_err(|e| CliError::Server(format!("{e:#}")))
}
