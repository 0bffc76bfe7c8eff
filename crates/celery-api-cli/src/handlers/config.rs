//! `config` commands.

use std::path::Path;

use celery_api_core::ServiceConfig;

use crate::error::CliError;

/// Render the effective configuration with the password masked.
pub fn show(config_path: Option<&Path>) -> Result<String, CliError> {
    let config = ServiceConfig::load(config_path)?;
    Ok(serde_json::to_string_pretty(&config.redacted())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults_redacts_password() {
        let out = show(None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["Password"], "***");
        assert_eq!(value["Host"], "proxy");
        assert_eq!(value["Port"], 5671);
    }

    #[test]
    fn test_show_invalid_file_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = show(Some(&path)).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }
}
