//! `cookbook` commands.

use std::path::{Path, PathBuf};

use celery_api_core::CookbookMetadata;
use tracing::debug;

use crate::error::CliError;

/// Result of checking one cookbook path.
#[derive(Debug)]
pub struct CheckOutcome {
    pub path: PathBuf,
    pub result: Result<CookbookMetadata, String>,
}

impl CheckOutcome {
    /// One report line for this cookbook.
    pub fn line(&self) -> String {
        match &self.result {
            Ok(meta) => format!(
                "ok    {} {} (supports: {}; depends: {})",
                meta.name,
                meta.version,
                meta.supported_platforms().join(", "),
                meta.dependency_names().join(", ")
            ),
            Err(e) => format!("FAIL  {}: {}", self.path.display(), e),
        }
    }
}

/// Load every path, collecting failures instead of stopping at the first.
pub fn check_all(paths: &[PathBuf]) -> Vec<CheckOutcome> {
    paths
        .iter()
        .map(|path| {
            debug!(path = %path.display(), "Checking cookbook");
            CheckOutcome {
                path: path.clone(),
                result: CookbookMetadata::load(path).map_err(|e| e.to_string()),
            }
        })
        .collect()
}

/// Print a report and fail when any cookbook is invalid.
pub fn check(paths: &[PathBuf]) -> Result<(), CliError> {
    let outcomes = check_all(paths);
    for outcome in &outcomes {
        println!("{}", outcome.line());
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(CliError::Cookbook(format!(
            "{} of {} cookbooks failed validation",
            failed,
            outcomes.len()
        )));
    }
    Ok(())
}

/// Render one cookbook's metadata as JSON.
pub fn show(path: &Path) -> Result<String, CliError> {
    let meta = CookbookMetadata::load(path)?;
    Ok(serde_json::to_string_pretty(&meta)?)
}
