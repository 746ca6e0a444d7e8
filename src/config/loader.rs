//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{AbmixError, Result};
use crate::fs;
use crate::schemas::ScoringConfig;

/// Load the scoring configuration, falling back to defaults.
///
/// If the file exists it is read and merged with defaults, then validated.
/// If it doesn't exist, the default configuration is returned.
///
/// # Arguments
/// * `path` - Path to the JSON config file
///
/// # Errors
/// * `InvalidJson` - the file is not valid JSON for a `ScoringConfig`
/// * `Wrapped` - the file parsed but failed validation
pub fn load_config(path: &Path) -> Result<ScoringConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no scoring config, using defaults");
        return Ok(ScoringConfig::default());
    }

    let config: ScoringConfig = fs::read_json(path)?;
    config
        .validate()
        .map_err(|e| AbmixError::wrap(e, format!("Invalid config {}", path.display())))?;

    tracing::info!(path = %path.display(), "scoring config loaded");
    Ok(config)
}
