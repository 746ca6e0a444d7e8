//! JSON file reading with serde validation

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::{AbmixError, Result};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file is not valid JSON for `T`
/// * `Io` - Any other read failure
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AbmixError::FileNotFound(path.display().to_string())
        } else {
            AbmixError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AbmixError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}
