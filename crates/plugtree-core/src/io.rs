//! Reading and writing the YAML files under `.plugtree/`.

use crate::error::{PluginError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `data` in one step: the bytes land in a sibling
/// tempfile that is then renamed over the target.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Load one of the workspace state files. A missing file means `plugtree init`
/// has not run.
pub fn load_state<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PluginError::NotInitialized);
    }
    let data = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&data)?)
}

pub fn save_state<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    atomic_write(path, data.as_bytes())
}

/// Seed a state file with `value` unless one is already there. Returns true
/// when the file was written.
pub fn seed_state<T: Serialize>(path: &Path, value: &T) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_state(path, value)?;
    Ok(true)
}
