//! JSON-file persistence shared by both stores.
//!
//! Loads never fail: a missing file yields the default value and an
//! unreadable or malformed one is logged and replaced by the default.
//! Saves go through a sibling temp file and a rename.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::repository::StorageError;

mod progress;
mod wrong_counts;

pub use progress::{ProgressReport, ProgressStore, ToughVerb};
pub use wrong_counts::WrongCountStore;

pub(crate) fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        debug!(path = %path.display(), "no state file yet, starting empty");
        return T::default();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read state file, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "state file is malformed, starting empty");
            T::default()
        }
    }
}

pub(crate) fn write_atomic<T>(path: &Path, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, json).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))?;
    debug!(path = %path.display(), "state saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
