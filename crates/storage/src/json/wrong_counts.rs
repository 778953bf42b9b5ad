use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;
use verbs_core::model::{FIELDS_PER_VERB, VerbRecord};

use super::{load_or_default, write_atomic};
use crate::repository::{PerformanceRow, StorageError, VerbPerformance, rank_rows};

/// Bare `infinitive -> mistakes` map used by the endless drill to bias selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrongCountStore {
    counts: BTreeMap<String, u32>,
}

impl WrongCountStore {
    #[must_use]
    pub fn load(path: &Path) -> Self {
        load_or_default(path)
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        write_atomic(path, self)
    }

    /// Forget every count and delete the file. A missing file is not an error.
    ///
    /// The in-memory counts are cleared even when deleting fails.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file exists but cannot be removed.
    pub fn reset(&mut self, path: &Path) -> Result<(), StorageError> {
        self.counts.clear();
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "state file deleted");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::io(path, err)),
        }
    }

    /// Add one mistake and return the new count.
    pub fn increment(&mut self, verb: &VerbRecord) -> u32 {
        let count = self.counts.entry(verb.infinitive.to_owned()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    #[must_use]
    pub fn count(&self, infinitive: &str) -> u32 {
        self.counts.get(infinitive).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|c| *c == 0)
    }
}

impl VerbPerformance for WrongCountStore {
    /// Counts the attempt as one mistake when any field was wrong.
    fn record_attempt(&mut self, verb: &VerbRecord, correct_fields: u32, _: f64, _: NaiveDateTime) {
        if correct_fields < FIELDS_PER_VERB {
            self.increment(verb);
        }
    }

    fn wrong_count(&self, verb: &VerbRecord) -> u32 {
        self.count(verb.infinitive)
    }

    fn summarize(&self) -> Vec<PerformanceRow> {
        let mut rows: Vec<PerformanceRow> = self
            .counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(infinitive, count)| PerformanceRow {
                infinitive: infinitive.clone(),
                german: None,
                mistakes: *count,
            })
            .collect();
        rank_rows(&mut rows);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbs_core::time::fixed_clock;

    fn go() -> VerbRecord {
        VerbRecord::new("go", "went", "gone", "gehen; fahren")
    }

    #[test]
    fn only_imperfect_attempts_count() {
        let mut store = WrongCountStore::default();
        let at = fixed_clock().local_stamp();
        store.record_attempt(&go(), 3, 1.0, at);
        assert_eq!(store.wrong_count(&go()), 0);
        store.record_attempt(&go(), 2, 1.0, at);
        store.record_attempt(&go(), 0, 1.0, at);
        assert_eq!(store.wrong_count(&go()), 2);
    }

    #[test]
    fn file_is_a_plain_map_keyed_by_infinitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = WrongCountStore::default();
        store.increment(&go());
        store.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "go": 1 }));
        assert_eq!(WrongCountStore::load(&path), store);
    }

    #[test]
    fn reset_deletes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut store = WrongCountStore::default();
        store.increment(&go());
        store.save(&path).unwrap();

        store.reset(&path).unwrap();
        assert!(!path.exists());
        assert!(store.is_empty());
        store.reset(&path).unwrap();
    }

    #[test]
    fn non_object_state_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(WrongCountStore::load(&path).is_empty());
        fs::write(&path, r#"{"go": "lots"}"#).unwrap();
        assert!(WrongCountStore::load(&path).is_empty());
    }
}
