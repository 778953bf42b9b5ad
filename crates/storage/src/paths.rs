use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::repository::StorageError;

const LOG_DIR: &str = "irregular_verbs_logs";
const PROGRESS_FILE: &str = "progress.json";
const STATE_FILE: &str = ".irregular_verbs_trainer_state.json";

/// Where every persisted artifact lives.
///
/// Finite sessions keep `progress.json` and their transcripts in a log
/// directory; the endless drill keeps its wrong-count map in a dotfile beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    log_dir: PathBuf,
    progress_file: PathBuf,
    state_file: PathBuf,
}

impl DataPaths {
    /// Layout rooted at `root` (normally the home directory).
    #[must_use]
    pub fn under(root: &Path) -> Self {
        let log_dir = root.join(LOG_DIR);
        Self {
            progress_file: log_dir.join(PROGRESS_FILE),
            state_file: root.join(STATE_FILE),
            log_dir,
        }
    }

    /// Layout rooted at the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoHomeDir` if the home directory is unknown.
    pub fn home() -> Result<Self, StorageError> {
        dirs::home_dir()
            .map(|home| Self::under(&home))
            .ok_or(StorageError::NoHomeDir)
    }

    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    #[must_use]
    pub fn progress_file(&self) -> &Path {
        &self.progress_file
    }

    #[must_use]
    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// `session_YYYY-MM-DD_HH-MM-SS.txt` inside the log directory.
    #[must_use]
    pub fn transcript_file(&self, started: NaiveDateTime) -> PathBuf {
        self.log_dir
            .join(format!("session_{}.txt", started.format("%Y-%m-%d_%H-%M-%S")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn layout_matches_expected_files() {
        let paths = DataPaths::under(Path::new("/home/anna"));
        assert_eq!(
            paths.progress_file(),
            Path::new("/home/anna/irregular_verbs_logs/progress.json")
        );
        assert_eq!(
            paths.state_file(),
            Path::new("/home/anna/.irregular_verbs_trainer_state.json")
        );

        let started = NaiveDate::from_ymd_opt(2025, 1, 31)
            .unwrap()
            .and_hms_opt(18, 4, 5)
            .unwrap();
        assert_eq!(
            paths.transcript_file(started),
            Path::new("/home/anna/irregular_verbs_logs/session_2025-01-31_18-04-05.txt")
        );
    }
}
