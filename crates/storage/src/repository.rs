use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;
use verbs_core::model::VerbRecord;
use verbs_core::selection::SelectionWeights;

/// Errors surfaced by the file-backed stores.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("no home directory could be determined")]
    NoHomeDir,

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// One line of a performance listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRow {
    pub infinitive: String,
    /// Known only to stores that keep display metadata.
    pub german: Option<String>,
    pub mistakes: u32,
}

/// What every per-verb performance store can do, regardless of its file shape.
///
/// The rich progress store and the bare wrong-count map both implement this;
/// they are independent and never merged.
pub trait VerbPerformance {
    /// Apply one three-field attempt.
    fn record_attempt(
        &mut self,
        verb: &VerbRecord,
        correct_fields: u32,
        elapsed_s: f64,
        at: NaiveDateTime,
    );

    /// Mistakes recorded for the verb so far; zero when never seen.
    fn wrong_count(&self, verb: &VerbRecord) -> u32;

    /// Selection weight derived from the verb's mistakes.
    fn weight_for(&self, verb: &VerbRecord, weights: &SelectionWeights) -> f64 {
        weights.weight_for(self.wrong_count(verb))
    }

    /// Verbs with at least one mistake, most mistakes first.
    fn summarize(&self) -> Vec<PerformanceRow>;
}

/// Sort rows by mistakes descending, then infinitive ascending.
pub(crate) fn rank_rows(rows: &mut [PerformanceRow]) {
    rows.sort_by(|a, b| {
        b.mistakes
            .cmp(&a.mistakes)
            .then_with(|| a.infinitive.cmp(&b.infinitive))
    });
}
