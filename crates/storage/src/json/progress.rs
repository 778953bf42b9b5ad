use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use verbs_core::model::{PerVerbStats, SessionRecord, VerbKey, VerbRecord, accuracy_percent};

use super::{load_or_default, write_atomic};
use crate::repository::{PerformanceRow, StorageError, VerbPerformance, rank_rows};

/// Sessions considered "recent" by the report.
pub const RECENT_SESSIONS: usize = 5;
/// A verb needs this many asks before it can be listed as tough.
pub const TOUGH_MIN_ASKS: u32 = 3;
/// Maximum tough verbs listed.
pub const TOUGH_LIMIT: usize = 10;

//
// ─── STORE ─────────────────────────────────────────────────────────────────────
//

/// Full on-disk progress state of the finite-session drill.
///
/// Missing top-level keys load as empty defaults. Entries for verbs that are no
/// longer in the catalog are kept as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressStore {
    pub meta: Map<String, Value>,
    pub sessions: Vec<SessionRecord>,
    pub verbs: BTreeMap<VerbKey, PerVerbStats>,
}

impl ProgressStore {
    /// Load the store, falling back to an empty one on any problem.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        load_or_default(path)
    }

    /// Overwrite the file with the full store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        write_atomic(path, self)
    }

    /// Apply one attempt, creating the verb's entry on first sight.
    pub fn update_per_verb(
        &mut self,
        verb: &VerbRecord,
        correct_fields: u32,
        elapsed_s: f64,
        at: NaiveDateTime,
    ) {
        self.verbs
            .entry(verb.key())
            .or_insert_with(|| PerVerbStats::seeded(verb))
            .record(correct_fields, elapsed_s, at);
    }

    pub fn record_session(&mut self, record: SessionRecord) {
        self.sessions.push(record);
    }

    #[must_use]
    pub fn stats_for(&self, verb: &VerbRecord) -> Option<&PerVerbStats> {
        self.verbs.get(&verb.key())
    }

    /// Aggregate history for display; `None` until a session was recorded.
    #[must_use]
    pub fn report(&self) -> Option<ProgressReport> {
        if self.sessions.is_empty() {
            return None;
        }

        let (questions, correct, time) = totals(&self.sessions);
        let recent_from = self.sessions.len().saturating_sub(RECENT_SESSIONS);
        let (recent_questions, recent_correct, recent_time) =
            totals(&self.sessions[recent_from..]);

        let mut tough: Vec<ToughVerb> = self
            .verbs
            .values()
            .filter(|pv| pv.times_asked >= TOUGH_MIN_ASKS)
            .map(|pv| ToughVerb {
                german: pv.german.clone(),
                infinitive: pv.infinitive.clone(),
                accuracy_percent: pv.accuracy() * 100.0,
                times_asked: pv.times_asked,
            })
            .collect();
        tough.sort_by(|a, b| {
            a.accuracy_percent
                .total_cmp(&b.accuracy_percent)
                .then_with(|| b.times_asked.cmp(&a.times_asked))
        });
        tough.truncate(TOUGH_LIMIT);

        #[allow(clippy::cast_precision_loss)]
        let sessions = self.sessions.len() as f64;

        Some(ProgressReport {
            sessions_completed: self.sessions.len(),
            overall_accuracy_percent: accuracy_percent(correct, questions),
            overall_time_s: time,
            average_session_time_s: time / sessions,
            recent_accuracy_percent: accuracy_percent(recent_correct, recent_questions),
            recent_time_s: recent_time,
            tough,
        })
    }
}

fn totals(sessions: &[SessionRecord]) -> (u32, u32, f64) {
    sessions.iter().fold((0, 0, 0.0), |(q, c, t), s| {
        (
            q.saturating_add(s.total_questions),
            c.saturating_add(s.total_correct),
            t + s.total_time_s,
        )
    })
}

impl VerbPerformance for ProgressStore {
    fn record_attempt(
        &mut self,
        verb: &VerbRecord,
        correct_fields: u32,
        elapsed_s: f64,
        at: NaiveDateTime,
    ) {
        self.update_per_verb(verb, correct_fields, elapsed_s, at);
    }

    /// Wrong fields across the verb's whole history.
    fn wrong_count(&self, verb: &VerbRecord) -> u32 {
        self.stats_for(verb).map_or(0, PerVerbStats::wrong_fields)
    }

    fn summarize(&self) -> Vec<PerformanceRow> {
        let mut rows: Vec<PerformanceRow> = self
            .verbs
            .values()
            .filter(|pv| pv.wrong_fields() > 0)
            .map(|pv| PerformanceRow {
                infinitive: pv.infinitive.clone(),
                german: Some(pv.german.clone()),
                mistakes: pv.wrong_fields(),
            })
            .collect();
        rank_rows(&mut rows);
        rows
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Aggregated statistics over every recorded session.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub sessions_completed: usize,
    pub overall_accuracy_percent: f64,
    pub overall_time_s: f64,
    pub average_session_time_s: f64,
    pub recent_accuracy_percent: f64,
    pub recent_time_s: f64,
    /// Lowest accuracy first, ties broken by more asks.
    pub tough: Vec<ToughVerb>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToughVerb {
    pub german: String,
    pub infinitive: String,
    pub accuracy_percent: f64,
    pub times_asked: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use verbs_core::time::fixed_clock;

    fn go() -> VerbRecord {
        VerbRecord::new("go", "went", "gone", "gehen; fahren")
    }

    fn be() -> VerbRecord {
        VerbRecord::new("be", "was/were", "been", "sein")
    }

    fn session(questions: u32, correct: u32, time: f64) -> SessionRecord {
        SessionRecord::new(fixed_clock().local_stamp(), 20, questions, correct, time)
    }

    #[test]
    fn update_creates_seeded_entry() {
        let mut store = ProgressStore::default();
        let at = fixed_clock().local_stamp();
        store.update_per_verb(&go(), 2, 3.0, at);

        let stats = store.stats_for(&go()).unwrap();
        assert_eq!(stats.german, "gehen; fahren");
        assert_eq!(stats.times_asked, 1);
        assert_eq!(stats.total_fields, 3);
        assert_eq!(stats.total_correct_fields, 2);
        assert_eq!(store.wrong_count(&go()), 1);
        assert_eq!(store.wrong_count(&be()), 0);
    }

    #[test]
    fn report_is_none_without_sessions() {
        assert!(ProgressStore::default().report().is_none());
    }

    #[test]
    fn report_aggregates_overall_and_recent() {
        let mut store = ProgressStore::default();
        store.record_session(session(60, 30, 100.0));
        for _ in 0..5 {
            store.record_session(session(60, 60, 50.0));
        }

        let report = store.report().unwrap();
        assert_eq!(report.sessions_completed, 6);
        assert!((report.overall_accuracy_percent - 330.0 / 360.0 * 100.0).abs() < 1e-9);
        assert!((report.recent_accuracy_percent - 100.0).abs() < 1e-9);
        assert!((report.overall_time_s - 350.0).abs() < 1e-9);
        assert!((report.recent_time_s - 250.0).abs() < 1e-9);
        assert!((report.average_session_time_s - 350.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn tough_verbs_need_three_asks_and_sort_by_accuracy() {
        let mut store = ProgressStore::default();
        store.record_session(session(3, 3, 1.0));
        let at = fixed_clock().local_stamp();
        for _ in 0..3 {
            store.update_per_verb(&go(), 1, 1.0, at);
            store.update_per_verb(&be(), 2, 1.0, at);
        }
        store.update_per_verb(&VerbRecord::new("win", "won", "won", "gewinnen"), 0, 1.0, at);

        let report = store.report().unwrap();
        let order: Vec<_> = report.tough.iter().map(|t| t.infinitive.as_str()).collect();
        assert_eq!(order, ["go", "be"]);
        assert_eq!(report.tough[0].times_asked, 3);
    }

    #[test]
    fn summarize_ranks_by_wrong_fields() {
        let mut store = ProgressStore::default();
        let at = fixed_clock().local_stamp();
        store.record_attempt(&go(), 0, 1.0, at);
        store.record_attempt(&be(), 2, 1.0, at);
        store.record_attempt(&VerbRecord::new("win", "won", "won", "gewinnen"), 3, 1.0, at);

        let rows = store.summarize();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].infinitive, "go");
        assert_eq!(rows[0].mistakes, 3);
        assert_eq!(rows[1].german.as_deref(), Some("sein"));
    }
}
