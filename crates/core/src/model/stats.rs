use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::VerbRecord;
use crate::time::format_mmss;

/// Fields asked per verb attempt.
pub const FIELDS_PER_VERB: u32 = 3;

//
// ─── PER-VERB STATS ────────────────────────────────────────────────────────────
//

/// Long-term accuracy counters for one verb.
///
/// `total_correct_fields` never exceeds `total_fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerVerbStats {
    pub german: String,
    pub infinitive: String,
    pub times_asked: u32,
    pub total_fields: u32,
    pub total_correct_fields: u32,
    pub total_time_s: f64,
    pub last_seen: Option<NaiveDateTime>,
}

impl Default for PerVerbStats {
    fn default() -> Self {
        Self {
            german: String::new(),
            infinitive: String::new(),
            times_asked: 0,
            total_fields: 0,
            total_correct_fields: 0,
            total_time_s: 0.0,
            last_seen: None,
        }
    }
}

impl PerVerbStats {
    /// Empty counters seeded with the verb's display metadata.
    #[must_use]
    pub fn seeded(verb: &VerbRecord) -> Self {
        Self {
            german: verb.german.to_owned(),
            infinitive: verb.infinitive.to_owned(),
            ..Self::default()
        }
    }

    /// Apply one three-field attempt.
    pub fn record(&mut self, correct_fields: u32, elapsed_s: f64, at: NaiveDateTime) {
        self.times_asked = self.times_asked.saturating_add(1);
        self.total_fields = self.total_fields.saturating_add(FIELDS_PER_VERB);
        self.total_correct_fields = self
            .total_correct_fields
            .saturating_add(correct_fields.min(FIELDS_PER_VERB))
            .min(self.total_fields);
        self.total_time_s += elapsed_s.max(0.0);
        self.last_seen = Some(at);
    }

    /// Fields answered wrong over the verb's whole history.
    #[must_use]
    pub fn wrong_fields(&self) -> u32 {
        self.total_fields.saturating_sub(self.total_correct_fields)
    }

    /// Share of correct fields in `[0, 1]`; `0.0` when never asked.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total_fields == 0 {
            return 0.0;
        }
        f64::from(self.total_correct_fields) / f64::from(self.total_fields)
    }
}

//
// ─── SESSION RECORD ────────────────────────────────────────────────────────────
//

/// Summary of one completed finite session. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub timestamp: NaiveDateTime,
    pub base_sample_size: u32,
    pub total_questions: u32,
    pub total_correct: u32,
    pub accuracy_percent: f64,
    pub total_time_s: f64,
    pub total_time_mmss: String,
}

impl SessionRecord {
    /// Build a record, deriving accuracy (rounded to two decimals) and `mm:ss`.
    #[must_use]
    pub fn new(
        timestamp: NaiveDateTime,
        base_sample_size: u32,
        total_questions: u32,
        total_correct: u32,
        total_time_s: f64,
    ) -> Self {
        let accuracy = accuracy_percent(total_correct, total_questions);
        Self {
            timestamp,
            base_sample_size,
            total_questions,
            total_correct,
            accuracy_percent: (accuracy * 100.0).round() / 100.0,
            total_time_s,
            total_time_mmss: format_mmss(total_time_s),
        }
    }
}

/// `correct / total * 100`, or `0.0` for an empty total.
#[must_use]
pub fn accuracy_percent(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(correct) / f64::from(total) * 100.0
}
