use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── FIELDS ────────────────────────────────────────────────────────────────────
//

/// One of the three English forms asked for every verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbField {
    Infinitive,
    PastSimple,
    PastParticiple,
}

impl VerbField {
    /// All fields in the order they are asked.
    pub const ALL: [VerbField; 3] = [
        VerbField::Infinitive,
        VerbField::PastSimple,
        VerbField::PastParticiple,
    ];

    /// Human-readable label used in prompts and recaps.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VerbField::Infinitive => "Infinitive",
            VerbField::PastSimple => "Simple Past",
            VerbField::PastParticiple => "Past Participle",
        }
    }

    /// Position of the field in the asking order.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            VerbField::Infinitive => 0,
            VerbField::PastSimple => 1,
            VerbField::PastParticiple => 2,
        }
    }
}

impl fmt::Display for VerbField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── VERB RECORD ───────────────────────────────────────────────────────────────
//

/// An irregular verb with its German gloss.
///
/// Each English form may hold several accepted spellings separated by `/`
/// (for example `"burnt/burned"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerbRecord {
    pub infinitive: &'static str,
    pub past_simple: &'static str,
    pub past_participle: &'static str,
    pub german: &'static str,
}

impl VerbRecord {
    #[must_use]
    pub const fn new(
        infinitive: &'static str,
        past_simple: &'static str,
        past_participle: &'static str,
        german: &'static str,
    ) -> Self {
        Self {
            infinitive,
            past_simple,
            past_participle,
            german,
        }
    }

    /// The stored (possibly `/`-delimited) value of a field.
    #[must_use]
    pub fn form(&self, field: VerbField) -> &'static str {
        match field {
            VerbField::Infinitive => self.infinitive,
            VerbField::PastSimple => self.past_simple,
            VerbField::PastParticiple => self.past_participle,
        }
    }

    #[must_use]
    pub fn key(&self) -> VerbKey {
        VerbKey::new(self.german, self.infinitive)
    }
}

//
// ─── KEY ───────────────────────────────────────────────────────────────────────
//

/// Stable identity of a verb in the progress file: `"<german>||<infinitive>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerbKey(String);

impl VerbKey {
    pub const SEPARATOR: &'static str = "||";

    #[must_use]
    pub fn new(german: &str, infinitive: &str) -> Self {
        Self(format!("{german}{}{infinitive}", Self::SEPARATOR))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the key back into `(german, infinitive)`.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, &str)> {
        self.0.split_once(Self::SEPARATOR)
    }
}

impl fmt::Display for VerbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
