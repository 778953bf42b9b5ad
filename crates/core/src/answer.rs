//! Answer normalization and checking.
//!
//! A stored form like `"burnt/burned"` accepts every `/`-delimited variant.
//! Comparison ignores surrounding whitespace and collapses inner runs of
//! whitespace; case folding is controlled by [`AnswerChecker::case_insensitive`].

use crate::config::DrillConfig;

/// Separator between accepted spellings of one form.
pub const VARIANT_SEPARATOR: char = '/';

//
// ─── CHECKER ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerChecker {
    case_insensitive: bool,
}

impl Default for AnswerChecker {
    fn default() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

impl AnswerChecker {
    #[must_use]
    pub fn new(case_insensitive: bool) -> Self {
        Self { case_insensitive }
    }

    #[must_use]
    pub fn from_config(config: &DrillConfig) -> Self {
        Self::new(config.case_insensitive())
    }

    #[must_use]
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Trim, optionally lowercase, and collapse internal whitespace to single spaces.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.case_insensitive {
            collapsed.to_lowercase()
        } else {
            collapsed
        }
    }

    /// Every accepted spelling of a stored form, normalized.
    #[must_use]
    pub fn accepted_variants(&self, stored: &str) -> Vec<String> {
        split_variants(stored)
            .map(|variant| self.normalize(variant))
            .collect()
    }

    #[must_use]
    pub fn is_correct(&self, input: &str, stored: &str) -> bool {
        let answer = self.normalize(input);
        self.accepted_variants(stored).contains(&answer)
    }
}

/// Split a stored form into its trimmed variants.
pub fn split_variants(stored: &str) -> impl Iterator<Item = &str> {
    stored.split(VARIANT_SEPARATOR).map(str::trim)
}

/// Variants joined for display, e.g. `"burnt, burned"`.
#[must_use]
pub fn display_variants(stored: &str) -> String {
    split_variants(stored).collect::<Vec<_>>().join(", ")
}

//
// ─── SPACE BLOCKING ────────────────────────────────────────────────────────────
//

/// True when any accepted variant needs a space (`"wake up"`, `"deal (with)"`).
#[must_use]
pub fn allow_space_for_field(stored: &str) -> bool {
    split_variants(stored).any(|variant| variant.contains(' '))
}

/// A typed line after the space-blocking rule was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedInput {
    pub text: String,
    /// At least one space keystroke was refused; the caller should ring the bell.
    pub blocked: bool,
}

/// Apply the space rule to one raw line of input.
///
/// Drops the line terminator. When spaces are not allowed every space is
/// discarded, exactly as if the keystroke had been refused while typing.
/// The result is trimmed.
#[must_use]
pub fn shape_input(raw: &str, allow_space: bool) -> ShapedInput {
    let line = raw.trim_end_matches(['\n', '\r']);
    if allow_space {
        return ShapedInput {
            text: line.trim().to_owned(),
            blocked: false,
        };
    }

    let kept: String = line.chars().filter(|c| *c != ' ').collect();
    let blocked = kept.len() != line.len();
    ShapedInput {
        text: kept.trim().to_owned(),
        blocked,
    }
}
