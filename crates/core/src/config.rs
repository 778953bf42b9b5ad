use thiserror::Error;

use crate::selection::SelectionWeights;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("minimum weight must be finite and > 0, got {0}")]
    InvalidMinWeight(f64),

    #[error("weight per wrong answer must be finite and >= 0, got {0}")]
    InvalidWeightPerWrong(f64),

    #[error("sample size must be > 0")]
    InvalidSampleSize,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Drill behaviour shared by the session runners, the selector and the checker.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillConfig {
    case_insensitive: bool,
    weighted: bool,
    weights: SelectionWeights,
    show_hint_after_fail: bool,
    sample_size: usize,
    max_repeat_rounds: u32,
}

impl Default for DrillConfig {
    /// - case-insensitive answers
    /// - weighted selection (1.0 floor, +0.75 per mistake)
    /// - hints after a miss
    /// - 20 verbs per session, up to 3 repeat rounds
    fn default() -> Self {
        Self {
            case_insensitive: true,
            weighted: true,
            weights: SelectionWeights::default(),
            show_hint_after_fail: true,
            sample_size: 20,
            max_repeat_rounds: 3,
        }
    }
}

impl DrillConfig {
    /// Creates custom drill settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a weight is out of range or `sample_size` is zero.
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn new(
        case_insensitive: bool,
        weighted: bool,
        min_weight: f64,
        weight_per_wrong: f64,
        show_hint_after_fail: bool,
        sample_size: usize,
        max_repeat_rounds: u32,
    ) -> Result<Self, ConfigError> {
        if sample_size == 0 {
            return Err(ConfigError::InvalidSampleSize);
        }
        Ok(Self {
            case_insensitive,
            weighted,
            weights: SelectionWeights::new(min_weight, weight_per_wrong)?,
            show_hint_after_fail,
            sample_size,
            max_repeat_rounds,
        })
    }

    #[must_use]
    pub fn with_case_insensitive(mut self, on: bool) -> Self {
        self.case_insensitive = on;
        self
    }

    #[must_use]
    pub fn with_weighted(mut self, on: bool) -> Self {
        self.weighted = on;
        self
    }

    #[must_use]
    pub fn with_hints(mut self, on: bool) -> Self {
        self.show_hint_after_fail = on;
        self
    }

    #[must_use]
    pub fn with_max_repeat_rounds(mut self, rounds: u32) -> Self {
        self.max_repeat_rounds = rounds;
        self
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidSampleSize` for zero.
    pub fn with_sample_size(mut self, size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidSampleSize);
        }
        self.sample_size = size;
        Ok(self)
    }

    #[must_use]
    pub fn with_weights(mut self, weights: SelectionWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    #[must_use]
    pub fn weighted(&self) -> bool {
        self.weighted
    }

    #[must_use]
    pub fn weights(&self) -> SelectionWeights {
        self.weights
    }

    #[must_use]
    pub fn show_hint_after_fail(&self) -> bool {
        self.show_hint_after_fail
    }

    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[must_use]
    pub fn max_repeat_rounds(&self) -> u32 {
        self.max_repeat_rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = DrillConfig::default();
        assert!(cfg.case_insensitive());
        assert!(cfg.weighted());
        assert!(cfg.show_hint_after_fail());
        assert_eq!(cfg.sample_size(), 20);
        assert_eq!(cfg.max_repeat_rounds(), 3);
        assert_eq!(cfg.weights(), SelectionWeights::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            DrillConfig::new(true, true, 0.0, 0.75, true, 20, 3),
            Err(ConfigError::InvalidMinWeight(0.0))
        );
        assert_eq!(
            DrillConfig::new(true, true, 1.0, -1.0, true, 20, 3),
            Err(ConfigError::InvalidWeightPerWrong(-1.0))
        );
        assert_eq!(
            DrillConfig::new(true, true, 1.0, 0.75, true, 0, 3),
            Err(ConfigError::InvalidSampleSize)
        );
        assert!(DrillConfig::default().with_sample_size(0).is_err());
    }

    #[test]
    fn builders_override_fields() {
        let cfg = DrillConfig::default()
            .with_weighted(false)
            .with_case_insensitive(false)
            .with_max_repeat_rounds(0)
            .with_sample_size(5)
            .unwrap();
        assert!(!cfg.weighted());
        assert!(!cfg.case_insensitive());
        assert_eq!(cfg.max_repeat_rounds(), 0);
        assert_eq!(cfg.sample_size(), 5);
    }
}
