use crate::config::ConfigError;

/// Weight assigned to a verb with no recorded mistakes.
pub const DEFAULT_MIN_WEIGHT: f64 = 1.0;
/// Extra weight per recorded mistake.
pub const DEFAULT_WEIGHT_PER_WRONG: f64 = 0.75;

/// Parameters of the mistake-biased selection weight.
///
/// ```
/// # use verbs_core::selection::SelectionWeights;
/// let weights = SelectionWeights::default();
/// assert_eq!(weights.weight_for(0), 1.0);
/// assert_eq!(weights.weight_for(4), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionWeights {
    min_weight: f64,
    weight_per_wrong: f64,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            min_weight: DEFAULT_MIN_WEIGHT,
            weight_per_wrong: DEFAULT_WEIGHT_PER_WRONG,
        }
    }
}

impl SelectionWeights {
    /// # Errors
    ///
    /// Returns `ConfigError` if `min_weight` is not positive or `weight_per_wrong`
    /// is negative; both must be finite.
    pub fn new(min_weight: f64, weight_per_wrong: f64) -> Result<Self, ConfigError> {
        if !min_weight.is_finite() || min_weight <= 0.0 {
            return Err(ConfigError::InvalidMinWeight(min_weight));
        }
        if !weight_per_wrong.is_finite() || weight_per_wrong < 0.0 {
            return Err(ConfigError::InvalidWeightPerWrong(weight_per_wrong));
        }
        Ok(Self {
            min_weight,
            weight_per_wrong,
        })
    }

    #[must_use]
    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }

    #[must_use]
    pub fn weight_per_wrong(&self) -> f64 {
        self.weight_per_wrong
    }

    /// `max(min, min + per_wrong * wrong_count)`; never below the floor.
    #[must_use]
    pub fn weight_for(&self, wrong_count: u32) -> f64 {
        let raw = self.min_weight + self.weight_per_wrong * f64::from(wrong_count);
        raw.max(self.min_weight)
    }
}
