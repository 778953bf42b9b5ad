use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::{debug, warn};

use storage::VerbPerformance;
use verbs_core::DrillConfig;
use verbs_core::model::VerbRecord;
use verbs_core::selection::SelectionWeights;

/// Picks verbs, uniformly or biased toward past mistakes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    weighted: bool,
    weights: SelectionWeights,
}

impl Selector {
    #[must_use]
    pub fn new(weighted: bool, weights: SelectionWeights) -> Self {
        Self { weighted, weights }
    }

    #[must_use]
    pub fn from_config(config: &DrillConfig) -> Self {
        Self::new(config.weighted(), config.weights())
    }

    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Draw one verb (with replacement).
    ///
    /// Weighted mode draws proportionally to each verb's weight from `perf`;
    /// if no usable weight exists it falls back to a uniform draw.
    pub fn choose_next<'a, P, R>(
        &self,
        catalog: &'a [VerbRecord],
        perf: &P,
        rng: &mut R,
    ) -> Option<&'a VerbRecord>
    where
        P: VerbPerformance + ?Sized,
        R: Rng + ?Sized,
    {
        if !self.weighted {
            return catalog.choose(rng);
        }

        match catalog.choose_weighted(rng, |v| perf.weight_for(v, &self.weights)) {
            Ok(verb) => {
                debug!(verb = verb.infinitive, "weighted pick");
                Some(verb)
            }
            Err(err) => {
                if !catalog.is_empty() {
                    warn!(error = %err, "weights unusable, falling back to uniform pick");
                }
                catalog.choose(rng)
            }
        }
    }

    /// `min(size, catalog.len())` distinct verbs in random order.
    pub fn sample_batch<R>(catalog: &[VerbRecord], size: usize, rng: &mut R) -> Vec<VerbRecord>
    where
        R: Rng + ?Sized,
    {
        let mut batch: Vec<VerbRecord> = catalog.choose_multiple(rng, size).copied().collect();
        batch.shuffle(rng);
        batch
    }
}
