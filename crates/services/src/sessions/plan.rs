use rand::Rng;
use rand::seq::SliceRandom;

use verbs_core::model::VerbRecord;

/// Bounded re-drilling of the verbs missed in the first pass.
///
/// Each round asks every verb of the current wrong-set in a fresh random
/// order. Only verbs that were asked in the round and still had a wrong field
/// stay for the next one. Rounds stop once the wrong-set is empty or
/// `max_rounds` have run.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatRounds {
    pending: Vec<VerbRecord>,
    max_rounds: u32,
    rounds_run: u32,
}

impl RepeatRounds {
    #[must_use]
    pub fn new(wrong: Vec<VerbRecord>, max_rounds: u32) -> Self {
        Self {
            pending: wrong,
            max_rounds,
            rounds_run: 0,
        }
    }

    /// Start the next round and return its shuffled pool, or `None` when done.
    pub fn next_round<R>(&mut self, rng: &mut R) -> Option<Vec<VerbRecord>>
    where
        R: Rng + ?Sized,
    {
        if self.is_done() {
            return None;
        }
        self.rounds_run += 1;
        let mut pool = self.pending.clone();
        pool.shuffle(rng);
        Some(pool)
    }

    /// Close the current round with the verbs that were answered wrong again.
    ///
    /// Verbs outside the current wrong-set are ignored, so the set never grows.
    pub fn finish_round(&mut self, still_wrong: &[VerbRecord]) {
        self.pending.retain(|v| still_wrong.contains(v));
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pending.is_empty() || self.rounds_run >= self.max_rounds
    }

    /// Rounds started so far.
    #[must_use]
    pub fn rounds_run(&self) -> u32 {
        self.rounds_run
    }

    /// Current wrong-set.
    #[must_use]
    pub fn pending(&self) -> &[VerbRecord] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn verbs() -> Vec<VerbRecord> {
        vec![
            VerbRecord::new("go", "went", "gone", "gehen"),
            VerbRecord::new("be", "was/were", "been", "sein"),
            VerbRecord::new("win", "won", "won", "gewinnen"),
        ]
    }

    #[test]
    fn empty_wrong_set_runs_no_rounds() {
        let mut rounds = RepeatRounds::new(Vec::new(), 3);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(rounds.next_round(&mut rng).is_none());
        assert_eq!(rounds.rounds_run(), 0);
    }

    #[test]
    fn correct_verbs_leave_the_next_pool() {
        let all = verbs();
        let mut rounds = RepeatRounds::new(all.clone(), 3);
        let mut rng = StdRng::seed_from_u64(3);

        let first = rounds.next_round(&mut rng).unwrap();
        assert_eq!(first.len(), 3);
        rounds.finish_round(&[all[0], all[2]]);

        let second = rounds.next_round(&mut rng).unwrap();
        assert_eq!(second.len(), 2);
        assert!(!second.contains(&all[1]));
        rounds.finish_round(&[all[2]]);

        let third = rounds.next_round(&mut rng).unwrap();
        assert_eq!(third, vec![all[2]]);
        rounds.finish_round(&[]);

        assert!(rounds.next_round(&mut rng).is_none());
        assert_eq!(rounds.rounds_run(), 3);
    }

    #[test]
    fn stops_at_round_cap_even_if_still_wrong() {
        let all = verbs();
        let mut rounds = RepeatRounds::new(all.clone(), 2);
        let mut rng = StdRng::seed_from_u64(9);
        while let Some(pool) = rounds.next_round(&mut rng) {
            let before = rounds.pending().len();
            rounds.finish_round(&pool);
            assert!(rounds.pending().len() <= before);
        }
        assert_eq!(rounds.rounds_run(), 2);
        assert_eq!(rounds.pending().len(), 3);
    }

    #[test]
    fn strangers_cannot_join_the_wrong_set() {
        let all = verbs();
        let mut rounds = RepeatRounds::new(vec![all[0]], 3);
        let mut rng = StdRng::seed_from_u64(1);
        rounds.next_round(&mut rng).unwrap();
        rounds.finish_round(&[all[0], all[1]]);
        assert_eq!(rounds.pending(), &[all[0]]);
    }
}
