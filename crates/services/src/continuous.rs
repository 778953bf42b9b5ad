//! Endless drill that keeps asking until the user quits, biased toward the
//! verbs with the most saved mistakes.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info, warn};

use storage::{VerbPerformance, WrongCountStore};
use verbs_core::answer::{AnswerChecker, display_variants};
use verbs_core::catalog::find_by_infinitive;
use verbs_core::model::{VerbField, VerbRecord};
use verbs_core::{Clock, DrillConfig};

use crate::error::SessionError;
use crate::selector::Selector;
use crate::sessions::{AskOutcome, VerbAttempt, ask_verb};
use crate::terminal::Terminal;

/// Rows shown by `:stats` before the rest is summarized.
pub const STATS_ROWS: usize = 30;

/// Commands accepted in place of the first answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillCommand {
    Stats,
    Reset,
}

impl DrillCommand {
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            ":stats" => Some(Self::Stats),
            ":reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuousOutcome {
    pub verbs_asked: u32,
    pub perfect: u32,
    pub commands: u32,
}

pub struct ContinuousDrill<'a> {
    catalog: &'a [VerbRecord],
    config: DrillConfig,
    checker: AnswerChecker,
    selector: Selector,
    clock: Clock,
    state_path: PathBuf,
}

impl<'a> ContinuousDrill<'a> {
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the catalog has no verbs.
    pub fn new(
        catalog: &'a [VerbRecord],
        config: DrillConfig,
        state_path: impl Into<PathBuf>,
    ) -> Result<Self, SessionError> {
        if catalog.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            catalog,
            checker: AnswerChecker::from_config(&config),
            selector: Selector::from_config(&config),
            config,
            clock: Clock::default_clock(),
            state_path: state_path.into(),
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Load the saved counts from the state file and drill until quit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the terminal cannot be used.
    pub fn run_persisted<R, W, G>(
        &self,
        term: &mut Terminal<R, W>,
        rng: &mut G,
    ) -> Result<ContinuousOutcome, SessionError>
    where
        R: BufRead,
        W: Write,
        G: Rng + ?Sized,
    {
        let mut counts = WrongCountStore::load(&self.state_path);
        self.run(term, &mut counts, rng)
    }

    /// Drill until the user quits or input ends.
    ///
    /// Every imperfect verb bumps its count and the state file is saved
    /// right away.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the terminal cannot be used.
    pub fn run<R, W, G>(
        &self,
        term: &mut Terminal<R, W>,
        counts: &mut WrongCountStore,
        rng: &mut G,
    ) -> Result<ContinuousOutcome, SessionError>
    where
        R: BufRead,
        W: Write,
        G: Rng + ?Sized,
    {
        let mut outcome = ContinuousOutcome::default();

        term.say("Irregular Verbs Trainer")?;
        term.say("Type 'q' to quit at any prompt.")?;
        term.say("Commands: ':stats' (show stats), ':reset' (delete saved progress)")?;
        term.say(format!(
            "Mode: weighted_random={}, case_insensitive={}",
            self.selector.is_weighted(),
            self.checker.case_insensitive()
        ))?;
        term.blank()?;
        info!(weighted = self.selector.is_weighted(), "endless drill started");

        loop {
            let verb = self
                .selector
                .choose_next(self.catalog, &*counts, rng)
                .ok_or(SessionError::Empty)?;

            let outcome_of_ask = ask_verb(term, verb, &self.checker, &self.clock, |answer| {
                DrillCommand::parse(answer).is_some()
            })?;

            match outcome_of_ask {
                AskOutcome::Quit => break,
                AskOutcome::Intercepted(text) => {
                    outcome.commands += 1;
                    match DrillCommand::parse(&text) {
                        Some(DrillCommand::Stats) => {
                            term.blank()?;
                            for line in stats_lines(counts, self.catalog, &self.state_path) {
                                term.say(line)?;
                            }
                        }
                        Some(DrillCommand::Reset) => {
                            if let Err(err) = counts.reset(&self.state_path) {
                                warn!(error = %err, "could not delete state file");
                                term.say(format!("Warning: Could not delete progress file: {err}"))?;
                            }
                            term.say("Progress deleted.")?;
                            term.blank()?;
                        }
                        None => {}
                    }
                }
                AskOutcome::Answered(attempt) => {
                    outcome.verbs_asked += 1;
                    if attempt.is_perfect() {
                        outcome.perfect += 1;
                    }
                    self.show_result(term, counts, &attempt)?;
                }
            }
        }

        term.blank()?;
        term.say(format!(
            "Goodbye. (progress file: {})",
            self.state_path.display()
        ))?;
        term.blank()?;
        for line in stats_lines(counts, self.catalog, &self.state_path) {
            term.say(line)?;
        }
        info!(
            verbs = outcome.verbs_asked,
            perfect = outcome.perfect,
            "endless drill finished"
        );
        Ok(outcome)
    }

    fn show_result<R, W>(
        &self,
        term: &mut Terminal<R, W>,
        counts: &mut WrongCountStore,
        attempt: &VerbAttempt,
    ) -> Result<(), SessionError>
    where
        R: BufRead,
        W: Write,
    {
        let verb = &attempt.verb;
        counts.record_attempt(
            verb,
            attempt.correct_count(),
            attempt.elapsed_s,
            self.clock.local_stamp(),
        );
        if !attempt.is_perfect() {
            debug!(verb = verb.infinitive, "mistake recorded");
            if let Err(err) = counts.save(&self.state_path) {
                warn!(error = %err, "could not save state file");
                term.say(format!("Warning: Could not save progress: {err}"))?;
            }
        }

        let marked: Vec<String> = VerbField::ALL
            .into_iter()
            .map(|field| {
                let mark = if attempt.is_correct(field) { "OK" } else { "MISS" };
                format!("[{mark}] {}", verb.form(field))
            })
            .collect();

        term.blank()?;
        term.say("Correct forms:")?;
        term.say(format!("  {}", marked.join(" | ")))?;

        if !attempt.is_perfect() && self.config.show_hint_after_fail() {
            term.say(format!(
                "Allowed variants: base={}; past={}; pp={}",
                display_variants(verb.infinitive),
                display_variants(verb.past_simple),
                display_variants(verb.past_participle)
            ))?;
        }

        term.say(format!(
            "Mistakes for '{}': {}",
            verb.infinitive,
            counts.wrong_count(verb)
        ))?;
        term.say("-".repeat(60))?;
        term.blank()?;
        Ok(())
    }
}

/// Verbs with saved mistakes, most mistakes first.
#[must_use]
pub fn stats_lines(counts: &WrongCountStore, catalog: &[VerbRecord], path: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Stats (only verbs with mistakes). File: {}",
        path.display()
    )];

    let rows = counts.summarize();
    if rows.is_empty() {
        lines.push("  (no mistakes saved yet)".to_string());
        return lines;
    }

    for row in rows.iter().take(STATS_ROWS) {
        let german = find_by_infinitive(catalog, &row.infinitive).map_or("", |v| v.german);
        lines.push(format!("  {:<15} {:>3}  {german}", row.infinitive, row.mistakes));
    }
    if rows.len() > STATS_ROWS {
        lines.push(format!("  ... ({} more)", rows.len() - STATS_ROWS));
    }
    lines.push(String::new());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;
    use verbs_core::catalog;
    use verbs_core::time::fixed_clock;

    fn go_only() -> [VerbRecord; 1] {
        [VerbRecord::new("go", "went", "gone", "gehen; fahren")]
    }

    fn run_with(input: &str, counts: &mut WrongCountStore, dir: &Path) -> (ContinuousOutcome, String) {
        let verbs = go_only();
        let drill = ContinuousDrill::new(&verbs, DrillConfig::default(), dir.join("state.json"))
            .unwrap()
            .with_clock(fixed_clock());
        let mut term = Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut rng = StdRng::seed_from_u64(11);
        let outcome = drill.run(&mut term, counts, &mut rng).unwrap();
        let (_, out) = term.into_parts();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn commands_parse_exactly() {
        assert_eq!(DrillCommand::parse(":stats"), Some(DrillCommand::Stats));
        assert_eq!(DrillCommand::parse(":reset"), Some(DrillCommand::Reset));
        assert_eq!(DrillCommand::parse("stats"), None);
    }

    #[test]
    fn mistake_is_counted_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut counts = WrongCountStore::default();
        let (outcome, out) = run_with("go\nwent\ngoed\nq\n", &mut counts, dir.path());

        assert_eq!(outcome.verbs_asked, 1);
        assert_eq!(outcome.perfect, 0);
        assert_eq!(counts.count("go"), 1);
        assert_eq!(WrongCountStore::load(&dir.path().join("state.json")).count("go"), 1);
        assert!(out.contains("  [OK] go | [OK] went | [MISS] gone"));
        assert!(out.contains("Allowed variants: base=go; past=went; pp=gone"));
        assert!(out.contains("Mistakes for 'go': 1"));
        assert!(out.contains("Goodbye. (progress file: "));
    }

    #[test]
    fn perfect_answer_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut counts = WrongCountStore::default();
        let (outcome, out) = run_with("go\nwent\ngone\n", &mut counts, dir.path());

        assert_eq!(outcome.perfect, 1);
        assert!(counts.is_empty());
        assert!(!dir.path().join("state.json").exists());
        assert!(out.contains("Mistakes for 'go': 0"));
        assert!(out.contains("  (no mistakes saved yet)"));
    }

    #[test]
    fn reset_command_clears_counts_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut counts = WrongCountStore::default();
        counts.increment(&go_only()[0]);
        counts.save(&dir.path().join("state.json")).unwrap();

        let (outcome, out) = run_with(":reset\n", &mut counts, dir.path());
        assert_eq!(outcome.commands, 1);
        assert_eq!(outcome.verbs_asked, 0);
        assert!(counts.is_empty());
        assert!(!dir.path().join("state.json").exists());
        assert!(out.contains("Progress deleted."));
    }

    #[test]
    fn stats_listing_is_capped() {
        let mut counts = WrongCountStore::default();
        for verb in catalog::verbs().iter().take(STATS_ROWS + 2) {
            counts.increment(verb);
        }
        let lines = stats_lines(&counts, catalog::verbs(), Path::new("state.json"));
        assert_eq!(lines[0], "Stats (only verbs with mistakes). File: state.json");
        assert!(lines.contains(&"  ... (2 more)".to_string()));
        // header, rows, overflow note, trailing blank
        assert_eq!(lines.len(), 1 + STATS_ROWS + 2);
    }
}
