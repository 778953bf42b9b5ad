use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use rand::Rng;
use tracing::{info, warn};

use storage::{DataPaths, ProgressStore, SessionTranscript};
use verbs_core::answer::AnswerChecker;
use verbs_core::model::{FIELDS_PER_VERB, SessionRecord, VerbRecord, accuracy_percent};
use verbs_core::time::format_mmss;
use verbs_core::{Clock, DrillConfig};

use super::attempt::{AskOutcome, VerbAttempt, ask_verb};
use super::plan::RepeatRounds;
use super::view::{final_result_lines, mistakes_recap_lines, progress_report_lines};
use crate::error::SessionError;
use crate::selector::Selector;
use crate::terminal::Terminal;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a finite session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    FirstPass,
    Repeat { round: u32 },
    Summarizing,
    Done,
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Everything a finished (or abandoned) finite session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    /// Verbs drawn for the first pass.
    pub sample_size: usize,
    /// Verb attempts scored across all passes.
    pub verbs_asked: u32,
    pub total_questions: u32,
    pub total_correct: u32,
    pub total_time_s: f64,
    pub rounds_run: u32,
    pub max_rounds: u32,
    /// First-pass attempts with at least one wrong field.
    pub first_pass_mistakes: Vec<VerbAttempt>,
    /// Wrong-set left after the last repeat round.
    pub still_wrong: Vec<VerbRecord>,
    /// The user quit or input ended before the plan was finished.
    pub quit_early: bool,
}

impl SessionOutcome {
    fn empty(sample_size: usize, max_rounds: u32) -> Self {
        Self {
            sample_size,
            verbs_asked: 0,
            total_questions: 0,
            total_correct: 0,
            total_time_s: 0.0,
            rounds_run: 0,
            max_rounds,
            first_pass_mistakes: Vec::new(),
            still_wrong: Vec::new(),
            quit_early: false,
        }
    }

    fn add(&mut self, attempt: &VerbAttempt) {
        self.verbs_asked += 1;
        self.total_questions += FIELDS_PER_VERB;
        self.total_correct += attempt.correct_count();
        self.total_time_s += attempt.elapsed_s;
    }

    #[must_use]
    pub fn accuracy_percent(&self) -> f64 {
        accuracy_percent(self.total_correct, self.total_questions)
    }

    #[must_use]
    pub fn average_time_per_verb_s(&self) -> f64 {
        if self.verbs_asked == 0 {
            return 0.0;
        }
        self.total_time_s / f64::from(self.verbs_asked)
    }

    #[must_use]
    pub fn to_record(&self, timestamp: NaiveDateTime) -> SessionRecord {
        SessionRecord::new(
            timestamp,
            u32::try_from(self.sample_size).unwrap_or(u32::MAX),
            self.total_questions,
            self.total_correct,
            self.total_time_s,
        )
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A finite drill: a random batch of distinct verbs, then bounded repeat
/// rounds over the verbs that had a wrong field.
pub struct FiniteSession<'a> {
    catalog: &'a [VerbRecord],
    config: DrillConfig,
    checker: AnswerChecker,
    clock: Clock,
    phase: SessionPhase,
}

impl<'a> FiniteSession<'a> {
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the catalog has no verbs.
    pub fn new(catalog: &'a [VerbRecord], config: DrillConfig) -> Result<Self, SessionError> {
        if catalog.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            catalog,
            checker: AnswerChecker::from_config(&config),
            config,
            clock: Clock::default_clock(),
            phase: SessionPhase::Idle,
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Load progress, drill, then write the transcript and save progress.
    ///
    /// Persistence failures are reported on the terminal and logged; the
    /// summary is shown regardless. Moves the phase to `Done`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the terminal cannot be used. Answers
    /// scored before the failure are still saved.
    pub fn run_persisted<R, W, G>(
        &mut self,
        term: &mut Terminal<R, W>,
        paths: &DataPaths,
        rng: &mut G,
    ) -> Result<SessionOutcome, SessionError>
    where
        R: BufRead,
        W: Write,
        G: Rng + ?Sized,
    {
        let started = self.clock.local_stamp();
        let mut progress = ProgressStore::load(paths.progress_file());

        print_intro(term)?;
        if let Some(report) = progress.report() {
            for line in progress_report_lines(&report) {
                term.say(line)?;
            }
            term.blank()?;
        }

        let mut transcript = SessionTranscript::new();
        let outcome = match self.run(term, &mut progress, &mut transcript, rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "drill aborted, saving answers scored so far");
                self.persist(&progress, &transcript, paths, started);
                return Err(err);
            }
        };

        for line in final_result_lines(&outcome) {
            transcript.line(line);
        }
        if outcome.still_wrong.is_empty() {
            transcript.line("All repeated verbs were answered correctly.");
        } else {
            transcript.line(format!(
                "Still wrong after repetitions (max {} rounds): {}",
                outcome.max_rounds,
                outcome.still_wrong.len()
            ));
        }
        transcript.blank();
        for line in mistakes_recap_lines(&outcome) {
            transcript.line(line);
        }

        if outcome.verbs_asked > 0 {
            progress.record_session(outcome.to_record(self.clock.local_stamp()));
        }

        let transcript_path = paths.transcript_file(started);
        let warnings = self.persist(&progress, &transcript, paths, started);

        term.blank()?;
        for line in final_result_lines(&outcome) {
            term.say(line)?;
        }
        term.say(format!("Session log saved to: {}", transcript_path.display()))?;
        term.say(format!("Progress file: {}", paths.progress_file().display()))?;
        term.blank()?;
        for line in mistakes_recap_lines(&outcome) {
            term.say(line)?;
        }
        for line in warnings {
            term.say(line)?;
        }

        if let Some(report) = progress.report() {
            term.blank()?;
            for line in progress_report_lines(&report) {
                term.say(line)?;
            }
        }

        self.phase = SessionPhase::Done;
        info!(
            verbs = outcome.verbs_asked,
            correct = outcome.total_correct,
            questions = outcome.total_questions,
            rounds = outcome.rounds_run,
            "session finished"
        );
        Ok(outcome)
    }

    /// Write the transcript and save progress, returning a warning per failure.
    fn persist(
        &self,
        progress: &ProgressStore,
        transcript: &SessionTranscript,
        paths: &DataPaths,
        started: NaiveDateTime,
    ) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Err(err) = transcript.write(&paths.transcript_file(started)) {
            warn!(error = %err, "could not write session log");
            warnings.push(format!("Warning: Could not write session log: {err}"));
        }
        if let Err(err) = progress.save(paths.progress_file()) {
            warn!(error = %err, "could not save progress");
            warnings.push(format!("Warning: Could not save progress: {err}"));
        }
        warnings
    }

    /// Drill the first pass and the repeat rounds, updating `progress` per verb.
    ///
    /// Quitting at any prompt abandons the current verb and ends the drill.
    /// On success the phase is left at `Summarizing`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the terminal cannot be used.
    pub fn run<R, W, G>(
        &mut self,
        term: &mut Terminal<R, W>,
        progress: &mut ProgressStore,
        transcript: &mut SessionTranscript,
        rng: &mut G,
    ) -> Result<SessionOutcome, SessionError>
    where
        R: BufRead,
        W: Write,
        G: Rng + ?Sized,
    {
        let batch = Selector::sample_batch(self.catalog, self.config.sample_size(), rng);
        let total = batch.len();
        let mut outcome = SessionOutcome::empty(total, self.config.max_repeat_rounds());
        info!(sample = total, "session started");

        transcript.line("Irregular Verbs Trainer Session Log");
        transcript.line(format!(
            "Timestamp: {}",
            self.clock.local_stamp().format("%Y-%m-%dT%H:%M:%S")
        ));
        transcript.line(format!("Sample size: {total}"));
        transcript.rule('=', 60);
        transcript.blank();

        self.phase = SessionPhase::FirstPass;
        let mut wrong = Vec::new();
        for (idx, verb) in batch.iter().enumerate() {
            let heading = format!("Verb {}/{total}", idx + 1);
            term.blank()?;
            term.say(&heading)?;
            transcript.line(heading);

            let Some(attempt) = self.ask_and_record(term, verb, progress, transcript)? else {
                outcome.quit_early = true;
                break;
            };
            outcome.add(&attempt);
            if !attempt.is_perfect() {
                wrong.push(*verb);
                outcome.first_pass_mistakes.push(attempt);
            }
        }

        let mut rounds = RepeatRounds::new(wrong, self.config.max_repeat_rounds());
        while !outcome.quit_early {
            let Some(pool) = rounds.next_round(rng) else {
                break;
            };
            let round = rounds.rounds_run();
            self.phase = SessionPhase::Repeat { round };
            info!(round, verbs = pool.len(), "repeat round");

            term.blank()?;
            term.say("=".repeat(30))?;
            term.say(format!("REPEAT ROUND {round}"))?;
            term.say("=".repeat(30))?;
            transcript.rule('=', 60);
            transcript.line(format!("REPEAT ROUND {round}"));
            transcript.blank();

            let mut still_wrong = Vec::new();
            for (idx, verb) in pool.iter().enumerate() {
                let heading = format!("Repeat {}/{}", idx + 1, pool.len());
                term.blank()?;
                term.say(&heading)?;
                transcript.line(heading);

                let Some(attempt) = self.ask_and_record(term, verb, progress, transcript)? else {
                    outcome.quit_early = true;
                    break;
                };
                outcome.add(&attempt);
                if !attempt.is_perfect() {
                    still_wrong.push(*verb);
                }
            }
            if outcome.quit_early {
                break;
            }
            rounds.finish_round(&still_wrong);
        }

        outcome.rounds_run = rounds.rounds_run();
        outcome.still_wrong = rounds.pending().to_vec();
        self.phase = SessionPhase::Summarizing;
        Ok(outcome)
    }

    /// Ask one verb, show the result, and record it. `None` when the user quit.
    fn ask_and_record<R, W>(
        &self,
        term: &mut Terminal<R, W>,
        verb: &VerbRecord,
        progress: &mut ProgressStore,
        transcript: &mut SessionTranscript,
    ) -> Result<Option<VerbAttempt>, SessionError>
    where
        R: BufRead,
        W: Write,
    {
        let attempt = match ask_verb(term, verb, &self.checker, &self.clock, |_| false)? {
            AskOutcome::Answered(attempt) => attempt,
            AskOutcome::Intercepted(_) | AskOutcome::Quit => return Ok(None),
        };

        progress.update_per_verb(
            verb,
            attempt.correct_count(),
            attempt.elapsed_s,
            self.clock.local_stamp(),
        );

        let forms = format!(
            "{} | {} | {}",
            verb.infinitive, verb.past_simple, verb.past_participle
        );
        term.say(format!(
            "Time: {} | Correct: {}/{FIELDS_PER_VERB}",
            format_mmss(attempt.elapsed_s),
            attempt.correct_count()
        ))?;

        let [inf, past, part] = &attempt.answers;
        transcript.line(format!("German meaning: {}", verb.german));
        transcript.line(format!(
            "Your answers: inf='{inf}', past='{past}', part='{part}'"
        ));
        transcript.line(format!(
            "Correct:      inf='{}', past='{}', part='{}'",
            verb.infinitive, verb.past_simple, verb.past_participle
        ));
        transcript.line(format!(
            "Result: {}/{FIELDS_PER_VERB} | Time: {:.2}s ({})",
            attempt.correct_count(),
            attempt.elapsed_s,
            format_mmss(attempt.elapsed_s)
        ));

        let misses = attempt.misses();
        if !misses.is_empty() {
            term.say("Correct forms:")?;
            term.say(format!("  {forms}"))?;
            transcript.line("Mistakes:");
            for miss in misses {
                transcript.line(format!(
                    "  - {}: user='{}' -> correct='{}'",
                    miss.field, miss.answer, miss.expected
                ));
            }
        }
        transcript.blank();

        Ok(Some(attempt))
    }
}

fn print_intro<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> std::io::Result<()> {
    term.blank()?;
    term.say("Irregular Verbs Trainer")?;
    term.say("------------------------")?;
    term.say("You will see the German base meaning.")?;
    term.say("Enter the English infinitive, simple past, and past participle.")?;
    term.say("Typing spaces is blocked (beep) unless the correct answer needs spaces (e.g., 'wake up').")?;
    term.say("Type 'q' to quit at any prompt.")?;
    term.blank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;
    use verbs_core::time::fixed_clock;

    fn term(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn go_only() -> [VerbRecord; 1] {
        [VerbRecord::new("go", "went", "gone", "gehen; fahren")]
    }

    fn config(rounds: u32) -> DrillConfig {
        DrillConfig::default()
            .with_sample_size(1)
            .unwrap()
            .with_max_repeat_rounds(rounds)
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(
            FiniteSession::new(&[], DrillConfig::default()),
            Err(SessionError::Empty)
        ));
    }

    #[test]
    fn quit_in_first_pass_skips_rounds_and_keeps_partial_tally() {
        let verbs = [
            VerbRecord::new("go", "went", "gone", "gehen; fahren"),
            VerbRecord::new("be", "was/were", "been", "sein"),
        ];
        let cfg = DrillConfig::default().with_sample_size(2).unwrap();
        let mut session = FiniteSession::new(&verbs, cfg)
            .unwrap()
            .with_clock(fixed_clock());
        let mut progress = ProgressStore::default();
        let mut transcript = SessionTranscript::new();
        let mut rng = StdRng::seed_from_u64(5);

        // Whichever verb comes first gets three wrong answers, then input ends.
        let mut t = term("x\ny\nz\n");
        let outcome = session
            .run(&mut t, &mut progress, &mut transcript, &mut rng)
            .unwrap();

        assert!(outcome.quit_early);
        assert_eq!(outcome.verbs_asked, 1);
        assert_eq!(outcome.total_questions, 3);
        assert_eq!(outcome.total_correct, 0);
        assert_eq!(outcome.rounds_run, 0);
        assert_eq!(outcome.first_pass_mistakes.len(), 1);
        assert_eq!(outcome.still_wrong.len(), 1);
        assert_eq!(progress.verbs.len(), 1);
    }

    #[test]
    fn zero_round_cap_leaves_mistakes_pending() {
        let verbs = go_only();
        let mut session = FiniteSession::new(&verbs, config(0))
            .unwrap()
            .with_clock(fixed_clock());
        let mut progress = ProgressStore::default();
        let mut transcript = SessionTranscript::new();
        let mut rng = StdRng::seed_from_u64(5);

        let mut t = term("go\nwent\ngoed\n");
        let outcome = session
            .run(&mut t, &mut progress, &mut transcript, &mut rng)
            .unwrap();

        assert!(!outcome.quit_early);
        assert_eq!(outcome.rounds_run, 0);
        assert_eq!(outcome.still_wrong, verbs.to_vec());
        assert_eq!(session.phase(), SessionPhase::Summarizing);
    }

    #[test]
    fn outcome_math_handles_empty_sessions() {
        let outcome = SessionOutcome::empty(20, 3);
        assert_eq!(outcome.accuracy_percent(), 0.0);
        assert_eq!(outcome.average_time_per_verb_s(), 0.0);
    }
}
