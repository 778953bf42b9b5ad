use std::io::{self, BufRead, Write};

use verbs_core::Clock;
use verbs_core::answer::AnswerChecker;
use verbs_core::model::{FIELDS_PER_VERB, VerbField, VerbRecord};
use verbs_core::time::elapsed_secs;

use crate::terminal::{Reply, Terminal};

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// A wrong field: what the user typed and what was expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMiss {
    pub field: VerbField,
    pub answer: String,
    pub expected: &'static str,
}

/// One scored three-field answer to a verb.
#[derive(Debug, Clone, PartialEq)]
pub struct VerbAttempt {
    pub verb: VerbRecord,
    /// Answers as typed (after space blocking), in asking order.
    pub answers: [String; 3],
    pub correct: [bool; 3],
    /// First prompt to last answer.
    pub elapsed_s: f64,
}

impl VerbAttempt {
    #[must_use]
    pub fn score(
        verb: VerbRecord,
        answers: [String; 3],
        checker: &AnswerChecker,
        elapsed_s: f64,
    ) -> Self {
        let correct = VerbField::ALL.map(|f| checker.is_correct(&answers[f.index()], verb.form(f)));
        Self {
            verb,
            answers,
            correct,
            elapsed_s,
        }
    }

    /// Correct fields, `0..=3`.
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
            .iter()
            .fold(0, |n, ok| if *ok { n + 1 } else { n })
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct_count() == FIELDS_PER_VERB
    }

    #[must_use]
    pub fn is_correct(&self, field: VerbField) -> bool {
        self.correct[field.index()]
    }

    #[must_use]
    pub fn misses(&self) -> Vec<FieldMiss> {
        VerbField::ALL
            .into_iter()
            .filter(|f| !self.is_correct(*f))
            .map(|f| FieldMiss {
                field: f,
                answer: self.answers[f.index()].clone(),
                expected: self.verb.form(f),
            })
            .collect()
    }
}

//
// ─── ASKING ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    Answered(VerbAttempt),
    /// The first answer was claimed by `intercept`; nothing was scored.
    Intercepted(String),
    /// The user quit before answering all three fields; nothing was scored.
    Quit,
}

/// Show the German meaning and ask the three forms in order.
///
/// `intercept` sees the first answer only; returning true stops the attempt so
/// the caller can treat the text as a command.
///
/// # Errors
///
/// Propagates terminal read/write failures.
pub fn ask_verb<R, W, F>(
    term: &mut Terminal<R, W>,
    verb: &VerbRecord,
    checker: &AnswerChecker,
    clock: &Clock,
    intercept: F,
) -> io::Result<AskOutcome>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> bool,
{
    term.say(format!("German meaning: {}", verb.german))?;

    let started = clock.now();
    let mut answers: [String; 3] = Default::default();
    for field in VerbField::ALL {
        let prompt = format!("{}: ", field.label());
        let answer = match term.ask_field(&prompt, verb.form(field))? {
            Reply::Answer(answer) => answer,
            Reply::Quit => return Ok(AskOutcome::Quit),
        };
        if field == VerbField::Infinitive && intercept(&answer) {
            return Ok(AskOutcome::Intercepted(answer));
        }
        answers[field.index()] = answer;
    }
    let elapsed = elapsed_secs(started, clock.now());

    Ok(AskOutcome::Answered(VerbAttempt::score(
        *verb, answers, checker, elapsed,
    )))
}
