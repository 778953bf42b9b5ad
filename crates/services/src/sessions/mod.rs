mod attempt;
mod plan;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use attempt::{AskOutcome, FieldMiss, VerbAttempt, ask_verb};
pub use plan::RepeatRounds;
pub use service::{FiniteSession, SessionOutcome, SessionPhase};
pub use view::{final_result_lines, mistakes_recap_lines, progress_report_lines};
