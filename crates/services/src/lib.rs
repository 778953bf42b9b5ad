#![forbid(unsafe_code)]

pub mod continuous;
pub mod error;
pub mod selector;
pub mod sessions;
pub mod terminal;

pub use verbs_core::Clock;

pub use continuous::{ContinuousDrill, ContinuousOutcome, DrillCommand};
pub use error::SessionError;
pub use selector::Selector;
pub use sessions::{FiniteSession, SessionOutcome, SessionPhase, VerbAttempt};
pub use terminal::{Reply, Terminal};
