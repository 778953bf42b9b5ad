mod stats;
mod verb;

pub use stats::{FIELDS_PER_VERB, PerVerbStats, SessionRecord, accuracy_percent};
pub use verb::{VerbField, VerbKey, VerbRecord};
