#![forbid(unsafe_code)]

pub mod json;
pub mod paths;
pub mod repository;
pub mod transcript;

pub use json::{ProgressReport, ProgressStore, WrongCountStore};
pub use paths::DataPaths;
pub use repository::{PerformanceRow, StorageError, VerbPerformance};
pub use transcript::SessionTranscript;
