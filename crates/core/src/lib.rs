#![forbid(unsafe_code)]

pub mod answer;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod selection;
pub mod time;

pub use config::DrillConfig;
pub use error::Error;
pub use time::Clock;
