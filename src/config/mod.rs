//! Application configuration.
//!
//! Splits configuration into CLI/library types (`types`) and operational
//! constants (`constants`).

pub mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
