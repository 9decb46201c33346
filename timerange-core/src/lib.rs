//! Core shared library for the timerange workspace.
//!
//! This crate exposes the primitives the range library and the CLI
//! depend on: the error taxonomy, instant/duration parsing, exact
//! duration conversions, configuration loading and logging setup.

pub mod config;
pub mod duration;
pub mod errors;
pub mod logging;
pub mod parse;

pub use config::CoreConfig;
pub use errors::{ConfigError, Result as CoreResult, TimeRangeError};
pub use parse::{parse_duration, parse_time, Instant, TimeParser};
