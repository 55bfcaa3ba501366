//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, paging limits, timeouts)
//! - CLI option types and parsing
//! - The library-level `Config` struct

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, Config, LogFormat, LogLevel};
