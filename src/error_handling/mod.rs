//! Error handling and sync statistics.
//!
//! This module provides:
//! - Error type definitions for each layer
//! - Skip reasons for notices that are fetched but not stored
//! - Thread-safe skip counters

mod stats;
mod types;

// Re-export public API
pub use stats::SyncStats;
pub use types::{DatabaseError, FetchError, InitializationError, NormalizeError, SkipReason};
