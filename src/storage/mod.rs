//! Database operations.
//!
//! SQLite storage for normalized draws and the sync run ledger.

pub mod migrations;
pub mod pool;
pub mod queries;
pub mod runs;
pub mod upsert;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use migrations::{create_table, run_migrations};
pub use pool::init_db_pool_with_path;
pub use queries::{
    count_draws, get_statistics, query_all, query_by_code, query_by_year, query_latest,
    DrawStatistics, YearCount,
};
pub use runs::{
    finish_sync_run, insert_sync_run, query_sync_history, SyncRunFinish, SyncRunStart,
    SyncRunSummary,
};
pub use upsert::{upsert_draws, UpsertOutcome};
