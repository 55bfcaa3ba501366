//! Database connection pool management.
//!
//! This module initializes the SQLite connection pool with:
//! - Automatic database file creation
//! - WAL mode for concurrent readers alongside a writer
//! - A busy timeout so concurrent writers queue instead of failing

use std::path::Path;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DB_BUSY_TIMEOUT;
use crate::error_handling::DatabaseError;

/// Maximum pooled connections; SQLite serializes writers anyway.
const MAX_CONNECTIONS: u32 = 5;

/// Initializes and returns a database connection pool for `db_path`.
///
/// Creates the parent directory and the database file if they don't exist.
/// Migrations are not run here; call [`crate::storage::run_migrations`].
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<SqlitePool, DatabaseError> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                error!("Failed to create database directory: {e}");
                DatabaseError::FileCreationError(e.to_string())
            })?;
        }
    }

    if db_path.exists() {
        info!("Opening existing database {}", db_path.display());
    } else {
        info!("Creating database {}", db_path.display());
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(DB_BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })
}
