//! lottery_sync library: incremental sync of double-color-ball draw results
//!
//! This library fetches draw notices from the public draw-notice endpoint,
//! normalizes them and merges them into a SQLite database by issue code, so
//! repeated or overlapping syncs never create duplicates.
//!
//! # Example
//!
//! ```no_run
//! use lottery_sync::{connect_source, open_store, sync_latest, Config};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let pool = open_store(&config).await?;
//! let source = connect_source(&config, Duration::ZERO)?;
//!
//! let today = chrono::Local::now().date_naive();
//! let report = sync_latest(&pool, &source, today, config.bootstrap_date).await?;
//! println!("{} new draw(s)", report.outcome.inserted);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod storage;
pub mod sync;

// Re-export public API
pub use config::{Cli, Command, Config, LogFormat, LogLevel};
pub use fetch::{DateWindow, DrawNoticeClient, DrawSource};
pub use models::{DrawNotice, LotteryDraw, PrizeGrade};
pub use run::{connect_source, open_store};
pub use storage::{query_sync_history, run_migrations, SyncRunSummary, UpsertOutcome};
pub use sync::{
    backfill, fetch_json, import_json_files, sync_latest, watch, ImportReport, SyncMode,
    SyncReport, WatchSummary,
};

// Wiring shared by the binary and library users
mod run {
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::info;
    use sqlx::SqlitePool;

    use crate::config::Config;
    use crate::fetch::DrawNoticeClient;
    use crate::initialization::init_client;
    use crate::storage::{init_db_pool_with_path, run_migrations};

    /// Opens (creating if needed) the database at `config.db_path` and
    /// brings its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened, or if a
    /// migration fails.
    pub async fn open_store(config: &Config) -> Result<SqlitePool> {
        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Using database {}", config.db_path.display());
        Ok(pool)
    }

    /// Builds the HTTP draw source described by `config`.
    ///
    /// `window_pause` is slept between the per-year requests of one fetch;
    /// pass [`Duration::ZERO`] for short incremental syncs.
    pub fn connect_source(config: &Config, window_pause: Duration) -> Result<DrawNoticeClient> {
        let http = init_client(config).context("Failed to initialize HTTP client")?;
        let client = DrawNoticeClient::new(http, config)
            .context("Failed to configure draw-notice client")?
            .with_window_pause(window_pause);
        Ok(client)
    }
}
