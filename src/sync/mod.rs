//! Incremental sync pipeline.
//!
//! A run plans the date range to fetch, pulls raw notices through a
//! [`DrawSource`], normalizes and de-duplicates them, upserts the result and
//! records the run in `sync_runs`.
//!
//! - [`sync_latest`]: catch up from the latest stored draw to today
//! - [`backfill`]: re-sync whole years
//! - [`import_json_files`] / [`fetch_json`]: yearly JSON dumps
//! - [`watch`]: run [`sync_latest`] periodically until cancelled

mod files;
mod plan;
mod prepare;
mod run;
mod watch;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::info;
use sqlx::SqlitePool;

pub use files::{fetch_json, import_json_files, ImportReport};
pub use plan::{plan_sync, SyncPlan};
pub use prepare::prepare_draws;
pub use run::{SyncMode, SyncReport};
pub use watch::{watch, WatchSummary};

use crate::fetch::{year_span, DateWindow, DrawSource};
use crate::storage::query_latest;
use run::RunContext;

/// Fetches and stores every draw newer than the latest stored one.
///
/// With an empty store the range starts at `bootstrap`. When nothing can be
/// missing the source is not contacted and the run is recorded with no
/// window.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written, or if the fetch
/// fails. A failed run is still recorded with its error message.
pub async fn sync_latest<S: DrawSource>(
    pool: &SqlitePool,
    source: &S,
    today: NaiveDate,
    bootstrap: NaiveDate,
) -> Result<SyncReport> {
    let latest = query_latest(pool)
        .await
        .context("Failed to read latest stored draw")?;

    match plan_sync(latest.as_ref(), today, bootstrap) {
        SyncPlan::UpToDate { latest } => {
            match latest {
                Some(date) => info!("Latest stored draw is from {}, nothing to fetch", date),
                None => info!("Bootstrap date {} is after {}, nothing to fetch", bootstrap, today),
            }
            RunContext::begin(pool, SyncMode::Sync, None)
                .await?
                .finish_empty(pool)
                .await
        }
        SyncPlan::Fetch(window) => fetch_and_store(pool, source, SyncMode::Sync, window).await,
    }
}

/// Re-fetches and upserts the draws of `from_year..=to_year`.
///
/// The range is cut off at `today`. Re-running a backfill over the same years
/// leaves unchanged rows untouched.
pub async fn backfill<S: DrawSource>(
    pool: &SqlitePool,
    source: &S,
    from_year: i32,
    to_year: i32,
    today: NaiveDate,
) -> Result<SyncReport> {
    let span = year_span(from_year, to_year)
        .ok_or_else(|| anyhow!("Invalid year range {}..={}", from_year, to_year))?;
    if span.start > today {
        return Err(anyhow!(
            "Year {} is in the future (today is {})",
            from_year,
            today
        ));
    }
    let window = DateWindow {
        start: span.start,
        end: span.end.min(today),
    };
    fetch_and_store(pool, source, SyncMode::Backfill, window).await
}

async fn fetch_and_store<S: DrawSource>(
    pool: &SqlitePool,
    source: &S,
    mode: SyncMode,
    window: DateWindow,
) -> Result<SyncReport> {
    let run = RunContext::begin(pool, mode, Some(window)).await?;

    let notices = match source.fetch_range(window.start, window.end).await {
        Ok(notices) => notices,
        Err(e) => {
            let err = anyhow::Error::new(e).context(format!("Failed to fetch draws for {}", window));
            run.fail(pool, &err).await;
            return Err(err);
        }
    };

    if notices.is_empty() {
        info!("No draws published for {}", window);
    }
    run.store(pool, &notices).await
}
