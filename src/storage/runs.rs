//! Sync run ledger.
//!
//! Every sync, backfill and import records a row in `sync_runs` when it
//! starts and fills in its counts (or error) when it ends, so past runs can be
//! reviewed with the `history` subcommand.

use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;

/// Metadata for a sync run, recorded at start.
pub struct SyncRunStart<'a> {
    /// Unique identifier for this run
    pub run_id: &'a str,
    /// `sync`, `backfill` or `import`
    pub mode: &'a str,
    /// First date requested, if the run fetched
    pub window_start: Option<NaiveDate>,
    /// Last date requested
    pub window_end: Option<NaiveDate>,
    /// Start time as milliseconds since Unix epoch
    pub start_time_ms: i64,
}

/// Results of a sync run, recorded at end.
pub struct SyncRunFinish<'a> {
    /// Run to update
    pub run_id: &'a str,
    /// Notices received from the source
    pub fetched: usize,
    /// New draws stored
    pub inserted: usize,
    /// Existing draws rewritten
    pub updated: usize,
    /// Existing draws left as they were
    pub unchanged: usize,
    /// Notices dropped before the upsert
    pub skipped: usize,
    /// Set when the run failed
    pub error: Option<&'a str>,
}

/// Summary of a recorded run, suitable for displaying run history.
#[derive(Debug, Clone)]
pub struct SyncRunSummary {
    /// Unique identifier for this run (e.g., "sync_1760860800000").
    pub run_id: String,
    /// `sync`, `backfill` or `import`
    pub mode: String,
    /// First date requested (None for imports and up-to-date syncs).
    pub window_start: Option<String>,
    /// Last date requested.
    pub window_end: Option<String>,
    /// Start time as milliseconds since Unix epoch.
    pub start_time_ms: i64,
    /// End time as milliseconds since Unix epoch (None if the run never finished).
    pub end_time_ms: Option<i64>,
    /// Notices received from the source
    pub fetched: i64,
    /// New draws stored
    pub inserted: i64,
    /// Existing draws rewritten
    pub updated: i64,
    /// Existing draws left as they were
    pub unchanged: i64,
    /// Notices dropped before the upsert
    pub skipped: i64,
    /// Error message if the run failed
    pub error: Option<String>,
}

fn date_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

/// Inserts the start record of a run.
///
/// Returns `false`, leaving the existing row untouched, if `run_id` is
/// already taken.
pub async fn insert_sync_run(
    pool: &SqlitePool,
    run: &SyncRunStart<'_>,
) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO sync_runs (run_id, mode, window_start, window_end, start_time_ms)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(run_id) DO NOTHING",
    )
    .bind(run.run_id)
    .bind(run.mode)
    .bind(date_text(run.window_start))
    .bind(date_text(run.window_end))
    .bind(run.start_time_ms)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Records the outcome of a run.
pub async fn finish_sync_run(
    pool: &SqlitePool,
    run: &SyncRunFinish<'_>,
) -> Result<(), DatabaseError> {
    let end_time_ms = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        "UPDATE sync_runs
         SET end_time_ms = ?, fetched = ?, inserted = ?, updated = ?, unchanged = ?,
             skipped = ?, error = ?
         WHERE run_id = ?",
    )
    .bind(end_time_ms)
    .bind(run.fetched as i64)
    .bind(run.inserted as i64)
    .bind(run.updated as i64)
    .bind(run.unchanged as i64)
    .bind(run.skipped as i64)
    .bind(run.error)
    .bind(run.run_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns recorded runs, most recent first.
pub async fn query_sync_history(
    pool: &SqlitePool,
    limit: Option<usize>,
) -> Result<Vec<SyncRunSummary>, DatabaseError> {
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let rows = sqlx::query(
        "SELECT run_id, mode, window_start, window_end, start_time_ms, end_time_ms,
                fetched, inserted, updated, unchanged, skipped, error
         FROM sync_runs
         ORDER BY start_time_ms DESC, run_id DESC
         LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<SyncRunSummary, DatabaseError> {
            Ok(SyncRunSummary {
                run_id: row.try_get("run_id")?,
                mode: row.try_get("mode")?,
                window_start: row.try_get("window_start")?,
                window_end: row.try_get("window_end")?,
                start_time_ms: row.try_get("start_time_ms")?,
                end_time_ms: row.try_get("end_time_ms")?,
                fetched: row.try_get("fetched")?,
                inserted: row.try_get("inserted")?,
                updated: row.try_get("updated")?,
                unchanged: row.try_get("unchanged")?,
                skipped: row.try_get("skipped")?,
                error: row.try_get("error")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_run_lifecycle() {
        let pool = create_test_pool().await;
        let start = NaiveDate::from_ymd_opt(2025, 9, 26);
        let end = NaiveDate::from_ymd_opt(2025, 10, 19);

        insert_sync_run(
            &pool,
            &SyncRunStart {
                run_id: "sync_1",
                mode: "sync",
                window_start: start,
                window_end: end,
                start_time_ms: 1_760_000_000_000,
            },
        )
        .await
        .expect("insert");

        let pending = query_sync_history(&pool, None).await.expect("history");
        assert_eq!(pending.len(), 1);
        assert!(pending[0].end_time_ms.is_none());

        finish_sync_run(
            &pool,
            &SyncRunFinish {
                run_id: "sync_1",
                fetched: 10,
                inserted: 8,
                updated: 1,
                unchanged: 0,
                skipped: 1,
                error: None,
            },
        )
        .await
        .expect("finish");

        let runs = query_sync_history(&pool, Some(5)).await.expect("history");
        let run = &runs[0];
        assert_eq!(run.mode, "sync");
        assert_eq!(run.window_start.as_deref(), Some("2025-09-26"));
        assert_eq!(run.window_end.as_deref(), Some("2025-10-19"));
        assert!(run.end_time_ms.is_some());
        assert_eq!(
            (run.fetched, run.inserted, run.updated, run.unchanged, run.skipped),
            (10, 8, 1, 0, 1)
        );
        assert!(run.error.is_none());
    }

    #[tokio::test]
    async fn test_history_most_recent_first_and_limited() {
        let pool = create_test_pool().await;
        for (id, ts) in [("a", 1), ("b", 3), ("c", 2)] {
            insert_sync_run(
                &pool,
                &SyncRunStart {
                    run_id: id,
                    mode: "import",
                    window_start: None,
                    window_end: None,
                    start_time_ms: ts,
                },
            )
            .await
            .expect("insert");
        }
        let runs = query_sync_history(&pool, Some(2)).await.expect("history");
        let ids: Vec<&str> = runs.iter().map(|r| r.run_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_failed_run_keeps_error() {
        let pool = create_test_pool().await;
        insert_sync_run(
            &pool,
            &SyncRunStart {
                run_id: "sync_err",
                mode: "sync",
                window_start: None,
                window_end: None,
                start_time_ms: 1,
            },
        )
        .await
        .expect("insert");
        finish_sync_run(
            &pool,
            &SyncRunFinish {
                run_id: "sync_err",
                fetched: 0,
                inserted: 0,
                updated: 0,
                unchanged: 0,
                skipped: 0,
                error: Some("Unexpected HTTP status 403"),
            },
        )
        .await
        .expect("finish");

        let runs = query_sync_history(&pool, None).await.expect("history");
        assert_eq!(runs[0].error.as_deref(), Some("Unexpected HTTP status 403"));
    }

    #[tokio::test]
    async fn test_duplicate_run_id_keeps_first_row() {
        let pool = create_test_pool().await;
        let first = SyncRunStart {
            run_id: "sync_5",
            mode: "sync",
            window_start: NaiveDate::from_ymd_opt(2025, 9, 26),
            window_end: NaiveDate::from_ymd_opt(2025, 10, 19),
            start_time_ms: 5,
        };
        assert!(insert_sync_run(&pool, &first).await.expect("insert"));

        let clash = SyncRunStart {
            run_id: "sync_5",
            mode: "sync",
            window_start: None,
            window_end: None,
            start_time_ms: 5,
        };
        assert!(!insert_sync_run(&pool, &clash).await.expect("insert"));

        let runs = query_sync_history(&pool, None).await.expect("history");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].window_start.as_deref(), Some("2025-09-26"));
    }
}
