//! Run bookkeeping shared by sync, backfill and import.

use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use log::{info, warn};
use serde_json::Value;
use sqlx::SqlitePool;
use strum_macros::Display;

use crate::error_handling::{SkipReason, SyncStats};
use crate::fetch::DateWindow;
use crate::storage::{
    finish_sync_run, insert_sync_run, upsert_draws, SyncRunFinish, SyncRunStart, UpsertOutcome,
};

use super::prepare::prepare_draws;

const MAX_RUN_ID_ATTEMPTS: u32 = 1000;

/// What kind of run produced a [`SyncReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SyncMode {
    /// Incremental catch-up from the latest stored draw
    Sync,
    /// Explicit range of years
    Backfill,
    /// Notices loaded from JSON files
    Import,
}

/// Results of a completed run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Identifier of the row in `sync_runs`
    pub run_id: String,
    /// Kind of run
    pub mode: SyncMode,
    /// Dates requested from the source (`None` if nothing was fetched)
    pub window: Option<DateWindow>,
    /// Notices received
    pub fetched: usize,
    /// What the upsert did
    pub outcome: UpsertOutcome,
    /// Notices dropped before the upsert, by reason
    pub skipped: Vec<(SkipReason, usize)>,
    /// Wall time of the run
    pub elapsed_seconds: f64,
}

impl SyncReport {
    /// Total notices dropped before the upsert.
    pub fn skipped_total(&self) -> usize {
        self.skipped.iter().map(|(_, count)| count).sum()
    }

    /// `true` when the store already held every draw up to today.
    pub fn is_up_to_date(&self) -> bool {
        self.mode == SyncMode::Sync && self.window.is_none()
    }
}

/// A run recorded in `sync_runs` that has started but not yet finished.
pub(crate) struct RunContext {
    run_id: String,
    mode: SyncMode,
    window: Option<DateWindow>,
    timer: Instant,
}

impl RunContext {
    /// Records the start of a run.
    pub(crate) async fn begin(
        pool: &SqlitePool,
        mode: SyncMode,
        window: Option<DateWindow>,
    ) -> Result<Self> {
        // Ids are `<mode>_<start ms>`; a clash within the same millisecond
        // moves the start forward until the id is free.
        let mut start_time_ms = Utc::now().timestamp_millis();
        let mut attempts = 0;
        let run_id = loop {
            let run_id = format!("{}_{}", mode, start_time_ms);
            let inserted = insert_sync_run(
                pool,
                &SyncRunStart {
                    run_id: &run_id,
                    mode: &mode.to_string(),
                    window_start: window.map(|w| w.start),
                    window_end: window.map(|w| w.end),
                    start_time_ms,
                },
            )
            .await
            .context("Failed to insert run metadata")?;
            if inserted {
                break run_id;
            }
            attempts += 1;
            if attempts >= MAX_RUN_ID_ATTEMPTS {
                return Err(anyhow!("No free run id near {}", run_id));
            }
            start_time_ms += 1;
        };

        match window {
            Some(w) => info!("Starting run {} for {}", run_id, w),
            None => info!("Starting run {}", run_id),
        }

        Ok(Self {
            run_id,
            mode,
            window,
            timer: Instant::now(),
        })
    }

    /// Marks the run as failed.
    ///
    /// A failure to record the error is only logged so the caller can still
    /// return the original error.
    pub(crate) async fn fail(self, pool: &SqlitePool, error: &anyhow::Error) {
        let message = format!("{:#}", error);
        let finish = SyncRunFinish {
            run_id: &self.run_id,
            fetched: 0,
            inserted: 0,
            updated: 0,
            unchanged: 0,
            skipped: 0,
            error: Some(&message),
        };
        if let Err(e) = finish_sync_run(pool, &finish).await {
            warn!("Failed to record failure of run {}: {}", self.run_id, e);
        }
    }

    /// Decodes, normalizes and upserts `notices`, then records the counts.
    pub(crate) async fn store(
        self,
        pool: &SqlitePool,
        notices: &[Value],
    ) -> Result<SyncReport> {
        let stats = SyncStats::new();
        let draws = prepare_draws(notices, self.window.as_ref(), &stats);

        let outcome = match upsert_draws(pool, &draws).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let err = anyhow::Error::new(e).context("Failed to upsert draws");
                self.fail(pool, &err).await;
                return Err(err);
            }
        };

        self.finish(pool, notices.len(), outcome, &stats).await
    }

    /// Records a run that fetched nothing.
    pub(crate) async fn finish_empty(self, pool: &SqlitePool) -> Result<SyncReport> {
        self.finish(pool, 0, UpsertOutcome::default(), &SyncStats::new())
            .await
    }

    async fn finish(
        self,
        pool: &SqlitePool,
        fetched: usize,
        outcome: UpsertOutcome,
        stats: &SyncStats,
    ) -> Result<SyncReport> {
        finish_sync_run(
            pool,
            &SyncRunFinish {
                run_id: &self.run_id,
                fetched,
                inserted: outcome.inserted,
                updated: outcome.updated,
                unchanged: outcome.unchanged,
                skipped: stats.total(),
                error: None,
            },
        )
        .await
        .context("Failed to record run results")?;

        let report = SyncReport {
            run_id: self.run_id,
            mode: self.mode,
            window: self.window,
            fetched,
            outcome,
            skipped: stats.non_zero(),
            elapsed_seconds: self.timer.elapsed().as_secs_f64(),
        };

        info!(
            "Run {} done in {:.1}s: {} fetched, {} inserted, {} updated, {} unchanged, {} skipped",
            report.run_id,
            report.elapsed_seconds,
            report.fetched,
            outcome.inserted,
            outcome.updated,
            outcome.unchanged,
            report.skipped_total()
        );
        for (reason, count) in &report.skipped {
            info!("   {}: {}", reason, count);
        }

        Ok(report)
    }
}
