//! Periodic sync loop.

use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};
use sqlx::SqlitePool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::sync_latest;
use crate::config::MIN_WATCH_INTERVAL;
use crate::fetch::DrawSource;

/// Counts of ticks run by [`watch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Ticks started
    pub runs: usize,
    /// Ticks whose sync returned an error
    pub failures: usize,
}

/// Runs [`sync_latest`] immediately and then every `interval` until `cancel`
/// fires.
///
/// `interval` is raised to at least [`MIN_WATCH_INTERVAL`]. `today` is
/// called on every tick. A failed tick is logged and the loop
/// keeps going. Cancellation is only observed between ticks, so a sync in
/// progress always completes.
pub async fn watch<S, F>(
    pool: &SqlitePool,
    source: &S,
    interval: Duration,
    bootstrap: NaiveDate,
    today: F,
    cancel: CancellationToken,
) -> Result<WatchSummary>
where
    S: DrawSource,
    F: Fn() -> NaiveDate,
{
    let interval = interval.max(MIN_WATCH_INTERVAL);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut summary = WatchSummary::default();

    info!("Watching for new draws every {}s", interval.as_secs());

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Watch cancelled after {} run(s)", summary.runs);
                break;
            }
            _ = ticker.tick() => {
                summary.runs += 1;
                match sync_latest(pool, source, today(), bootstrap).await {
                    Ok(report) if report.is_up_to_date() => {}
                    Ok(report) => {
                        if report.outcome.written() > 0 {
                            info!("Stored {} new or changed draw(s)", report.outcome.written());
                        }
                    }
                    Err(e) => {
                        summary.failures += 1;
                        warn!("Sync failed, retrying next tick: {:#}", e);
                    }
                }
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::count_draws;
    use crate::storage::test_helpers::create_test_pool;
    use crate::sync::test_support::{notice, FakeSource};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_watch_syncs_until_cancelled() {
        let pool = create_test_pool().await;
        let source = FakeSource::new(vec![notice("2025110", "2025-09-25")]);
        let cancel = CancellationToken::new();

        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            stopper.cancel();
        });

        let summary = watch(
            &pool,
            &source,
            Duration::from_secs(1),
            d("2025-09-01"),
            || d("2025-10-01"),
            cancel,
        )
        .await
        .unwrap();

        assert!(summary.runs >= 2);
        assert_eq!(summary.failures, 0);
        assert_eq!(count_draws(&pool).await.unwrap(), 1);
        // Only the first tick has a gap; later ticks see 2025-09-25 stored.
        let requests = source.requests();
        assert_eq!(requests[0], (d("2025-09-01"), d("2025-10-01")));
        assert!(requests[1..]
            .iter()
            .all(|r| *r == (d("2025-09-26"), d("2025-10-01"))));
    }

    #[tokio::test]
    async fn test_watch_continues_after_failures() {
        let pool = create_test_pool().await;
        let source = FakeSource {
            fail: true,
            ..Default::default()
        };
        let cancel = CancellationToken::new();

        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            stopper.cancel();
        });

        let summary = watch(
            &pool,
            &source,
            Duration::from_secs(1),
            d("2025-09-01"),
            || d("2025-10-01"),
            cancel,
        )
        .await
        .unwrap();

        assert!(summary.runs >= 2, "loop should keep ticking after a failure");
        assert_eq!(summary.failures, summary.runs);
    }

    #[tokio::test]
    async fn test_watch_cancelled_before_start() {
        let pool = create_test_pool().await;
        let source = FakeSource::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let summary = watch(
            &pool,
            &source,
            Duration::from_secs(3600),
            d("2025-09-01"),
            || d("2025-10-01"),
            cancel,
        )
        .await
        .unwrap();

        assert_eq!(summary, WatchSummary::default());
    }

    #[tokio::test]
    async fn test_watch_zero_interval_is_raised_to_minimum() {
        let pool = create_test_pool().await;
        let source = FakeSource::new(vec![notice("2025110", "2025-09-25")]);
        let cancel = CancellationToken::new();

        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            stopper.cancel();
        });

        let summary = watch(
            &pool,
            &source,
            Duration::ZERO,
            d("2025-09-01"),
            || d("2025-10-01"),
            cancel,
        )
        .await
        .unwrap();

        // Only the immediate first tick fits before cancellation
        assert_eq!(summary.runs, 1);
        assert_eq!(source.requests().len(), 1);
    }
}
