//! Idempotent draw upserts.
//!
//! Each draw is merged by issue code inside one transaction per batch:
//!
//! 1. `INSERT ... ON CONFLICT(code) DO NOTHING` claims new codes
//! 2. a conditional `UPDATE` rewrites an existing row only if a column differs
//!
//! The first statement is a write, so the transaction holds SQLite's write
//! lock from the start and never has to upgrade a read snapshot. A concurrent
//! sync therefore waits on the busy timeout rather than failing, and re-syncing
//! the same window leaves rows (and `updated_at_ms`) untouched.

use log::debug;
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::models::LotteryDraw;

/// Counts of what an upsert did to each draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// New issue codes
    pub inserted: usize,
    /// Existing codes whose content changed
    pub updated: usize,
    /// Existing codes with identical content
    pub unchanged: usize,
}

impl UpsertOutcome {
    /// Number of rows written (inserted or updated).
    pub fn written(&self) -> usize {
        self.inserted + self.updated
    }

    /// Number of draws processed.
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.unchanged
    }
}

const INSERT_NEW: &str = "INSERT INTO double_color_ball
        (code, week, red, blue, sales, poolmoney, content, prizegrades, draw_date, updated_at_ms)
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
     ON CONFLICT(code) DO NOTHING";

const UPDATE_CHANGED: &str = "UPDATE double_color_ball
     SET week = ?, red = ?, blue = ?, sales = ?, poolmoney = ?, content = ?,
         prizegrades = ?, draw_date = ?, updated_at_ms = ?
     WHERE code = ?
       AND (week IS NOT ? OR red IS NOT ? OR blue IS NOT ? OR sales IS NOT ?
            OR poolmoney IS NOT ? OR content IS NOT ? OR prizegrades IS NOT ?
            OR draw_date IS NOT ?)";

/// Upserts `draws` in a single transaction.
///
/// Draws are applied in order, so if a code appears twice the later copy wins.
/// Either every draw is merged or, on error, none are.
pub async fn upsert_draws(
    pool: &SqlitePool,
    draws: &[LotteryDraw],
) -> Result<UpsertOutcome, DatabaseError> {
    let mut outcome = UpsertOutcome::default();
    if draws.is_empty() {
        return Ok(outcome);
    }

    let now_ms = chrono::Utc::now().timestamp_millis();
    let mut tx = pool.begin().await?;

    for draw in draws {
        let prizegrades = serde_json::to_string(&draw.prizegrades).map_err(|e| {
            DatabaseError::CorruptRow {
                code: draw.code.clone(),
                reason: format!("cannot encode prize grades: {e}"),
            }
        })?;
        let draw_date = draw.date.format("%Y-%m-%d").to_string();

        let inserted = sqlx::query(INSERT_NEW)
            .bind(&draw.code)
            .bind(&draw.week)
            .bind(&draw.red)
            .bind(&draw.blue)
            .bind(draw.sales)
            .bind(draw.poolmoney)
            .bind(&draw.content)
            .bind(&prizegrades)
            .bind(&draw_date)
            .bind(now_ms)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if inserted > 0 {
            outcome.inserted += 1;
            continue;
        }

        let updated = sqlx::query(UPDATE_CHANGED)
            .bind(&draw.week)
            .bind(&draw.red)
            .bind(&draw.blue)
            .bind(draw.sales)
            .bind(draw.poolmoney)
            .bind(&draw.content)
            .bind(&prizegrades)
            .bind(&draw_date)
            .bind(now_ms)
            .bind(&draw.code)
            .bind(&draw.week)
            .bind(&draw.red)
            .bind(&draw.blue)
            .bind(draw.sales)
            .bind(draw.poolmoney)
            .bind(&draw.content)
            .bind(&prizegrades)
            .bind(&draw_date)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if updated > 0 {
            debug!("Issue {} changed upstream, row updated", draw.code);
            outcome.updated += 1;
        } else {
            outcome.unchanged += 1;
        }
    }

    tx.commit().await?;
    Ok(outcome)
}
