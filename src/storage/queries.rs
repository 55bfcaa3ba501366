//! Read queries over stored draws.
//!
//! Draws are ordered by draw date, with the issue code as tie-breaker so
//! results are deterministic even if two issues share a date.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::models::{LotteryDraw, PrizeGrade};

const DRAW_COLUMNS: &str =
    "code, week, red, blue, sales, poolmoney, content, prizegrades, draw_date";

/// Aggregate counts over the draw table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawStatistics {
    /// Number of stored draws
    pub total_draws: i64,
    /// Sum of ticket sales over all draws
    pub total_sales: i64,
    /// Draw counts per calendar year, oldest first
    pub per_year: Vec<YearCount>,
}

/// Number of draws in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCount {
    /// Calendar year
    pub year: i32,
    /// Draws stored for the year
    pub draws: i64,
}

fn row_to_draw(row: &SqliteRow) -> Result<LotteryDraw, DatabaseError> {
    let code: String = row.try_get("code")?;

    let raw_grades: String = row.try_get("prizegrades")?;
    let prizegrades: Vec<PrizeGrade> = if raw_grades.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&raw_grades).map_err(|e| DatabaseError::CorruptRow {
            code: code.clone(),
            reason: format!("prize grades are not valid JSON: {e}"),
        })?
    };

    let raw_date: String = row.try_get("draw_date")?;
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|e| {
        DatabaseError::CorruptRow {
            code: code.clone(),
            reason: format!("draw date {raw_date:?}: {e}"),
        }
    })?;

    Ok(LotteryDraw {
        week: row.try_get("week")?,
        red: row.try_get("red")?,
        blue: row.try_get("blue")?,
        sales: row.try_get("sales")?,
        poolmoney: row.try_get("poolmoney")?,
        content: row.try_get("content")?,
        prizegrades,
        date,
        code,
    })
}

fn rows_to_draws(rows: &[SqliteRow]) -> Result<Vec<LotteryDraw>, DatabaseError> {
    rows.iter().map(row_to_draw).collect()
}

/// Returns draws newest first, optionally limited to `limit` rows.
pub async fn query_all(
    pool: &SqlitePool,
    limit: Option<usize>,
) -> Result<Vec<LotteryDraw>, DatabaseError> {
    // SQLite treats a negative LIMIT as "no limit"
    let limit = limit.map(|l| l as i64).unwrap_or(-1);
    let rows = sqlx::query(&format!(
        "SELECT {DRAW_COLUMNS} FROM double_color_ball
         ORDER BY draw_date DESC, code DESC
         LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows_to_draws(&rows)
}

/// Returns the number of stored draws.
pub async fn count_draws(pool: &SqlitePool) -> Result<i64, DatabaseError> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM double_color_ball")
        .fetch_one(pool)
        .await?)
}

/// Returns the draws of `year`, oldest first.
pub async fn query_by_year(
    pool: &SqlitePool,
    year: i32,
) -> Result<Vec<LotteryDraw>, DatabaseError> {
    // Range bounds instead of strftime() so the date index is used
    let start = format!("{year:04}-01-01");
    let end = format!("{year:04}-12-31");
    let rows = sqlx::query(&format!(
        "SELECT {DRAW_COLUMNS} FROM double_color_ball
         WHERE draw_date >= ? AND draw_date <= ?
         ORDER BY draw_date ASC, code ASC"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    rows_to_draws(&rows)
}

/// Returns the draw with issue code `code`, if stored.
pub async fn query_by_code(
    pool: &SqlitePool,
    code: &str,
) -> Result<Option<LotteryDraw>, DatabaseError> {
    let row = sqlx::query(&format!(
        "SELECT {DRAW_COLUMNS} FROM double_color_ball WHERE code = ?"
    ))
    .bind(code.trim())
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_draw).transpose()
}

/// Returns the most recent draw (latest date, then highest code).
pub async fn query_latest(pool: &SqlitePool) -> Result<Option<LotteryDraw>, DatabaseError> {
    let row = sqlx::query(&format!(
        "SELECT {DRAW_COLUMNS} FROM double_color_ball
         ORDER BY draw_date DESC, code DESC
         LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(row_to_draw).transpose()
}

/// Returns total draws, total sales and per-year draw counts.
pub async fn get_statistics(pool: &SqlitePool) -> Result<DrawStatistics, DatabaseError> {
    let (total_draws, total_sales): (i64, Option<i64>) =
        sqlx::query_as("SELECT COUNT(*), SUM(sales) FROM double_color_ball")
            .fetch_one(pool)
            .await?;

    let per_year = sqlx::query(
        "SELECT CAST(substr(draw_date, 1, 4) AS INTEGER) AS year, COUNT(*) AS draws
         FROM double_color_ball
         GROUP BY year
         ORDER BY year",
    )
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| -> Result<YearCount, DatabaseError> {
        Ok(YearCount {
            year: row.try_get::<i64, _>("year")? as i32,
            draws: row.try_get("draws")?,
        })
    })
    .collect::<Result<Vec<_>, _>>()?;

    Ok(DrawStatistics {
        total_draws,
        total_sales: total_sales.unwrap_or(0),
        per_year,
    })
}
