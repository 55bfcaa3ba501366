//! Shared test helpers for storage module tests.

use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::models::{LotteryDraw, PrizeGrade};
use crate::storage::run_migrations;

/// Creates an in-memory database pool with migrations applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Builds a draw with plausible values for `code` on `date` (YYYY-MM-DD).
pub fn sample_draw(code: &str, date: &str) -> LotteryDraw {
    LotteryDraw {
        code: code.to_string(),
        week: "二".to_string(),
        red: "01,08,13,22,28,33".to_string(),
        blue: "05".to_string(),
        sales: 350_000_000,
        poolmoney: 2_000_000_000,
        content: "共2注。".to_string(),
        prizegrades: vec![PrizeGrade {
            grade: 1,
            typenum: "2".to_string(),
            typemoney: "7500000".to_string(),
        }],
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date"),
    }
}
