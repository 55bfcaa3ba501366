//! Database migration management.

use log::info;
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// Runs the migrations embedded from the `migrations/` directory.
///
/// Already-applied migrations are skipped, so this is safe on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Creates the draw table and its indexes if they do not exist.
pub async fn create_table(pool: &SqlitePool) -> Result<(), DatabaseError> {
    run_migrations(pool).await?;
    info!("Draw table and indexes are in place");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_test_pool().await;
        create_table(&pool).await.expect("second run should succeed");

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('double_color_ball', 'sync_runs') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("query tables");
        assert_eq!(tables, vec!["double_color_ball", "sync_runs"]);

        let index: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_double_color_ball_date'",
        )
        .fetch_one(&pool)
        .await
        .expect("query index");
        assert_eq!(index, 1);
    }
}
