//! Concurrent writers against one on-disk database.

use chrono::NaiveDate;

use lottery_sync::storage::{count_draws, init_db_pool_with_path, query_by_code, upsert_draws};
use lottery_sync::{run_migrations, LotteryDraw, PrizeGrade};

fn draw(code: &str, date: &str, sales: i64) -> LotteryDraw {
    LotteryDraw {
        code: code.to_string(),
        week: "日".to_string(),
        red: "04,10,11,19,23,30".to_string(),
        blue: "16".to_string(),
        sales,
        poolmoney: 1_800_000_000,
        content: "共7注。".to_string(),
        prizegrades: vec![PrizeGrade {
            grade: 1,
            typenum: "7".to_string(),
            typemoney: "5000000".to_string(),
        }],
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

fn batch(sales: i64) -> Vec<LotteryDraw> {
    (1..=50)
        .map(|i| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i * 2);
            draw(
                &format!("2024{:03}", i),
                &date.format("%Y-%m-%d").to_string(),
                sales,
            )
        })
        .collect()
}

#[tokio::test]
async fn test_concurrent_upserts_never_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_db_pool_with_path(&dir.path().join("lottery.db"))
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();

    let mut handles = Vec::new();
    for writer in 0..4i64 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            upsert_draws(&pool, &batch(100_000_000 + writer)).await
        }));
    }

    let mut inserted = 0;
    for handle in handles {
        let outcome = handle
            .await
            .expect("task should not panic")
            .expect("upsert should wait for the lock, not fail");
        assert_eq!(outcome.total(), 50);
        inserted += outcome.inserted;
    }

    // Each code is inserted exactly once; later writers update or leave it.
    assert_eq!(inserted, 50);
    assert_eq!(count_draws(&pool).await.unwrap(), 50);

    // Batches are atomic, so every row carries the same writer's value.
    let first = query_by_code(&pool, "2024001").await.unwrap().unwrap();
    let last = query_by_code(&pool, "2024050").await.unwrap().unwrap();
    assert_eq!(first.sales, last.sales);
}
