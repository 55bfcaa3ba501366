// Shared test helpers for database setup and mock draw-notice responses.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::Path;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use lottery_sync::{open_store, Config};

/// Config pointing at the mock server and an on-disk database under `dir`.
#[allow(dead_code)] // Used by other test files
pub fn test_config(server: &Server, dir: &Path) -> Config {
    Config {
        db_path: dir.join("lottery.db"),
        base_url: server.url_str("/"),
        timeout_seconds: 5,
        ..Default::default()
    }
}

/// Expects exactly one visit to the home page, which sets the session cookie.
#[allow(dead_code)]
pub fn expect_home(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200).insert_header("Set-Cookie", "HMF_CI=session123; Path=/"),
        ),
    );
}

/// Opens the database described by `config` with migrations applied.
#[allow(dead_code)]
pub async fn create_test_pool(config: &Config) -> SqlitePool {
    open_store(config)
        .await
        .expect("Failed to create test database")
}

/// A notice as the endpoint publishes it, with amounts as strings.
#[allow(dead_code)]
pub fn notice_json(code: &str, date: &str) -> Value {
    json!({
        "name": "双色球",
        "code": code,
        "date": format!("{}(四)", date),
        "week": "四",
        "red": "02,07,15,20,27,31",
        "blue": "09",
        "sales": "372456812",
        "poolmoney": "2350915741",
        "content": "共3注。",
        "prizegrades": [
            {"type": 1, "typenum": "3", "typemoney": "6521389"},
            {"type": 2, "typenum": "141", "typemoney": "172304"}
        ]
    })
}

/// A successful page of the notice search.
#[allow(dead_code)]
pub fn page_json(notices: Vec<Value>, total: usize, page_num: usize) -> Value {
    json!({
        "state": 0,
        "message": "查询成功",
        "total": total,
        "pageNum": page_num,
        "pageNo": 1,
        "pageSize": 30,
        "result": notices
    })
}
