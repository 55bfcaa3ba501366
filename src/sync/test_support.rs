//! In-memory draw source for sync tests.

use std::sync::Mutex;

use chrono::NaiveDate;
use serde_json::Value;

use crate::error_handling::FetchError;
use crate::fetch::DrawSource;
use crate::models::{DrawNotice, PrizeGrade};

/// A notice for issue `code` drawn on `date` (YYYY-MM-DD).
pub fn notice(code: &str, date: &str) -> DrawNotice {
    DrawNotice {
        name: "双色球".to_string(),
        code: code.to_string(),
        date: format!("{}(二)", date),
        week: "二".to_string(),
        red: "03,09,14,21,27,32".to_string(),
        blue: "11".to_string(),
        sales: "350,000,000".to_string(),
        poolmoney: "2000000000".to_string(),
        content: "共5注。".to_string(),
        prizegrades: vec![PrizeGrade {
            grade: 1,
            typenum: "5".to_string(),
            typemoney: "6000000".to_string(),
        }],
    }
}

/// The JSON objects a source would publish for `notices`.
pub fn raw_notices(notices: &[DrawNotice]) -> Vec<Value> {
    notices
        .iter()
        .map(|n| serde_json::to_value(n).unwrap())
        .collect()
}

/// Serves a fixed set of notices, filtered by date like the real endpoint,
/// and records every requested range.
#[derive(Default)]
pub struct FakeSource {
    pub notices: Vec<Value>,
    /// Return every notice regardless of the requested range
    pub ignore_range: bool,
    /// Fail every request
    pub fail: bool,
    pub requests: Mutex<Vec<(NaiveDate, NaiveDate)>>,
}

impl FakeSource {
    pub fn new(notices: Vec<DrawNotice>) -> Self {
        Self {
            notices: raw_notices(&notices),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.requests.lock().unwrap().clone()
    }
}

impl DrawSource for FakeSource {
    async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Value>, FetchError> {
        self.requests.lock().unwrap().push((start, end));
        if self.fail {
            return Err(FetchError::StatusError {
                status: 503,
                url: "http://fake/findDrawNotice".to_string(),
            });
        }
        Ok(self
            .notices
            .iter()
            .filter(|n| {
                if self.ignore_range {
                    return true;
                }
                n.get("date")
                    .and_then(Value::as_str)
                    .and_then(|d| d.get(..10))
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                    .is_some_and(|d| start <= d && d <= end)
            })
            .cloned()
            .collect())
    }
}
