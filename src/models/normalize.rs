//! Notice-to-row normalization.

use chrono::NaiveDate;

use super::draw::LotteryDraw;
use super::notice::DrawNotice;
use crate::error_handling::NormalizeError;

/// Length of the `YYYY-MM-DD` prefix of a notice date.
const DATE_PREFIX_LEN: usize = 10;

/// Converts a raw notice into a storable draw.
///
/// - `code` is trimmed and must be non-empty
/// - `date` keeps only its `YYYY-MM-DD` prefix (the endpoint appends the weekday)
/// - `sales` and `poolmoney` drop thousands separators; empty means 0
/// - text fields are trimmed, prize grades are carried over as published
pub fn normalize_notice(notice: &DrawNotice) -> Result<LotteryDraw, NormalizeError> {
    let code = notice.code.trim();
    if code.is_empty() {
        return Err(NormalizeError::MissingCode);
    }

    Ok(LotteryDraw {
        code: code.to_string(),
        week: notice.week.trim().to_string(),
        red: notice.red.trim().to_string(),
        blue: notice.blue.trim().to_string(),
        sales: parse_amount(code, "sales", &notice.sales)?,
        poolmoney: parse_amount(code, "poolmoney", &notice.poolmoney)?,
        content: notice.content.trim().to_string(),
        prizegrades: notice.prizegrades.clone(),
        date: parse_draw_date(code, &notice.date)?,
    })
}

/// Parses the leading `YYYY-MM-DD` of a notice date such as `2025-09-25(四)`.
pub fn parse_draw_date(code: &str, raw: &str) -> Result<NaiveDate, NormalizeError> {
    let invalid = || NormalizeError::InvalidDate {
        code: code.to_string(),
        value: raw.to_string(),
    };
    let trimmed = raw.trim();
    let prefix = trimmed.get(..DATE_PREFIX_LEN).ok_or_else(invalid)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| invalid())
}

fn parse_amount(code: &str, field: &'static str, raw: &str) -> Result<i64, NormalizeError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(0);
    }
    cleaned.parse().map_err(|_| NormalizeError::InvalidAmount {
        code: code.to_string(),
        field,
        value: raw.to_string(),
    })
}
