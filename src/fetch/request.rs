//! Notice request building.
//!
//! The endpoint expects every search parameter to be present, including the
//! ones that are left blank, so the full parameter list is always sent.

use super::window::DateWindow;
use crate::config::SYSTEM_TYPE;

/// Query parameters for one page of the draw-notice search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NoticeQuery<'a> {
    pub lottery: &'a str,
    pub window: DateWindow,
    pub page_no: u32,
    pub page_size: u32,
}

impl NoticeQuery<'_> {
    /// Returns the parameters as (name, value) pairs in the order the web
    /// front end sends them.
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.lottery.to_string()),
            ("issueCount", String::new()),
            ("issueStart", String::new()),
            ("issueEnd", String::new()),
            ("dayStart", self.window.start.format("%Y-%m-%d").to_string()),
            ("dayEnd", self.window.end.format("%Y-%m-%d").to_string()),
            ("pageNo", self.page_no.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("week", String::new()),
            ("systemType", SYSTEM_TYPE.to_string()),
        ]
    }
}

/// Applies the headers the notice endpoint expects from its own front end.
pub(crate) fn apply_notice_headers(
    builder: reqwest::RequestBuilder,
    referer: &str,
) -> reqwest::RequestBuilder {
    builder
        .header(
            reqwest::header::ACCEPT,
            "application/json, text/javascript, */*; q=0.01",
        )
        .header(reqwest::header::REFERER, referer)
        .header(
            reqwest::header::HeaderName::from_static("x-requested-with"),
            "XMLHttpRequest",
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_params_carry_window_and_paging() {
        let query = NoticeQuery {
            lottery: "ssq",
            window: DateWindow {
                start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            },
            page_no: 2,
            page_size: 200,
        };
        let params = query.params();
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(params.len(), 10);
        assert_eq!(get("name"), Some("ssq"));
        assert_eq!(get("dayStart"), Some("2025-01-01"));
        assert_eq!(get("dayEnd"), Some("2025-12-31"));
        assert_eq!(get("pageNo"), Some("2"));
        assert_eq!(get("pageSize"), Some("200"));
        assert_eq!(get("issueCount"), Some(""));
        assert_eq!(get("systemType"), Some("PC"));
    }
}
