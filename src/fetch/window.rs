//! Date windows for paging through the notice endpoint.
//!
//! The endpoint is queried one calendar year at a time, so an arbitrary range
//! is cut at year boundaries before paging.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// An inclusive range of draw dates sent as `dayStart`/`dayEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    /// First date, inclusive
    pub start: NaiveDate,
    /// Last date, inclusive
    pub end: NaiveDate,
}

impl DateWindow {
    /// Returns `true` if `date` lies within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Splits `[start, end]` into per-year windows.
///
/// Returns an empty list when `start > end`.
pub fn year_windows(start: NaiveDate, end: NaiveDate) -> Vec<DateWindow> {
    let mut windows = Vec::new();
    if start > end {
        return windows;
    }

    let mut cursor = start;
    loop {
        let year_end = NaiveDate::from_ymd_opt(cursor.year(), 12, 31).unwrap_or(end);
        let window_end = year_end.min(end);
        windows.push(DateWindow {
            start: cursor,
            end: window_end,
        });
        match window_end.succ_opt() {
            Some(next) if next <= end => cursor = next,
            _ => break,
        }
    }
    windows
}

/// The full-year range `from_year-01-01 ..= to_year-12-31`.
///
/// Returns `None` if the years are out of order or out of range.
pub fn year_span(from_year: i32, to_year: i32) -> Option<DateWindow> {
    if from_year > to_year {
        return None;
    }
    Some(DateWindow {
        start: NaiveDate::from_ymd_opt(from_year, 1, 1)?,
        end: NaiveDate::from_ymd_opt(to_year, 12, 31)?,
    })
}
