//! Draw-notice retrieval.
//!
//! This module provides:
//! - [`DrawSource`]: the seam the sync pipeline fetches through
//! - [`DrawNoticeClient`]: the HTTP implementation (session cookie, paging)
//! - [`DateWindow`] helpers that cut a date range into per-year requests

mod client;
mod request;
mod response;
mod window;

use std::future::Future;

use chrono::NaiveDate;

pub use client::DrawNoticeClient;
pub use window::{year_span, year_windows, DateWindow};

use serde_json::Value;

use crate::error_handling::FetchError;

/// A source of raw draw notices.
///
/// Implementations return every notice published for draws dated within
/// `start..=end`, or an error; never a partial result. Notices are returned
/// as the JSON objects the source published; they are decoded into
/// [`crate::models::DrawNotice`] by the sync pipeline, which skips and counts
/// the ones that do not fit.
pub trait DrawSource {
    /// Fetches all notices dated within `start..=end`.
    fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Value>, FetchError>> + Send;
}
