//! Response envelope of the notice endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{lenient_i64, lenient_string, lenient_vec};

/// One page of search results.
///
/// Only the fields used for paging and error detection are kept; the rest of
/// the envelope is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoticePage {
    /// 0 on success
    #[serde(default, deserialize_with = "lenient_i64")]
    pub state: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    /// Total matching notices across all pages
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total: i64,
    /// Total number of pages
    #[serde(default, deserialize_with = "lenient_i64")]
    pub page_num: i64,
    /// Raw notices, decoded one by one later so a single bad notice only
    /// skips itself
    #[serde(default, deserialize_with = "lenient_vec")]
    pub result: Vec<Value>,
}
