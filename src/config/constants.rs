//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including the data source endpoints, paging limits, and timing defaults.

use std::time::Duration;

/// Default base URL of the draw-notice data source.
pub const DEFAULT_BASE_URL: &str = "https://www.cwl.gov.cn";

/// Home page path, visited once per session so the server sets its cookie.
pub const HOME_PATH: &str = "/";

/// Draw-notice search endpoint, relative to the base URL.
pub const DRAW_NOTICE_PATH: &str = "/cwl_admin/front/cwlkj/search/kjxx/findDrawNotice";

/// Lottery identifier for the double-color-ball game.
pub const DEFAULT_LOTTERY_NAME: &str = "ssq";

/// Client type reported to the notice endpoint.
pub const SYSTEM_TYPE: &str = "PC";

/// Number of notices requested per page.
/// A full year of draws (~155) fits into one page at this size.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Upper bound on pages fetched for a single date window.
/// Guards against a server that keeps answering with full pages.
pub const MAX_PAGES_PER_WINDOW: u32 = 50;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Default User-Agent string for HTTP requests.
///
/// The notice endpoint rejects requests that do not look like a desktop
/// browser, so a Chrome-like string is sent. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// SQLite database path used when none is configured.
pub const DB_PATH: &str = "./lottery.db";

/// First date fetched when the store is empty.
/// 2013 is the earliest year the bulk history covers.
pub const DEFAULT_BOOTSTRAP_DATE: &str = "2013-01-01";

/// Number of rows shown by the `list` report before truncating.
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Interval between incremental syncs in watch mode.
pub const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// Shortest interval `watch` accepts; shorter ones are raised to this.
pub const MIN_WATCH_INTERVAL: Duration = Duration::from_secs(1);

/// SQLite busy timeout, so concurrent writers wait instead of failing fast.
pub const DB_BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between yearly requests when fetching history in bulk.
pub const BULK_FETCH_PAUSE: Duration = Duration::from_secs(2);
