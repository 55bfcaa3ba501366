//! Error type definitions.
//!
//! This module defines the error types for each layer (initialization, HTTP
//! fetching, normalization, storage) and the reasons a fetched notice can be
//! skipped during a sync.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be mapped back to a draw.
    #[error("Corrupt row for issue {code}: {reason}")]
    CorruptRow {
        /// Issue code of the offending row
        code: String,
        /// What failed to decode
        reason: String,
    },
}

/// Error types for talking to the draw-notice data source.
///
/// Any of these aborts the whole fetch: a partial result is never returned,
/// so a sync either sees every page of its window or nothing.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The configured base URL could not be parsed or joined.
    #[error("Invalid data source URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] ReqwestError),

    /// The server answered with a non-200 status.
    #[error("Unexpected HTTP status {status} from {url}")]
    StatusError {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The body was not the expected JSON document.
    #[error("Failed to decode response from {url}: {source}")]
    DecodeError {
        /// Requested URL
        url: String,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// The API reported a failure in its envelope.
    #[error("Data source returned state {state}: {message}")]
    ApiError {
        /// Non-zero `state` field
        state: i64,
        /// `message` field
        message: String,
    },

    /// Paging did not terminate within the page budget.
    #[error("Gave up after {pages} pages for {start}..={end}")]
    PageLimitExceeded {
        /// Window start (YYYY-MM-DD)
        start: String,
        /// Window end (YYYY-MM-DD)
        end: String,
        /// Pages fetched before giving up
        pages: u32,
    },

    /// The source reported more notices than its pages delivered.
    #[error("Expected {expected} notices for {start}..={end} but received {received}")]
    IncompleteWindow {
        /// Window start (YYYY-MM-DD)
        start: String,
        /// Window end (YYYY-MM-DD)
        end: String,
        /// `total` reported by the source
        expected: i64,
        /// Notices actually received
        received: usize,
    },
}

/// Error types for turning a raw notice into a stored draw.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The notice has no issue code.
    #[error("Notice has no issue code")]
    MissingCode,

    /// The draw date is not `YYYY-MM-DD...`.
    #[error("Issue {code}: invalid draw date {value:?}")]
    InvalidDate {
        /// Issue code
        code: String,
        /// Raw date field
        value: String,
    },

    /// A money field is not an integer.
    #[error("Issue {code}: invalid {field} amount {value:?}")]
    InvalidAmount {
        /// Issue code
        code: String,
        /// Field name (`sales` or `poolmoney`)
        field: &'static str,
        /// Raw field value
        value: String,
    },
}

/// Reasons a fetched notice is not written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum SkipReason {
    /// The notice is not a JSON object of the expected shape
    MalformedNotice,
    /// The notice has no issue code
    MissingCode,
    /// The draw date could not be parsed
    InvalidDate,
    /// A money field is not an integer
    InvalidAmount,
    /// Draw date falls outside the requested window
    OutsideWindow,
    /// Same issue code appeared earlier in the batch; the later copy wins
    DuplicateCode,
}

impl SkipReason {
    /// Human-readable label used in run summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::MalformedNotice => "Malformed notice",
            SkipReason::MissingCode => "Missing issue code",
            SkipReason::InvalidDate => "Invalid draw date",
            SkipReason::InvalidAmount => "Invalid amount",
            SkipReason::OutsideWindow => "Outside requested window",
            SkipReason::DuplicateCode => "Duplicate issue code",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&NormalizeError> for SkipReason {
    fn from(err: &NormalizeError) -> Self {
        match err {
            NormalizeError::MissingCode => SkipReason::MissingCode,
            NormalizeError::InvalidDate { .. } => SkipReason::InvalidDate,
            NormalizeError::InvalidAmount { .. } => SkipReason::InvalidAmount,
        }
    }
}
