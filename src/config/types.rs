//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_BASE_URL, DEFAULT_BOOTSTRAP_DATE, DEFAULT_LIST_LIMIT, DEFAULT_LOTTERY_NAME,
    DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WATCH_INTERVAL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through the command line.
///
/// # Examples
///
/// ```no_run
/// use lottery_sync::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("./draws.db"),
///     page_size: 100,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Base URL of the draw-notice data source
    pub base_url: String,

    /// Lottery identifier sent as the `name` query parameter
    pub lottery: String,

    /// Notices requested per page
    pub page_size: u32,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// First date to fetch when the store holds no draws yet
    pub bootstrap_date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            base_url: DEFAULT_BASE_URL.to_string(),
            lottery: DEFAULT_LOTTERY_NAME.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bootstrap_date: default_bootstrap_date(),
        }
    }
}

fn default_bootstrap_date() -> NaiveDate {
    DEFAULT_BOOTSTRAP_DATE
        .parse()
        .unwrap_or(NaiveDate::MIN)
}

/// Command-line options.
///
/// Global options can be given before or after the subcommand and each one
/// can also be supplied through the environment (or a `.env` file).
///
/// # Examples
///
/// ```bash
/// # Create the schema, then catch up from the latest stored draw
/// lottery_sync init
/// lottery_sync sync
///
/// # Re-sync two years of history into a custom database
/// lottery_sync --db-path ./draws.db backfill --from-year 2023 --to-year 2024
///
/// # Keep syncing every hour
/// lottery_sync watch --interval-secs 3600
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "lottery_sync",
    about = "Syncs double-color-ball draw results into a SQLite database and reports on them."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "LOTTERY_LOG_LEVEL", global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, env = "LOTTERY_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    #[arg(long, default_value = DB_PATH, env = "LOTTERY_DB_PATH", global = true)]
    pub db_path: PathBuf,

    /// Base URL of the draw-notice data source
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "LOTTERY_BASE_URL", global = true)]
    pub base_url: String,

    /// Lottery identifier sent to the data source
    #[arg(long, default_value = DEFAULT_LOTTERY_NAME, env = "LOTTERY_NAME", global = true)]
    pub lottery: String,

    /// Notices requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "LOTTERY_PAGE_SIZE", global = true)]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "LOTTERY_TIMEOUT_SECONDS", global = true)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, env = "LOTTERY_USER_AGENT", global = true)]
    pub user_agent: String,

    /// First date (YYYY-MM-DD) fetched when the database holds no draws yet
    #[arg(long, default_value = DEFAULT_BOOTSTRAP_DATE, env = "LOTTERY_BOOTSTRAP_DATE", global = true)]
    pub bootstrap_date: NaiveDate,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the draw table and indexes (safe to repeat)
    Init,

    /// Fetch draws newer than the latest stored one and upsert them
    Sync,

    /// Run `sync` periodically until interrupted
    Watch {
        /// Seconds between syncs
        #[arg(long, default_value_t = DEFAULT_WATCH_INTERVAL.as_secs())]
        interval_secs: u64,
    },

    /// Re-fetch whole years and upsert them
    Backfill {
        /// First year to fetch
        #[arg(long)]
        from_year: i32,
        /// Last year to fetch (defaults to the current year)
        #[arg(long)]
        to_year: Option<i32>,
    },

    /// Fetch whole years and write them to `<year>.json` files
    FetchJson {
        /// First year to fetch
        #[arg(long)]
        from_year: i32,
        /// Last year to fetch (defaults to the current year)
        #[arg(long)]
        to_year: Option<i32>,
        /// Directory the JSON files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Upsert draws from JSON files written by `fetch-json`
    Import {
        /// JSON files to import
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the most recent draw
    Latest,

    /// List draws, most recent first
    List {
        /// Number of draws to show
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,
    },

    /// List the draws of one year
    Year {
        /// Year, e.g. 2025
        year: i32,
    },

    /// Show one draw by its issue code
    Code {
        /// Issue code, e.g. 2025110
        code: String,
    },

    /// Show aggregate counts
    Stats,

    /// Show recent sync runs
    History {
        /// Number of runs to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            log_level: cli.log_level.clone(),
            log_format: cli.log_format.clone(),
            db_path: cli.db_path.clone(),
            base_url: cli.base_url.clone(),
            lottery: cli.lottery.clone(),
            page_size: cli.page_size,
            timeout_seconds: cli.timeout_seconds,
            user_agent: cli.user_agent.clone(),
            bootstrap_date: cli.bootstrap_date,
        }
    }
}
