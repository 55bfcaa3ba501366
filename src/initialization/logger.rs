//! Logger initialization.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first so per-module filters still work; `level` then
/// overrides the global and crate-level filter.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Quick debugging without CLI args
/// RUST_LOG=debug lottery_sync sync
///
/// # CLI level wins over RUST_LOG
/// RUST_LOG=debug lottery_sync sync --log-level info
///
/// # Machine-readable output for the watch loop
/// lottery_sync watch --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // sqlx logs every statement at info
    builder.filter_module("sqlx", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("lottery_sync", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red().bold(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {:>5} {} {}",
                    chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                    colored_level,
                    short_target(record.target()).cyan(),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Renders one JSON log line.
fn json_line(ts_ms: i64, level: log::Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_ms,
        "level": level.to_string(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

/// Drops the crate prefix from module targets (`lottery_sync::sync` -> `sync`).
fn short_target(target: &str) -> &str {
    target
        .strip_prefix("lottery_sync::")
        .unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(1700000000000, log::Level::Warn, "lottery_sync::sync", "say \"hi\"\n");
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
        assert_eq!(parsed["ts"], 1700000000000i64);
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["target"], "lottery_sync::sync");
        assert_eq!(parsed["msg"], "say \"hi\"\n");
    }

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("lottery_sync::storage::upsert"), "storage::upsert");
        assert_eq!(short_target("lottery_sync"), "lottery_sync");
        assert_eq!(short_target("sqlx::query"), "sqlx::query");
    }

    #[test]
    fn test_init_logger_twice_fails_gracefully() {
        // Only one logger per process; the second call must error, not panic.
        let first = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Info, LogFormat::Json);
        assert!(first.is_ok() || second.is_err());
        assert!(second.is_err());
    }
}
