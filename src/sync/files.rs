//! Yearly JSON dumps of raw notices.
//!
//! `fetch_json` writes one pretty-printed `<year>.json` array per year and
//! `import_json_files` loads such arrays back through the normal pipeline.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use serde_json::Value;
use sqlx::SqlitePool;

use super::run::{RunContext, SyncMode, SyncReport};
use crate::fetch::{year_span, DrawSource};

/// Results of an import.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Files whose notices were imported
    pub loaded: Vec<PathBuf>,
    /// Files that did not exist
    pub missing: Vec<PathBuf>,
    /// Files that could not be read or parsed
    pub invalid: Vec<PathBuf>,
    /// Counts for the combined upsert
    pub sync: SyncReport,
}

/// Fetches each year of `from_year..=to_year` and writes its raw notices to
/// `out_dir/<year>.json`.
///
/// The current year is cut off at `today`. `pause` is slept between years.
/// Returns the written paths; any fetch or write error aborts the remaining
/// years.
pub async fn fetch_json<S: DrawSource>(
    source: &S,
    from_year: i32,
    to_year: i32,
    today: NaiveDate,
    out_dir: &Path,
    pause: Duration,
) -> Result<Vec<PathBuf>> {
    let span = year_span(from_year, to_year)
        .ok_or_else(|| anyhow!("Invalid year range {}..={}", from_year, to_year))?;
    if span.start > today {
        return Err(anyhow!(
            "Year {} is in the future (today is {})",
            from_year,
            today
        ));
    }

    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut written = Vec::new();
    for year in from_year..=to_year {
        let Some(window) = year_span(year, year) else {
            continue;
        };
        if window.start > today {
            break;
        }
        if !written.is_empty() && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        let notices = source
            .fetch_range(window.start, window.end.min(today))
            .await
            .with_context(|| format!("Failed to fetch draws for {}", year))?;

        let path = out_dir.join(format!("{}.json", year));
        let body = serde_json::to_vec_pretty(&notices).context("Failed to serialize notices")?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Wrote {} notice(s) to {}", notices.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

/// Loads notice arrays from `paths` and upserts them as one run.
///
/// Missing files and files that are not a JSON array are skipped with a
/// warning. Within an array, notices that do not decode are skipped and
/// counted like any other bad notice.
pub async fn import_json_files(pool: &SqlitePool, paths: &[PathBuf]) -> Result<ImportReport> {
    let mut notices: Vec<Value> = Vec::new();
    let mut loaded = Vec::new();
    let mut missing = Vec::new();
    let mut invalid = Vec::new();

    for path in paths {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("File not found, skipping: {}", path.display());
                missing.push(path.clone());
                continue;
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                invalid.push(path.clone());
                continue;
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(batch) => {
                info!("Loaded {} notice(s) from {}", batch.len(), path.display());
                notices.extend(batch);
                loaded.push(path.clone());
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                invalid.push(path.clone());
            }
        }
    }

    let run = RunContext::begin(pool, SyncMode::Import, None).await?;
    let sync = run.store(pool, &notices).await?;

    Ok(ImportReport {
        loaded,
        missing,
        invalid,
        sync,
    })
}
