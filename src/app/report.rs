//! Console rendering for the CLI subcommands.
//!
//! Everything here returns a `String` so `main` only has to print it.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::models::{format_thousands, LotteryDraw};
use crate::storage::{DrawStatistics, SyncRunSummary};
use crate::sync::{ImportReport, SyncReport};

/// One-line summary of a draw.
fn draw_line(draw: &LotteryDraw) -> String {
    format!(
        "{}  {} ({})  red {}  blue {}  sales {}",
        draw.code,
        draw.date,
        draw.week,
        draw.red,
        draw.blue,
        format_thousands(draw.sales)
    )
}

/// Full details of one draw, including prize grades.
pub fn render_draw(draw: &LotteryDraw) -> String {
    format!("{}\n{}", draw, draw.prize_grades_report())
}

/// The most recent draw.
pub fn render_latest(latest: Option<&LotteryDraw>) -> String {
    match latest {
        Some(draw) => render_draw(draw),
        None => "No draws stored yet. Run `sync` first.".to_string(),
    }
}

/// The first rows of all draws (most recent first) out of `total`.
pub fn render_list(draws: &[LotteryDraw], total: i64) -> String {
    let mut out = format!("{} draw(s) stored", total);
    for draw in draws {
        out.push('\n');
        out.push_str(&draw_line(draw));
    }
    let shown = i64::try_from(draws.len()).unwrap_or(i64::MAX);
    if total > shown {
        let _ = write!(out, "\n... {} more", total - shown);
    }
    out
}

/// The draws of one year, oldest first.
pub fn render_year(year: i32, draws: &[LotteryDraw]) -> String {
    if draws.is_empty() {
        return format!("No draws stored for {}", year);
    }
    let mut out = format!("{} draw(s) in {}", draws.len(), year);
    for draw in draws {
        out.push('\n');
        out.push_str(&draw_line(draw));
    }
    out
}

/// One draw looked up by issue code.
pub fn render_code(code: &str, draw: Option<&LotteryDraw>) -> String {
    match draw {
        Some(draw) => render_draw(draw),
        None => format!("No draw with issue code {}", code.trim()),
    }
}

/// Aggregate counts with per-year breakdown.
pub fn render_statistics(stats: &DrawStatistics) -> String {
    let mut out = format!(
        "Total draws: {}\nTotal sales: {}",
        stats.total_draws,
        format_thousands(stats.total_sales)
    );
    if !stats.per_year.is_empty() {
        out.push_str("\nDraws per year:");
        for yc in &stats.per_year {
            let _ = write!(out, "\n  {}: {}", yc.year, yc.draws);
        }
    }
    out
}

fn format_ms(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ms.to_string())
}

/// Recent sync runs, newest first.
pub fn render_history(runs: &[SyncRunSummary]) -> String {
    if runs.is_empty() {
        return "No sync runs recorded yet.".to_string();
    }
    let mut out = String::new();
    for (i, run) in runs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let window = match (&run.window_start, &run.window_end) {
            (Some(start), Some(end)) => format!("{}..={}", start, end),
            _ => "-".to_string(),
        };
        let status = match (&run.error, run.end_time_ms) {
            (Some(err), _) => format!("failed: {}", err),
            (None, Some(_)) => format!(
                "{} fetched, {} inserted, {} updated, {} unchanged, {} skipped",
                run.fetched, run.inserted, run.updated, run.unchanged, run.skipped
            ),
            (None, None) => "unfinished".to_string(),
        };
        let _ = write!(
            out,
            "{}  {:<8} {}  {}  {}",
            format_ms(run.start_time_ms),
            run.mode,
            window,
            status,
            run.run_id
        );
    }
    out
}

/// Summary line printed after a sync or backfill.
pub fn render_sync_report(report: &SyncReport) -> String {
    if report.is_up_to_date() {
        return "✅ Already up to date".to_string();
    }
    let window = report
        .window
        .map(|w| format!(" for {}", w))
        .unwrap_or_default();
    format!(
        "✅ {}{}: {} fetched, {} inserted, {} updated, {} unchanged, {} skipped in {:.1}s",
        report.mode,
        window,
        report.fetched,
        report.outcome.inserted,
        report.outcome.updated,
        report.outcome.unchanged,
        report.skipped_total(),
        report.elapsed_seconds
    )
}

/// Summary printed after an import, listing skipped files.
pub fn render_import_report(report: &ImportReport) -> String {
    let mut out = render_sync_report(&report.sync);
    let _ = write!(out, "\n{} file(s) imported", report.loaded.len());
    for path in &report.missing {
        let _ = write!(out, "\n⚠️  missing: {}", path.display());
    }
    for path in &report.invalid {
        let _ = write!(out, "\n⚠️  unreadable: {}", path.display());
    }
    out
}
