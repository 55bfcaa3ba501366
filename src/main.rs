//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `lottery_sync` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use lottery_sync::app::{
    cancel_on_ctrl_c, render_code, render_history, render_import_report, render_latest,
    render_list, render_statistics, render_sync_report, render_year, shutdown_gracefully,
};
use lottery_sync::config::BULK_FETCH_PAUSE;
use lottery_sync::initialization::init_logger_with;
use lottery_sync::storage::{
    count_draws, create_table, get_statistics, query_all, query_by_code, query_by_year,
    query_latest, query_sync_history,
};
use lottery_sync::{
    backfill, connect_source, fetch_json, import_json_files, open_store, sync_latest, watch, Cli,
    Command, Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    let config = Config::from(&cli);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("lottery_sync error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();

    // Writes files only; no database needed
    if let Command::FetchJson {
        from_year,
        to_year,
        out_dir,
    } = &command
    {
        let source = connect_source(config, Duration::ZERO)?;
        let to_year = to_year.unwrap_or(today.year());
        let written = fetch_json(
            &source,
            *from_year,
            to_year,
            today,
            out_dir,
            BULK_FETCH_PAUSE,
        )
        .await?;
        for path in &written {
            println!("✅ Wrote {}", path.display());
        }
        return Ok(());
    }

    let pool = open_store(config).await?;

    match command {
        Command::Init => {
            create_table(&pool)
                .await
                .context("Failed to create draw table")?;
            println!("✅ Database ready at {}", config.db_path.display());
        }
        Command::Sync => {
            let source = connect_source(config, Duration::ZERO)?;
            let report = sync_latest(&pool, &source, today, config.bootstrap_date).await?;
            println!("{}", render_sync_report(&report));
        }
        Command::Watch { interval_secs } => {
            let source = connect_source(config, Duration::ZERO)?;
            let cancel = CancellationToken::new();
            let listener = cancel_on_ctrl_c(cancel.clone());

            let result = watch(
                &pool,
                &source,
                Duration::from_secs(interval_secs),
                config.bootstrap_date,
                || Local::now().date_naive(),
                cancel.clone(),
            )
            .await;
            shutdown_gracefully(cancel, Some(listener)).await;

            let summary = result?;
            println!(
                "✅ Watch stopped after {} run(s) ({} failed)",
                summary.runs, summary.failures
            );
        }
        Command::Backfill { from_year, to_year } => {
            let source = connect_source(config, BULK_FETCH_PAUSE)?;
            let to_year = to_year.unwrap_or(today.year());
            let report = backfill(&pool, &source, from_year, to_year, today).await?;
            println!("{}", render_sync_report(&report));
        }
        Command::FetchJson { .. } => {} // handled before opening the store
        Command::Import { files } => {
            let report = import_json_files(&pool, &files).await?;
            println!("{}", render_import_report(&report));
        }
        Command::Latest => {
            let latest = query_latest(&pool).await?;
            println!("{}", render_latest(latest.as_ref()));
        }
        Command::List { limit } => {
            let draws = query_all(&pool, Some(limit)).await?;
            let total = count_draws(&pool).await?;
            println!("{}", render_list(&draws, total));
        }
        Command::Year { year } => {
            let draws = query_by_year(&pool, year).await?;
            println!("{}", render_year(year, &draws));
        }
        Command::Code { code } => {
            let draw = query_by_code(&pool, &code).await?;
            println!("{}", render_code(&code, draw.as_ref()));
        }
        Command::Stats => {
            let stats = get_statistics(&pool).await?;
            println!("{}", render_statistics(&stats));
        }
        Command::History { limit } => {
            let runs = query_sync_history(&pool, Some(limit)).await?;
            println!("{}", render_history(&runs));
        }
    }

    pool.close().await;
    Ok(())
}
