//! Ticket-Watch main entry point
//!
//! This is the command-line interface for the Ticket-Watch availability watcher.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use ticket_watch::config::{load_config_with_hash, Config};
use ticket_watch::notify::render_table;
use ticket_watch::pipeline::run_once;
use ticket_watch::storage::{open_store, SnapshotStore};
use tracing_subscriber::EnvFilter;

/// Ticket-Watch: a ticket availability watcher
///
/// Each invocation fetches every match page in the configured range,
/// compares the seat categories on sale with the last stored snapshot and
/// sends a Telegram message for every match with newly available categories.
#[derive(Parser, Debug)]
#[command(name = "ticket-watch")]
#[command(version)]
#[command(about = "A ticket availability watcher", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show which pages would be fetched
    #[arg(long, conflicts_with = "show_snapshot")]
    dry_run: bool,

    /// Print the latest stored snapshot and exit
    #[arg(long, conflicts_with = "dry_run")]
    show_snapshot: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.show_snapshot {
        handle_show_snapshot(&config)?;
    } else {
        handle_run(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ticket_watch=info,warn"),
            1 => EnvFilter::new("ticket_watch=debug,info"),
            2 => EnvFilter::new("ticket_watch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and lists the slot URLs
fn handle_dry_run(config: &Config) {
    let slots = config.fetcher.slots();

    println!("=== Ticket-Watch Dry Run ===\n");

    println!("Fetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!(
        "  Attempts: {} (backoff factor {}ms)",
        config.fetcher.max_attempts, config.fetcher.backoff_factor_ms
    );
    println!("  Concurrent requests: {}", config.fetcher.max_concurrent_requests);

    println!("\nStore:");
    println!("  Database: {}", config.store.database_path);

    println!("\nNotifier:");
    println!("  API: {}", config.notifier.api_base_url);
    println!("  Target: {:?}", config.notifier.target);

    println!("\nRun:");
    println!("  Update state: {}", config.run.update_state);
    println!(
        "  Staleness threshold: {}s",
        config.run.staleness_threshold_secs
    );

    println!("\nSlots ({}):", slots.slot_count);
    for index in 0..slots.slot_count {
        println!("  {:>3}. {}", index + 1, slots.url_for_slot(index));
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --show-snapshot mode: prints the latest stored snapshot
fn handle_show_snapshot(config: &Config) -> anyhow::Result<()> {
    let store = open_store(&config.store)
        .with_context(|| format!("Failed to open {}", config.store.database_path))?;
    let snapshot = store.latest()?;

    if snapshot.is_empty() {
        println!("No snapshot stored in {}", config.store.database_path);
        return Ok(());
    }

    println!(
        "Snapshot taken at {} ({} matches, {} on sale)\n",
        snapshot.timestamp.to_rfc3339(),
        snapshot.batch.len(),
        snapshot.batch.available_count()
    );

    let slots = config.fetcher.slots();
    for record in &snapshot.batch {
        println!("{}\n", render_table(record, &slots));
    }

    Ok(())
}

/// Handles the main watch run
async fn handle_run(config: &Config) -> anyhow::Result<()> {
    match run_once(config).await {
        Ok(report) => {
            tracing::info!(
                "Run finished: {} fetched, {} notified{}",
                report.fetched,
                report.changed.len(),
                if report.stale_warning {
                    ", previous snapshot was stale"
                } else {
                    ""
                }
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
