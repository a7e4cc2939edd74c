//! WAIO Insight main entry point
//!
//! This is the command-line interface for the crawler traffic analyzer.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use waio_insight::config::Config;
use waio_insight::output::{compute_statistics, print_statistics};
use waio_insight::Session;

/// WAIO Insight: crawler traffic analytics
///
/// Reads per-visit crawler records, compares the response times of two
/// crawlers with a two-sample t-test and Cohen's d, and produces a daily
/// text report.
#[derive(Parser, Debug)]
#[command(name = "waio-insight")]
#[command(version = "1.0.0")]
#[command(about = "Crawler traffic analytics and daily reports", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Read visits from this file instead of the configured visits-path
    #[arg(long, value_name = "PATH")]
    visits: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be analyzed without reading visits
    #[arg(long, conflicts_with_all = ["stats", "summary"])]
    dry_run: bool,

    /// Show per-crawler traffic statistics and exit
    #[arg(long, conflicts_with_all = ["dry_run", "summary"])]
    stats: bool,

    /// Print the JSON performance summary instead of the text report
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let session = match Session::open(&cli.config, cli.visits.clone()) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context(format!("loading {}", cli.config.display()));
        }
    };

    if cli.dry_run {
        handle_dry_run(&session.config, &session.visits_path);
        return Ok(());
    }

    let visits = session
        .load_visits()
        .with_context(|| format!("reading visits from {}", session.visits_path.display()))?;

    if cli.stats {
        print_statistics(&compute_statistics(&visits));
    } else if cli.summary {
        let run = session.run_summary(&visits)?;
        println!("{}", run.json);
    } else {
        let run = session.run_report(&visits, chrono::Local::now().date_naive())?;
        print!("{}", run.text);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("waio_insight=info,warn"),
            1 => EnvFilter::new("waio_insight=debug,info"),
            2 => EnvFilter::new("waio_insight=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be analyzed
fn handle_dry_run(config: &Config, visits_path: &Path) {
    println!("=== WAIO Insight Dry Run ===\n");

    println!("Input:");
    println!("  Visits: {}", visits_path.display());

    println!("\nComparison:");
    println!("  Group A: {}", config.comparison.group_a);
    println!("  Group B: {}", config.comparison.group_b);

    println!("\nReport:");
    println!("  Title: {}", config.report.title);
    println!(
        "  Low traffic threshold: {} visits",
        config.report.low_traffic_threshold
    );

    println!("\nOutput:");
    println!(
        "  Report: {}",
        config.output.report_path.as_deref().unwrap_or("(stdout only)")
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("(stdout only)")
    );

    println!("\n✓ Configuration is valid");
}
