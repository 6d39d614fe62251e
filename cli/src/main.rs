mod chart;
mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tennis_stats_core::{
    load_matches, parse_match_date, JsonSummaryWriter, Metric, ReportConfig, ReportRequest,
    ReportService, DEFAULT_OUTPUT_DIR,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::chart::PngChartRenderer;
use crate::report::{print_report, OutputFormat};

#[derive(Parser)]
#[command(name = "tennis-stats")]
#[command(version, about = "Season and match reports from tennis match statistics", long_about = None)]
struct Cli {
    /// Directory that receives summary.json and chart images
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Console output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Compute the season summary and write <output-dir>/summary.json
    Summary {
        /// Path to the match statistics CSV
        csv: PathBuf,
    },
    /// Show computed metrics for the match played on a date
    Match {
        /// Path to the match statistics CSV
        csv: PathBuf,
        /// Match date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// Plot a metric over time to <output-dir>/<metric>.png
    Plot {
        /// Path to the match statistics CSV
        csv: PathBuf,
        /// Metric name (first_serve_pct, first_serve_pts_won_pct, second_serve_pts_won_pct, break_points_saved_pct)
        #[arg(long)]
        metric: String,
    },
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Arguments are validated before the CSV is read.
    let (csv, request) = match cli.command {
        Commands::Summary { csv } => (csv, ReportRequest::Summary),
        Commands::Match { csv, date } => {
            let date = parse_match_date(&date)?;
            (csv, ReportRequest::Match { date })
        }
        Commands::Plot { csv, metric } => {
            let metric: Metric = metric.parse()?;
            (csv, ReportRequest::Plot { metric })
        }
    };

    let records = load_matches(&csv)
        .with_context(|| format!("Failed to load matches from {}", csv.display()))?;
    debug!(count = records.len(), input = %csv.display(), "loaded input");

    let service = ReportService::new(
        ReportConfig::new(cli.output_dir),
        JsonSummaryWriter,
        PngChartRenderer::default(),
    );
    let report = service.run(&records, request)?;
    print_report(&report, cli.format)?;

    Ok(())
}
