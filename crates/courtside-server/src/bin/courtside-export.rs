// Export tool: load and normalize the player index, print a summary and a
// preview, and write the processed table back out as CSV.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use courtside_core::config;
use courtside_core::dataset::loader;
use courtside_core::report::{self, DatasetSummary, DEFAULT_EXPORT_FILE, HEAD_ROWS};
use courtside_server::logging::init_tracing;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "courtside-export", about = "Normalize and re-export the NBA player index")]
struct Cli {
    /// Read this CSV instead of searching the data directories.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the processed CSV.
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,

    /// Rows shown in the preview.
    #[arg(long, default_value_t = HEAD_ROWS)]
    preview: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load_config().context("failed to load configuration")?;
    init_tracing(config.logging.filter.as_deref())?;

    println!("Loading NBA player statistics...");
    let dataset = match &cli.input {
        Some(path) => loader::load_path(path),
        None => loader::load_from_dirs(&config.data, &loader::candidate_dirs(&config.data)),
    }
    .context("failed to load player data")?;

    for err in &dataset.conversion_errors {
        warn!("{err}");
    }

    let summary = DatasetSummary::from_table(&dataset.table);
    println!("\nDataset Statistics:");
    println!("{summary}");

    println!("\nFirst few entries:");
    println!("{}", report::head_preview(&dataset.frame, cli.preview));

    println!("\nSaving processed data...");
    report::write_frame(&dataset.frame, &cli.output)
        .with_context(|| format!("failed to export to {}", cli.output.display()))?;
    println!("Wrote {}", cli.output.display());

    Ok(())
}
