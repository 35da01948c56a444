//! modal-split — replay a recorded events file through the trip analyzer.
//!
//! Reconstructs every agent's trips from the final iteration's events and
//! writes the modal-share and modal-distance-share reports for the agents
//! living inside the configured study region, plus per-link leave counts
//! for the region's road links.
//!
//! ```text
//! RUST_LOG=info modal-split --config analysis.toml
//! RUST_LOG=debug modal-split --config analysis.toml --events run2/output_events.csv.gz
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use ms_analyzer::{run_analysis, AnalysisConfig, OutputDirectory};
use ms_core::TransportMode;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// TOML analysis configuration.
    #[arg(short, long)]
    config: PathBuf,

    /// Events file to replay instead of the configured one.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Output root to write into instead of the configured one.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    // 1. Configuration, with command-line overrides.
    let mut config = AnalysisConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(events) = args.events {
        config.events = events;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    log::debug!("{config:?}");

    // 2. Run.
    let t0 = Instant::now();
    let report = run_analysis(&config).context("modal-split analysis failed")?;
    let elapsed = t0.elapsed();

    // 3. Summary.
    let aggregate = &report.trips.aggregate;
    println!(
        "Iteration {}: {} eligible trips by {} agents ({:.2?})",
        report.iteration(),
        aggregate.eligible_trips(),
        aggregate.participants(),
        elapsed,
    );
    for mode in TransportMode::REPORTED {
        println!("  {:<5} {:>8}", mode, aggregate.mode_count(&mode));
    }
    let links = &report.links.counts;
    println!("Link leaves: {} on {} links", links.total(), links.link_count());
    let out = OutputDirectory::new(&config.output_dir);
    println!("Reports in {}", out.iteration_dir(report.iteration()).display());

    let failures = report.failures().count();
    if failures > 0 {
        for e in report.failures() {
            log::error!("{e}");
        }
        anyhow::bail!("{failures} report(s) could not be written");
    }
    Ok(())
}
