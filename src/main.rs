use adsight::{cli::Cli, config::AnalysisConfig, pipeline};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises the level to TRACE
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("Invalid command-line override")?;

    let output = pipeline::run_analysis(&args.query, &config)?;
    let paths = pipeline::write_artifacts(&output, &config, chrono::Utc::now())?;

    println!("[✓] Insights saved: {}", paths.insights.display());
    println!("[✓] Creative ideas saved: {}", paths.creatives.display());
    println!("[✓] Report saved: {}", paths.report.display());
    println!("[✓] Log saved: {}", paths.log.display());
    Ok(())
}
