//! CLI argument parsing for adsight

use crate::config::AnalysisConfig;
use crate::schema::DriftMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adsight")]
#[command(version)]
#[command(
    about = "Schema-validated ad performance analysis with scored hypotheses",
    long_about = None
)]
pub struct Cli {
    /// Question driving the analysis (e.g., "Analyze ROAS drop")
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Input CSV, overriding `data_csv`
    #[arg(long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Schema drift handling, overriding `schema_drift_mode`
    #[arg(long = "drift-mode", value_enum)]
    pub drift_mode: Option<DriftMode>,

    /// Validity threshold in [0, 1], overriding `confidence_min`
    #[arg(long = "confidence-min", value_name = "X")]
    pub confidence_min: Option<f64>,

    /// Creative generator seed, overriding `random_seed`
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Enable debug tracing output (to stderr)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(data) = &self.data {
            config.data_csv = data.clone();
        }
        if let Some(mode) = self.drift_mode {
            config.schema_drift_mode = mode;
        }
        if let Some(min) = self.confidence_min {
            config.confidence_min = min;
        }
        if let Some(seed) = self.seed {
            config.random_seed = seed;
        }
    }
}
