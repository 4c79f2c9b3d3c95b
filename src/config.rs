//! Run configuration loaded from TOML
//!
//! # Example config.toml
//!
//! ```toml
//! data_csv = "data/ads.csv"
//! output_dir = "reports"
//! logs_dir = "logs"
//! schema_drift_mode = "warn"
//! confidence_min = 0.6
//! random_seed = 42
//!
//! [retry]
//! max_attempts = 3
//! initial_backoff_ms = 100
//! ```
//!
//! Every key is optional; absent keys take their defaults.

use crate::error::ConfigError;
use crate::retry::RetryPolicy;
use crate::schema::DriftMode;
use crate::scoring::DEFAULT_CONFIDENCE_MIN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Input CSV table
    pub data_csv: PathBuf,
    pub output_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub insights_file: PathBuf,
    pub creatives_file: PathBuf,
    pub report_file: PathBuf,
    pub schema_drift_mode: DriftMode,
    /// Minimum confidence for a hypothesis to be valid, in [0, 1]
    pub confidence_min: f64,
    /// Seed for the creative generator
    pub random_seed: u64,
    pub retry: RetryPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_csv: PathBuf::from("data/ads.csv"),
            output_dir: PathBuf::from("reports"),
            logs_dir: PathBuf::from("logs"),
            insights_file: PathBuf::from("reports/insights.json"),
            creatives_file: PathBuf::from("reports/creatives.json"),
            report_file: PathBuf::from("reports/report.md"),
            schema_drift_mode: DriftMode::Fail,
            confidence_min: DEFAULT_CONFIDENCE_MIN,
            random_seed: 42,
            retry: RetryPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_min) {
            return Err(ConfigError::Invalid(format!(
                "confidence_min must be in [0, 1], got {}",
                self.confidence_min
            )));
        }
        self.retry.validate().map_err(ConfigError::Invalid)
    }
}
