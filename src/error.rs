//! Error taxonomy for ingestion and configuration
//!
//! Every failure a run can hit before hypothesis generation is a variant of a
//! closed enum, so callers branch on kind instead of inspecting messages.

use crate::schema::DriftReport;
use thiserror::Error;

/// Errors raised while loading a source table
#[derive(Error, Debug)]
pub enum IngestError {
    /// Source unreadable or corrupt. The only retryable kind.
    #[error("Failed to read source {source_name}: {message}")]
    Io {
        source_name: String,
        message: String,
    },

    /// Required columns missing, or near-miss column names, under `fail` mode
    #[error(
        "Schema drift detected: missing={:?} near_miss={:?} severity={:.3}",
        .report.missing,
        .report.near_miss,
        .report.severity
    )]
    SchemaDrift { report: DriftReport },

    /// A column has more than half of its values null
    #[error("Column '{column}' is {:.1}% null (limit 50%)", .fraction * 100.0)]
    SevereNull { column: String, fraction: f64 },

    /// Every value of the timestamp column failed to parse
    #[error("Column '{column}' could not be parsed as dates (100% invalid)")]
    DateParse { column: String },
}

impl IngestError {
    /// Whether a retry of the underlying read could succeed
    ///
    /// Validation failures are deterministic for a given source.
    pub fn is_retryable(&self) -> bool {
        matches!(self, IngestError::Io { .. })
    }

    pub(crate) fn io(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        IngestError::Io {
            source_name: source_name.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
