//! Schema-validated loading of ad-performance tables
//!
//! `DataLoader::load` reads the source (retrying only the read), validates the
//! raw columns against the contract and coerces the accepted columns into an
//! immutable `Dataset`. Any error aborts the run before analysis starts.

use crate::coercion;
use crate::dataset::Dataset;
use crate::error::{IngestError, Result};
use crate::retry::RetryPolicy;
use crate::schema::{DriftMode, DriftReport, IngestionValidator, ValidationInput, ValidationNote};
use crate::table::RawTable;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::Path;

/// What happened during a successful load
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub source: String,
    /// Hex SHA-256 of the raw bytes read
    pub source_sha256: String,
    pub rows: usize,
    pub drift: DriftReport,
    pub notes: Vec<ValidationNote>,
}

/// A cleaned dataset and the report of how it was obtained
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub report: LoadReport,
}

/// Loads and validates sources under one drift mode
///
/// # Example
/// ```
/// use adsight::loader::DataLoader;
/// use adsight::schema::DriftMode;
///
/// let csv = "campaign_name,date\nA,2025-01-01\n";
/// let loader = DataLoader::new(DriftMode::Warn);
/// let loaded = loader.load_bytes("inline.csv", csv.as_bytes()).unwrap();
/// assert_eq!(loaded.dataset.len(), 1);
/// assert_eq!(loaded.report.drift.missing.len(), 13);
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    validator: IngestionValidator,
    retry: RetryPolicy,
}

impl DataLoader {
    pub fn new(mode: DriftMode) -> Self {
        Self {
            validator: IngestionValidator::new(mode),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn mode(&self) -> DriftMode {
        self.validator.mode()
    }

    /// Load a CSV file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadedData> {
        let path = path.as_ref();
        let name = path.display().to_string();

        let bytes = self.retry.run("source read", |attempt| {
            tracing::debug!("Reading {} (attempt {})", name, attempt);
            std::fs::read(path).map_err(|e| IngestError::io(name.as_str(), e))
        })?;

        self.load_bytes(&name, &bytes)
    }

    /// Validate and coerce an in-memory CSV source
    pub fn load_bytes(&self, source: &str, bytes: &[u8]) -> Result<LoadedData> {
        let table = RawTable::from_reader(bytes, source)?;
        let columns = table.column_names();
        let null_fractions = table.null_fractions();

        let contract = self.validator.contract();
        let timestamps = table
            .column(contract.timestamp_field())
            .map(|c| c.parse_timestamps());
        let date_all_null = timestamps
            .as_ref()
            .is_some_and(|ts| !ts.is_empty() && ts.iter().all(Option::is_none));

        let validation = self.validator.validate(&ValidationInput {
            columns: &columns,
            null_fractions: &null_fractions,
            date_all_null,
        })?;

        let dataset = coercion::coerce(&table, contract, timestamps)
            .map_err(|e| IngestError::io(source, e))?;
        tracing::info!(
            "Loaded {} rows x {} columns from {}",
            dataset.len(),
            columns.len(),
            source
        );

        Ok(LoadedData {
            report: LoadReport {
                source: source.to_string(),
                source_sha256: hex::encode(Sha256::digest(bytes)),
                rows: dataset.len(),
                drift: validation.drift,
                notes: validation.notes,
            },
            dataset,
        })
    }
}
