// Ingestion validator: drift, null and date checks in a fixed order

use crate::error::{IngestError, Result};
use crate::schema::contract::SchemaContract;
use crate::schema::drift::{DriftMode, DriftReport};
use serde::Serialize;

/// Share of nulls above which a column fails the load
pub const SEVERE_NULL_FRACTION: f64 = 0.5;

/// Non-fatal observation recorded while validating a source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationNote {
    /// Source carries columns outside the contract
    ExtraColumns { columns: Vec<String> },
    /// Missing or near-miss drift accepted under `warn` mode
    DriftTolerated { report: DriftReport },
    /// Source passed every check
    Validated {
        missing: Vec<String>,
        extra: Vec<String>,
        null_fractions: Vec<(String, f64)>,
    },
}

/// Column-level facts about a raw source, gathered before coercion
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    /// Source column names in source order
    pub columns: &'a [String],
    /// Null fraction per column, in source order
    pub null_fractions: &'a [(String, f64)],
    /// Every value of the timestamp column failed to parse
    pub date_all_null: bool,
}

/// Successful validation outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub drift: DriftReport,
    pub notes: Vec<ValidationNote>,
}

/// Checks raw columns against the schema contract
///
/// The drift mode is fixed at construction and applies to every call.
///
/// # Example
/// ```
/// use adsight::schema::{DriftMode, IngestionValidator, ValidationInput};
///
/// let validator = IngestionValidator::new(DriftMode::Fail);
/// let columns = vec!["campaign_name".to_string(), "date".to_string()];
/// let input = ValidationInput {
///     columns: &columns,
///     null_fractions: &[],
///     date_all_null: false,
/// };
/// assert!(validator.validate(&input).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IngestionValidator {
    contract: SchemaContract,
    mode: DriftMode,
}

impl IngestionValidator {
    pub fn new(mode: DriftMode) -> Self {
        Self {
            contract: SchemaContract,
            mode,
        }
    }

    pub fn mode(&self) -> DriftMode {
        self.mode
    }

    pub fn contract(&self) -> &SchemaContract {
        &self.contract
    }

    /// Classify drift and decide pass/fail under the configured mode
    pub fn detect_drift(&self, columns: &[String]) -> Result<Validation> {
        let report = DriftReport::compute(&self.contract, columns);

        if report.is_clean() {
            let mut notes = Vec::new();
            if !report.extra.is_empty() {
                tracing::info!("Extra columns ignored by contract: {:?}", report.extra);
                notes.push(ValidationNote::ExtraColumns {
                    columns: report.extra.clone(),
                });
            }
            return Ok(Validation {
                drift: report,
                notes,
            });
        }

        match self.mode {
            DriftMode::Fail => Err(IngestError::SchemaDrift { report }),
            DriftMode::Warn => {
                tracing::warn!(
                    "Schema drift tolerated: missing={:?} near_miss={:?} severity={}",
                    report.missing,
                    report.near_miss,
                    report.severity
                );
                Ok(Validation {
                    notes: vec![ValidationNote::DriftTolerated {
                        report: report.clone(),
                    }],
                    drift: report,
                })
            }
        }
    }

    /// Run the full validation sequence
    pub fn validate(&self, input: &ValidationInput<'_>) -> Result<Validation> {
        let report = DriftReport::compute(&self.contract, input.columns);

        // Step 1: missing columns are decided by drift detection alone
        if !report.missing.is_empty() {
            return self.detect_drift(input.columns);
        }

        // Step 2
        let mut notes = Vec::new();
        if !report.extra.is_empty() {
            tracing::info!("Extra columns present: {:?}", report.extra);
            notes.push(ValidationNote::ExtraColumns {
                columns: report.extra.clone(),
            });
        }

        // Step 3: mode-independent
        if let Some((column, fraction)) = input
            .null_fractions
            .iter()
            .find(|(_, fraction)| *fraction > SEVERE_NULL_FRACTION)
        {
            return Err(IngestError::SevereNull {
                column: column.clone(),
                fraction: *fraction,
            });
        }

        // Step 4: mode-independent
        let date_field = self.contract.timestamp_field();
        if input.date_all_null && input.columns.iter().any(|c| c == date_field) {
            return Err(IngestError::DateParse {
                column: date_field.to_string(),
            });
        }

        // Step 5: near-miss-only drift
        let drift = self.detect_drift(input.columns)?;
        for note in drift.notes {
            if !notes.contains(&note) {
                notes.push(note);
            }
        }

        // Step 6
        tracing::info!(
            "Source validated: missing={:?} extra={:?} null_fractions={:?}",
            report.missing,
            report.extra,
            input.null_fractions
        );
        notes.push(ValidationNote::Validated {
            missing: report.missing.clone(),
            extra: report.extra.clone(),
            null_fractions: input.null_fractions.to_vec(),
        });

        Ok(Validation {
            drift: drift.drift,
            notes,
        })
    }
}
