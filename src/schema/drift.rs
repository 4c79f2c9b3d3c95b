// Drift reporting between source columns and the schema contract

use crate::schema::contract::SchemaContract;
use serde::{Deserialize, Serialize};

/// How drift in missing or near-miss columns is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriftMode {
    /// Missing or near-miss columns fail the load
    #[default]
    Fail,
    /// Missing or near-miss columns are recorded as warnings
    Warn,
}

/// A source column that matches a contract field only after normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearMiss {
    pub expected: String,
    pub actual: String,
}

/// Divergence between a source's columns and the contract
///
/// Computed once per load. `missing` follows contract order, `extra` and
/// `near_miss` follow source column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub near_miss: Vec<NearMiss>,
    /// |missing| / |contract|, rounded to 3 decimals
    pub severity: f64,
}

/// Lowercase and keep only `[a-z0-9]`
///
/// # Example
/// ```
/// use adsight::schema::normalize_name;
///
/// assert_eq!(normalize_name("Campaign_Name"), "campaignname");
/// assert_eq!(normalize_name(" CTR (%) "), "ctr");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

impl DriftReport {
    /// Compare source columns against the contract
    pub fn compute(contract: &SchemaContract, columns: &[String]) -> Self {
        let has = |name: &str| columns.iter().any(|c| c == name);

        let missing: Vec<String> = contract
            .names()
            .filter(|&name| !has(name))
            .map(str::to_string)
            .collect();

        let extra: Vec<String> = columns
            .iter()
            .filter(|c| !contract.contains(c))
            .cloned()
            .collect();

        // A field whose canonical name is present never reports a near miss
        let mut near_miss = Vec::new();
        for column in columns {
            let normalized = normalize_name(column);
            for expected in contract.names() {
                if column != expected && normalize_name(expected) == normalized && !has(expected) {
                    near_miss.push(NearMiss {
                        expected: expected.to_string(),
                        actual: column.clone(),
                    });
                }
            }
        }

        let severity = round3(missing.len() as f64 / contract.len() as f64);

        Self {
            missing,
            extra,
            near_miss,
            severity,
        }
    }

    /// No missing fields and no near misses
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.near_miss.is_empty()
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
