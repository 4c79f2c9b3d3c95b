//! Raw CSV table reading
//!
//! Reads a delimited source into string cells with nulls marked, before any
//! contract knowledge is applied. Null detection and date parsing live here so
//! that validation can see raw null fractions and date failures.

use crate::error::{IngestError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;

/// Cell markers read as null, in addition to empty or whitespace-only cells
const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Whether a raw cell counts as null
pub fn is_null_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || NULL_MARKERS.contains(&trimmed)
}

/// Parse a timestamp cell
///
/// # Example
/// ```
/// use adsight::table::parse_timestamp;
///
/// assert!(parse_timestamp("2025-01-01").is_some());
/// assert!(parse_timestamp("2025-01-01T08:30:00Z").is_some());
/// assert!(parse_timestamp("NOT_A_DATE").is_none());
/// ```
pub fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// One source column: its header and raw cells (`None` = null)
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

impl RawColumn {
    pub fn null_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let nulls = self.cells.iter().filter(|c| c.is_none()).count();
        nulls as f64 / self.cells.len() as f64
    }

    /// Parse every cell as a timestamp
    pub fn parse_timestamps(&self) -> Vec<Option<NaiveDateTime>> {
        self.cells
            .iter()
            .map(|cell| cell.as_deref().and_then(parse_timestamp))
            .collect()
    }
}

/// A source table in column-major form
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    columns: Vec<RawColumn>,
    rows: usize,
}

impl RawTable {
    /// Read a CSV source with a header row
    ///
    /// Short rows are padded with nulls; cells past the header width are ignored.
    /// Cell values are trimmed, header names are kept byte for byte.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| IngestError::io(source_name, e))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(IngestError::io(source_name, "no header row"));
        }

        let mut columns: Vec<RawColumn> = headers
            .into_iter()
            .map(|name| RawColumn {
                name,
                cells: Vec::new(),
            })
            .collect();

        let mut rows = 0;
        for record in reader.records() {
            let record = record.map_err(|e| IngestError::io(source_name, e))?;
            for (idx, column) in columns.iter_mut().enumerate() {
                let cell = record
                    .get(idx)
                    .filter(|cell| !is_null_cell(cell))
                    .map(str::to_string);
                column.cells.push(cell);
            }
            rows += 1;
        }

        Ok(Self { columns, rows })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    /// First column with an exact name match
    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Null fraction per column, in source order
    pub fn null_fractions(&self) -> Vec<(String, f64)> {
        self.columns
            .iter()
            .map(|c| (c.name.clone(), c.null_fraction()))
            .collect()
    }
}
