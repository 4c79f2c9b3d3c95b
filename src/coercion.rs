//! Type coercion from raw cells to the cleaned dataset
//!
//! Numeric fields: unparseable, null, NaN and ±Infinity all become 0.0.
//! String fields: null and the "nan" artifact become the empty string.
//! Timestamp field: taken as already parsed by the loader.
//! Fields absent from the source stay absent; extra columns pass through as text.

use crate::dataset::{Column, Dataset};
use crate::schema::{FieldKind, SchemaContract};
use crate::table::{RawColumn, RawTable};
use chrono::NaiveDateTime;

/// Parse a numeric cell into a finite number
///
/// # Example
/// ```
/// use adsight::coercion::coerce_number;
///
/// assert_eq!(coerce_number(Some("12.5")), 12.5);
/// assert_eq!(coerce_number(Some("inf")), 0.0);
/// assert_eq!(coerce_number(Some("n/a?")), 0.0);
/// assert_eq!(coerce_number(None), 0.0);
/// ```
pub fn coerce_number(cell: Option<&str>) -> f64 {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Stringify a cell, mapping null and "nan" to ""
pub fn coerce_text(cell: Option<&str>) -> String {
    match cell {
        None => String::new(),
        Some(c) if c.eq_ignore_ascii_case("nan") => String::new(),
        Some(c) => c.to_string(),
    }
}

/// Normalize accepted columns into a `Dataset`
///
/// `timestamps` holds the parsed values of the contract's timestamp field, if
/// the source has it. Column order follows the source. Errors only when a
/// column's length disagrees with the table's row count.
pub fn coerce(
    table: &RawTable,
    contract: &SchemaContract,
    timestamps: Option<Vec<Option<NaiveDateTime>>>,
) -> Result<Dataset, String> {
    let mut timestamps = timestamps;
    let mut columns = Vec::with_capacity(table.columns().len());

    for raw in table.columns() {
        let column = match contract.kind_of(&raw.name) {
            Some(FieldKind::Numeric) => Column::numeric(
                raw.name.clone(),
                raw.cells.iter().map(|c| coerce_number(c.as_deref())).collect(),
            ),
            Some(FieldKind::Timestamp) => {
                let parsed = timestamps
                    .take()
                    .unwrap_or_else(|| raw.parse_timestamps());
                Column::timestamp(raw.name.clone(), parsed)
            }
            Some(FieldKind::String) | None => text_column(raw),
        };
        columns.push(column);
    }

    Dataset::from_columns(columns)
}

fn text_column(raw: &RawColumn) -> Column {
    Column::text(
        raw.name.clone(),
        raw.cells
            .iter()
            .map(|c| coerce_text(c.as_deref()))
            .collect::<Vec<_>>(),
    )
}
