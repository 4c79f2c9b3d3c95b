//! Cleaned, typed dataset
//!
//! Produced once by the coercion stage and never mutated afterwards. Storage is
//! column-major; `record` gives a row view for consumers that want one.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Typed values of one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Finite numbers only
    Numeric(Vec<f64>),
    /// Never null; missing values are empty strings
    Text(Vec<String>),
    /// `None` where a cell was null or unparseable
    Timestamp(Vec<Option<NaiveDateTime>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Timestamp(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn timestamp(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Timestamp(values),
        }
    }
}

/// Borrowed value of a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Numeric(f64),
    Text(&'a str),
    Timestamp(Option<NaiveDateTime>),
}

/// Row view over a dataset
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    dataset: &'a Dataset,
    index: usize,
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<Value<'a>> {
        let column = self.dataset.column(column)?;
        Some(match &column.data {
            ColumnData::Numeric(v) => Value::Numeric(v[self.index]),
            ColumnData::Text(v) => Value::Text(&v[self.index]),
            ColumnData::Timestamp(v) => Value::Timestamp(v[self.index]),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered records of contract fields plus any extra source columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset from equally sized columns
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, String> {
        let rows = columns.first().map(|c| c.data.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.data.len() != rows) {
            return Err(format!(
                "column '{}' has {} rows, expected {}",
                bad.name,
                bad.data.len(),
                rows
            ));
        }
        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match &self.column(name)?.data {
            ColumnData::Numeric(v) => Some(v),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&[String]> {
        match &self.column(name)?.data {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn timestamps(&self, name: &str) -> Option<&[Option<NaiveDateTime>]> {
        match &self.column(name)?.data {
            ColumnData::Timestamp(v) => Some(v),
            _ => None,
        }
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        (index < self.rows).then_some(Record {
            dataset: self,
            index,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        (0..self.rows).map(move |index| Record {
            dataset: self,
            index,
        })
    }

    /// Row indices grouped by the value of a text column, keys sorted
    pub fn group_by_text(&self, name: &str) -> Option<BTreeMap<&str, Vec<usize>>> {
        let keys = self.text(name)?;
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, key) in keys.iter().enumerate() {
            groups.entry(key.as_str()).or_default().push(idx);
        }
        Some(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_rejects_ragged() {
        let result = Dataset::from_columns(vec![
            Column::numeric("spend", vec![1.0, 2.0]),
            Column::text("campaign_name", vec!["A"]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_view() {
        let ds = Dataset::from_columns(vec![
            Column::numeric("spend", vec![1.0, 2.0]),
            Column::text("campaign_name", vec!["A", "B"]),
        ])
        .unwrap();

        let rec = ds.record(1).unwrap();
        assert_eq!(rec.get("spend"), Some(Value::Numeric(2.0)));
        assert_eq!(rec.get("campaign_name"), Some(Value::Text("B")));
        assert_eq!(rec.get("revenue"), None);
        assert!(ds.record(2).is_none());
        assert_eq!(ds.records().count(), 2);
    }

    #[test]
    fn test_group_by_text_sorted_keys() {
        let ds = Dataset::from_columns(vec![Column::text(
            "campaign_name",
            vec!["B", "A", "B"],
        )])
        .unwrap();

        let groups = ds.group_by_text("campaign_name").unwrap();
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["A", "B"]);
        assert_eq!(groups["B"], vec![0, 2]);
    }

    #[test]
    fn test_typed_accessors_check_kind() {
        let ds = Dataset::from_columns(vec![Column::text("spend", vec!["1"])]).unwrap();
        assert!(ds.numeric("spend").is_none());
        assert!(ds.text("spend").is_some());
    }
}
