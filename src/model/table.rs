//! Table and Cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{CleanError, Result};

use super::schema::Column;

/// A single cell; `Null` is the missing marker
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Keep Eq reflexive even for a NaN that slipped past normalization
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            CellValue::Bool(b) => b.hash(state),
            CellValue::Float(f) => {
                // -0.0 == 0.0, so both must hash alike
                let f = if *f == 0.0 { 0.0 } else { *f };
                let bits = if f.is_nan() { f64::NAN.to_bits() } else { f.to_bits() };
                bits.hash(state)
            }
            CellValue::String(s) => s.hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::DateTime(dt) => dt.hash(state),
        }
    }
}

impl CellValue {
    /// Check if the value is the missing marker
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric payload, if this is a float cell
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Map a NaN float to the missing marker
    pub fn normalized(self) -> Self {
        match self {
            CellValue::Float(f) if f.is_nan() => CellValue::Null,
            other => other,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_str()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f).normalized()
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A columnar table: named columns of equal length, rows are aligned positions
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Columns keyed by name, in table order
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    /// Build a table, checking that names are unique, lengths agree and
    /// every cell fits its column's kind
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        let mut map = IndexMap::with_capacity(columns.len());

        for column in columns {
            if let Some(bad) = column.first_mismatch() {
                return Err(CleanError::InvalidTable(format!(
                    "column '{}' is {} but holds value '{}'",
                    column.name(),
                    column.kind(),
                    bad
                )));
            }
            if column.len() != row_count {
                return Err(CleanError::InvalidTable(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    row_count
                )));
            }
            let name = column.name().to_string();
            if map.insert(name.clone(), column).is_some() {
                return Err(CleanError::InvalidTable(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        Ok(Self {
            columns: map,
            row_count,
        })
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Columns in table order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Names of numeric-kind columns, in table order
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .values()
            .filter(|c| c.is_numeric())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Borrow the cells of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.values().map(|c| &c.cells()[index]).collect())
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count).filter_map(move |i| self.row(i))
    }

    /// Keep the rows marked `true`, preserving their relative order
    pub fn retain_rows(mut self, keep: &[bool]) -> Self {
        for column in self.columns.values_mut() {
            column.retain(keep);
        }
        self.row_count = (0..self.row_count)
            .filter(|&i| keep.get(i).copied().unwrap_or(false))
            .count();
        self
    }

    /// Consume the table, returning its columns
    pub fn into_columns(self) -> Vec<Column> {
        self.columns.into_values().collect()
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.get_mut(name)
    }

    pub(crate) fn columns_map(&self) -> &IndexMap<String, Column> {
        &self.columns
    }
}
