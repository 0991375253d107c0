//! Conversion to date and datetime cells

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{CellValue, ColumnKind};

use super::CellConverter;

/// Formats tried when a rule names none
const DEFAULT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses text into `Date` or `DateTime` cells
pub struct TemporalConverter {
    formats: Vec<String>,
}

impl Default for TemporalConverter {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TemporalConverter {
    /// Create a converter trying `formats` in order; empty means the ISO defaults
    pub fn new(formats: Vec<String>) -> Self {
        let formats = if formats.is_empty() {
            DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect()
        } else {
            formats
        };
        Self { formats }
    }

    fn parse(&self, text: &str) -> Option<CellValue> {
        let text = text.trim();
        for format in &self.formats {
            // A format with time fields parses as a datetime; a date-only one
            // fails that and falls through to NaiveDate
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(CellValue::DateTime(dt));
            }
            if let Ok(d) = NaiveDate::parse_from_str(text, format) {
                return Some(CellValue::Date(d));
            }
        }
        None
    }
}

impl CellConverter for TemporalConverter {
    fn target_kind(&self) -> ColumnKind {
        ColumnKind::Temporal
    }

    fn convert(&self, cell: &CellValue) -> Option<CellValue> {
        match cell {
            CellValue::Date(_) | CellValue::DateTime(_) => Some(cell.clone()),
            CellValue::String(s) => self.parse(s),
            _ => None,
        }
    }
}
