//! Conversion to numeric cells

use crate::model::{CellValue, ColumnKind};

use super::CellConverter;

/// Parses text into floating-point cells
pub struct NumericConverter;

impl CellConverter for NumericConverter {
    fn target_kind(&self) -> ColumnKind {
        ColumnKind::Numeric
    }

    fn convert(&self, cell: &CellValue) -> Option<CellValue> {
        let value = match cell {
            CellValue::Float(f) => *f,
            CellValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };

        // NaN would turn into the missing marker; infinities have no z-score
        if !value.is_finite() {
            return None;
        }
        Some(CellValue::Float(value))
    }
}
