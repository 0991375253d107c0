//! Categorical and pass-through conversions

use crate::model::{CellValue, ColumnKind};

use super::CellConverter;

/// Renders any present value as its display string
pub struct CategoricalConverter;

impl CellConverter for CategoricalConverter {
    fn target_kind(&self) -> ColumnKind {
        ColumnKind::Categorical
    }

    fn convert(&self, cell: &CellValue) -> Option<CellValue> {
        match cell {
            CellValue::String(_) => Some(cell.clone()),
            other => Some(CellValue::String(other.display().into_owned())),
        }
    }
}

/// Keeps values as they are, relabelling the column as `Other`
pub struct PassthroughConverter;

impl CellConverter for PassthroughConverter {
    fn target_kind(&self) -> ColumnKind {
        ColumnKind::Other
    }

    fn convert(&self, cell: &CellValue) -> Option<CellValue> {
        Some(cell.clone())
    }
}
