//! Exact duplicate row removal

use rustc_hash::FxHashSet;
use tracing::info;

use crate::error::Result;
use crate::model::Table;
use crate::report::CleaningReport;

use super::CleaningStage;

/// Drops every row equal to an earlier one, keeping first occurrences in order
pub struct DuplicateEliminator;

impl DuplicateEliminator {
    /// Mark the first occurrence of each distinct row
    pub fn first_occurrences(table: &Table) -> Vec<bool> {
        let mut seen = FxHashSet::default();
        table.rows().map(|row| seen.insert(row)).collect()
    }
}

impl CleaningStage for DuplicateEliminator {
    fn name(&self) -> &'static str {
        "deduplicate"
    }

    fn apply(&self, table: Table, report: &mut CleaningReport) -> Result<Table> {
        let keep = Self::first_occurrences(&table);
        let removed = keep.iter().filter(|k| !**k).count();

        report.duplicates_removed += removed;
        info!(removed, "duplicate rows removed");

        if removed == 0 {
            return Ok(table);
        }
        Ok(table.retain_rows(&keep))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    #[test]
    fn test_keeps_first_occurrence_in_order() {
        let table = Table::new(vec![
            Column::numeric("n", vec![Some(1.0), Some(1.0), Some(2.0), Some(1.0)]),
            Column::categorical("s", vec![Some("a"), Some("a"), Some("b"), Some("c")]),
        ])
        .unwrap();

        let mut report = CleaningReport::default();
        let table = DuplicateEliminator.apply(table, &mut report).unwrap();

        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.column("s").unwrap().cells(),
            &[CellValue::from("a"), CellValue::from("b"), CellValue::from("c")]
        );
    }

    #[test]
    fn test_missing_cells_compare_equal() {
        let table = Table::new(vec![
            Column::categorical("s", vec![None::<&str>, None, Some("x")]),
        ])
        .unwrap();
        assert_eq!(
            DuplicateEliminator::first_occurrences(&table),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_no_float_tolerance() {
        let table = Table::new(vec![Column::numeric(
            "n",
            vec![Some(0.1 + 0.2), Some(0.3), Some(-0.0), Some(0.0)],
        )])
        .unwrap();
        assert_eq!(
            DuplicateEliminator::first_occurrences(&table),
            vec![true, true, true, false]
        );
    }
}
