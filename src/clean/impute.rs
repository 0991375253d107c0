//! Mean imputation for numeric columns

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{CleanError, Result};
use crate::model::{CellValue, Table};
use crate::report::{CleaningReport, Imputation};
use crate::stats::ColumnStats;

use super::CleaningStage;

/// Replaces missing numeric cells with the mean of the column's present values
pub struct MissingValueImputer;

impl MissingValueImputer {
    /// Means for every numeric column that has something to fill, in table order
    fn column_means(table: &Table) -> Vec<(String, Option<f64>)> {
        table
            .columns_map()
            .par_values()
            .filter(|c| c.is_numeric() && c.missing_count() > 0)
            .map(|c| (c.name().to_string(), ColumnStats::of(c).mean))
            .collect()
    }
}

impl CleaningStage for MissingValueImputer {
    fn name(&self) -> &'static str {
        "impute"
    }

    fn apply(&self, mut table: Table, report: &mut CleaningReport) -> Result<Table> {
        let means = Self::column_means(&table);

        // Fail on the first column in table order, whatever order rayon finished in
        let means = means
            .into_iter()
            .map(|(column, mean)| match mean {
                Some(mean) => Ok((column, mean)),
                None => Err(CleanError::UndefinedStatistic { column }),
            })
            .collect::<Result<Vec<_>>>()?;

        for (name, mean) in means {
            let Some(column) = table.column_mut(&name) else {
                continue;
            };
            let filled = column.fill_missing(CellValue::Float(mean));
            debug!(column = %name, filled, mean, "imputed missing values");
            report.imputations.push(Imputation {
                column: name,
                filled,
                mean,
            });
        }

        info!(cells = report.cells_imputed(), "imputation complete");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;

    #[test]
    fn test_fills_with_mean_of_present_values() {
        let table = Table::new(vec![
            Column::numeric("x", vec![Some(1.0), None, Some(3.0), None]),
            Column::numeric("full", vec![Some(5.0), Some(6.0), Some(7.0), Some(8.0)]),
            Column::categorical("tag", vec![Some("a"), None, None, Some("b")]),
        ])
        .unwrap();

        let mut report = CleaningReport::default();
        let table = MissingValueImputer.apply(table, &mut report).unwrap();

        let x: Vec<f64> = table.column("x").unwrap().present_values().collect();
        assert_eq!(x, vec![1.0, 2.0, 3.0, 2.0]);
        assert_eq!(table.column("full").unwrap().missing_count(), 0);
        // categorical columns are left alone
        assert_eq!(table.column("tag").unwrap().missing_count(), 2);

        assert_eq!(
            report.imputations,
            vec![Imputation {
                column: "x".into(),
                filled: 2,
                mean: 2.0
            }]
        );
    }

    #[test]
    fn test_all_missing_column_is_an_error() {
        let table = Table::new(vec![
            Column::numeric("ok", vec![Some(1.0), None]),
            Column::numeric("empty", vec![None, None]),
        ])
        .unwrap();

        let err = MissingValueImputer
            .apply(table, &mut CleaningReport::default())
            .unwrap_err();
        assert!(matches!(err, CleanError::UndefinedStatistic { ref column } if column == "empty"));
    }

    #[test]
    fn test_first_failing_column_is_reported() {
        let table = Table::new(vec![
            Column::numeric("a", vec![None]),
            Column::numeric("b", vec![None]),
        ])
        .unwrap();

        let err = MissingValueImputer
            .apply(table, &mut CleaningReport::default())
            .unwrap_err();
        assert_eq!(err.column(), Some("a"));
    }

    #[test]
    fn test_empty_table_is_a_no_op() {
        let table = Table::new(vec![Column::numeric("x", vec![])]).unwrap();
        let table = MissingValueImputer
            .apply(table, &mut CleaningReport::default())
            .unwrap();
        assert!(table.is_empty());
    }
}
