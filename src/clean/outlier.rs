//! Cascading z-score outlier filter
//!
//! Columns are filtered one at a time. Each pass computes its mean and
//! standard deviation over the rows that survived the previous passes, so
//! the result depends on column order: dropping an extreme row while
//! filtering `a` shrinks the spread of `b`, which can expose rows in `b`
//! that would have passed against the full table.

use tracing::{debug, info, warn};

use crate::config::{CleaningConfig, DEFAULT_THRESHOLD};
use crate::error::{CleanError, Result};
use crate::model::Table;
use crate::report::{CleaningReport, OutlierPass};
use crate::stats::ColumnStats;

use super::CleaningStage;

/// Drops rows whose |z| in a checked column reaches the threshold
pub struct OutlierFilter {
    /// Columns to check in order; `None` checks every numeric column
    columns: Option<Vec<String>>,
    threshold: f64,
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self {
            columns: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl OutlierFilter {
    pub fn new(columns: Option<Vec<String>>, threshold: f64) -> Self {
        Self { columns, threshold }
    }

    pub fn from_config(config: &CleaningConfig) -> Self {
        Self::new(config.numeric_columns.clone(), config.threshold)
    }

    /// Run one column's pass against the current table
    fn filter_column(
        &self,
        table: Table,
        name: &str,
        report: &mut CleaningReport,
    ) -> Result<Table> {
        let column = table.column(name).ok_or_else(|| {
            CleanError::InvalidConfiguration(format!("outlier column '{}' not found", name))
        })?;
        if !column.is_numeric() {
            return Err(CleanError::InvalidConfiguration(format!(
                "outlier column '{}' is {}, not numeric",
                name,
                column.kind()
            )));
        }

        let rows_before = table.row_count();
        let stats = ColumnStats::of(column);
        let mut pass = OutlierPass {
            column: name.to_string(),
            rows_before,
            rows_removed: 0,
            mean: stats.mean,
            std: stats.std,
            constant: false,
        };

        if rows_before == 0 {
            report.outlier_passes.push(pass);
            return Ok(table);
        }

        // Zero or undefined std: every present value scores z = 0
        if stats.count > 0 && stats.is_constant() {
            warn!(column = name, std = ?stats.std, "constant outlier column");
            pass.constant = true;
        }

        // A missing cell has no z-score, so it cannot satisfy |z| < threshold
        let keep: Vec<bool> = column
            .cells()
            .iter()
            .map(|cell| {
                cell.as_f64()
                    .and_then(|v| stats.z_score(v))
                    .is_some_and(|z| z.abs() < self.threshold)
            })
            .collect();

        pass.rows_removed = keep.iter().filter(|k| !**k).count();
        debug!(
            column = name,
            mean = ?stats.mean,
            std = ?stats.std,
            removed = pass.rows_removed,
            "outlier pass"
        );
        report.outlier_passes.push(pass);

        Ok(table.retain_rows(&keep))
    }
}

impl CleaningStage for OutlierFilter {
    fn name(&self) -> &'static str {
        "filter_outliers"
    }

    fn apply(&self, table: Table, report: &mut CleaningReport) -> Result<Table> {
        let columns = match &self.columns {
            Some(columns) => columns.clone(),
            None => table.numeric_column_names(),
        };

        let table = columns
            .iter()
            .try_fold(table, |table, name| self.filter_column(table, name, report))?;

        info!(
            removed = report.outliers_removed(),
            remaining = table.row_count(),
            "outlier filtering complete"
        );
        Ok(table)
    }
}
