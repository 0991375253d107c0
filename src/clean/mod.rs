//! Cleaning stages and the pipeline that runs them

mod dedup;
mod impute;
mod normalize;
mod outlier;

use tracing::{debug, info};

use crate::config::CleaningConfig;
use crate::convert::CellConverter;
use crate::error::{CleanError, Result};
use crate::model::Table;
use crate::report::CleaningReport;

pub use dedup::DuplicateEliminator;
pub use impute::MissingValueImputer;
pub use normalize::TypeNormalizer;
pub use outlier::OutlierFilter;

/// One step of the pipeline: takes ownership of a table and hands back the next one
pub trait CleaningStage {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Transform the table, recording what was done in `report`
    fn apply(&self, table: Table, report: &mut CleaningReport) -> Result<Table>;
}

/// A cleaned table together with the run's statistics
#[derive(Debug)]
pub struct CleaningResult {
    pub table: Table,
    pub report: CleaningReport,
}

/// Runs impute → deduplicate → filter outliers → normalize types
pub struct CleaningPipeline {
    config: CleaningConfig,
    outliers: OutlierFilter,
    normalizer: TypeNormalizer,
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(CleaningConfig::default())
    }
}

impl CleaningPipeline {
    /// Create a pipeline from configuration
    pub fn new(config: CleaningConfig) -> Self {
        let outliers = OutlierFilter::from_config(&config);
        let normalizer = TypeNormalizer::from_config(&config);
        Self {
            config,
            outliers,
            normalizer,
        }
    }

    /// Use a custom conversion for a column instead of its configured rule
    pub fn with_converter(
        mut self,
        column: impl Into<String>,
        converter: impl CellConverter + 'static,
    ) -> Self {
        self.normalizer.insert(column, Box::new(converter));
        self
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean a table, returning only the result
    pub fn run(&self, table: Table) -> Result<Table> {
        Ok(self.run_with_report(table)?.table)
    }

    /// Clean a table, stopping at the first stage that fails
    pub fn run_with_report(&self, table: Table) -> Result<CleaningResult> {
        self.validate(&table)?;

        let mut report = CleaningReport {
            input_rows: table.row_count(),
            ..Default::default()
        };

        let stages: [&dyn CleaningStage; 4] = [
            &MissingValueImputer,
            &DuplicateEliminator,
            &self.outliers,
            &self.normalizer,
        ];

        let table = stages.iter().try_fold(table, |table, stage| {
            debug!(stage = stage.name(), rows = table.row_count(), "running stage");
            stage.apply(table, &mut report)
        })?;

        report.output_rows = table.row_count();
        info!(
            input_rows = report.input_rows,
            output_rows = report.output_rows,
            "cleaning complete"
        );

        Ok(CleaningResult { table, report })
    }

    fn validate(&self, table: &Table) -> Result<()> {
        self.config.validate(table)?;
        for name in self.normalizer.columns() {
            if table.column(name).is_none() {
                return Err(CleanError::InvalidConfiguration(format!(
                    "conversion column '{}' not found",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Convenience function to clean a table with a configuration
pub fn clean_table(table: Table, config: &CleaningConfig) -> Result<Table> {
    CleaningPipeline::new(config.clone()).run(table)
}
