//! Cleaning run statistics and their renderers

mod json;
mod terminal;

use serde::Serialize;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::model::ColumnKind;

pub use json::JsonReport;
pub use terminal::TerminalReport;

/// Missing cells filled in one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Imputation {
    pub column: String,
    pub filled: usize,
    pub mean: f64,
}

/// One column's pass of the cascading outlier filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierPass {
    pub column: String,
    /// Rows in the table when this pass started
    pub rows_before: usize,
    pub rows_removed: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    /// std was zero or undefined, so every present value scored z = 0
    pub constant: bool,
}

/// A column whose declared kind changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub column: String,
    pub from: ColumnKind,
    pub to: ColumnKind,
}

/// What each stage of a cleaning run did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub output_rows: usize,
    pub imputations: Vec<Imputation>,
    pub duplicates_removed: usize,
    pub outlier_passes: Vec<OutlierPass>,
    pub conversions: Vec<Conversion>,
}

impl CleaningReport {
    /// Total cells filled by imputation
    pub fn cells_imputed(&self) -> usize {
        self.imputations.iter().map(|i| i.filled).sum()
    }

    /// Total rows dropped as outliers
    pub fn outliers_removed(&self) -> usize {
        self.outlier_passes.iter().map(|p| p.rows_removed).sum()
    }

    /// Total rows dropped by the run
    pub fn rows_removed(&self) -> usize {
        self.input_rows.saturating_sub(self.output_rows)
    }
}

/// Output format for cleaning reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(ReportFormat::Terminal),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Trait for report formatters
pub trait ReportFormatter {
    /// Render a report to a writer
    fn render(&self, report: &CleaningReport, writer: &mut dyn WriteColor) -> anyhow::Result<()>;
}

/// Factory for creating report formatters
pub struct ReportFactory;

impl ReportFactory {
    pub fn create(format: ReportFormat) -> Box<dyn ReportFormatter> {
        match format {
            ReportFormat::Terminal => Box::new(TerminalReport::new()),
            ReportFormat::Json => Box::new(JsonReport::new()),
        }
    }
}

/// Render a report to stdout
pub fn render_to_stdout(report: &CleaningReport, format: ReportFormat) -> anyhow::Result<()> {
    let formatter = ReportFactory::create(format);
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    formatter.render(report, &mut stdout)
}
