//! Terminal report output

use anyhow::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use termcolor::{Color, ColorSpec, WriteColor};

use super::{CleaningReport, ReportFormatter};

/// Terminal report with a colored header
pub struct TerminalReport {
    header_color: Color,
}

#[derive(Tabled)]
struct ImputationRow {
    column: String,
    filled: usize,
    mean: String,
}

#[derive(Tabled)]
struct PassRow {
    #[tabled(rename = "#")]
    order: usize,
    column: String,
    before: usize,
    removed: usize,
    mean: String,
    std: String,
    note: &'static str,
}

fn format_stat(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".to_string())
}

impl TerminalReport {
    pub fn new() -> Self {
        Self {
            header_color: Color::Cyan,
        }
    }

    pub fn with_header_color(header_color: Color) -> Self {
        Self { header_color }
    }

    fn write_header(&self, report: &CleaningReport, writer: &mut dyn WriteColor) -> Result<()> {
        writer.set_color(ColorSpec::new().set_fg(Some(self.header_color)).set_bold(true))?;
        writeln!(
            writer,
            "tabclean: {} → {} rows ({} removed)",
            report.input_rows,
            report.output_rows,
            report.rows_removed()
        )?;
        writer.reset()?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_imputations(&self, report: &CleaningReport, writer: &mut dyn WriteColor) -> Result<()> {
        if report.imputations.is_empty() {
            return Ok(());
        }

        let rows = report.imputations.iter().map(|i| ImputationRow {
            column: i.column.clone(),
            filled: i.filled,
            mean: format!("{:.4}", i.mean),
        });
        writeln!(writer, "Imputed cells: {}", report.cells_imputed())?;
        writeln!(writer, "{}", Table::new(rows).with(Style::sharp()))?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_outlier_passes(
        &self,
        report: &CleaningReport,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        if report.outlier_passes.is_empty() {
            return Ok(());
        }

        let rows = report
            .outlier_passes
            .iter()
            .enumerate()
            .map(|(i, p)| PassRow {
                order: i + 1,
                column: p.column.clone(),
                before: p.rows_before,
                removed: p.rows_removed,
                mean: format_stat(p.mean),
                std: format_stat(p.std),
                note: if p.constant { "constant" } else { "" },
            });
        writeln!(writer, "Outlier passes: {} rows removed", report.outliers_removed())?;
        writeln!(writer, "{}", Table::new(rows).with(Style::sharp()))?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TerminalReport {
    fn render(&self, report: &CleaningReport, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(report, writer)?;
        self.write_imputations(report, writer)?;
        writeln!(writer, "Duplicates removed: {}", report.duplicates_removed)?;
        writeln!(writer)?;
        self.write_outlier_passes(report, writer)?;

        for conversion in &report.conversions {
            writeln!(
                writer,
                "Converted {}: {} → {}",
                conversion.column, conversion.from, conversion.to
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::*;
    use crate::model::ColumnKind;
    use crate::report::{Conversion, Imputation, OutlierPass};

    #[test]
    fn test_render_sections() {
        let report = CleaningReport {
            input_rows: 5,
            output_rows: 3,
            imputations: vec![Imputation {
                column: "x".into(),
                filled: 1,
                mean: 2.5,
            }],
            duplicates_removed: 1,
            outlier_passes: vec![OutlierPass {
                column: "x".into(),
                rows_before: 4,
                rows_removed: 1,
                mean: Some(3.0),
                std: Some(1.0),
                constant: false,
            }],
            conversions: vec![Conversion {
                column: "when".into(),
                from: ColumnKind::Temporal,
                to: ColumnKind::Temporal,
            }],
        };

        let mut out = NoColor::new(Vec::new());
        TerminalReport::new().render(&report, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.contains("5 → 3 rows (2 removed)"));
        assert!(text.contains("Imputed cells: 1"));
        assert!(text.contains("2.5000"));
        assert!(text.contains("Duplicates removed: 1"));
        assert!(text.contains("Outlier passes: 1 rows removed"));
        assert!(text.contains("Converted when: temporal → temporal"));
    }
}
