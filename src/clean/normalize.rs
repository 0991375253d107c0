//! Caller-declared column type conversions

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::CleaningConfig;
use crate::convert::{CellConverter, ConverterFactory};
use crate::error::{CleanError, Result};
use crate::model::{CellValue, Table};
use crate::report::{CleaningReport, Conversion};

use super::CleaningStage;

/// Converts every cell of each mapped column; unmapped columns pass through
#[derive(Default)]
pub struct TypeNormalizer {
    converters: IndexMap<String, Box<dyn CellConverter>>,
}

impl TypeNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in converters for every rule in the configuration
    pub fn from_config(config: &CleaningConfig) -> Self {
        let converters = config
            .type_conversions
            .iter()
            .map(|(name, rule)| (name.clone(), ConverterFactory::create(rule)))
            .collect();
        Self { converters }
    }

    /// Register a converter, replacing any existing one for the column
    pub fn with_converter(
        mut self,
        column: impl Into<String>,
        converter: impl CellConverter + 'static,
    ) -> Self {
        self.insert(column, Box::new(converter));
        self
    }

    pub(crate) fn insert(&mut self, column: impl Into<String>, converter: Box<dyn CellConverter>) {
        self.converters.insert(column.into(), converter);
    }

    /// Columns with a registered conversion, in application order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    fn convert_column(
        table: &Table,
        name: &str,
        converter: &dyn CellConverter,
    ) -> Result<Vec<CellValue>> {
        let column = table.column(name).ok_or_else(|| {
            CleanError::InvalidConfiguration(format!("conversion column '{}' not found", name))
        })?;
        let target = converter.target_kind();

        column
            .cells()
            .iter()
            .map(|cell| {
                if cell.is_null() {
                    return Ok(CellValue::Null);
                }
                converter
                    .convert(cell)
                    .map(CellValue::normalized)
                    .filter(|converted| !converted.is_null() && target.accepts(converted))
                    .ok_or_else(|| CleanError::ConversionError {
                        column: name.to_string(),
                        value: cell.display().into_owned(),
                    })
            })
            .collect()
    }
}

impl CleaningStage for TypeNormalizer {
    fn name(&self) -> &'static str {
        "normalize_types"
    }

    fn apply(&self, mut table: Table, report: &mut CleaningReport) -> Result<Table> {
        for (name, converter) in &self.converters {
            let cells = Self::convert_column(&table, name, converter.as_ref())?;
            let target = converter.target_kind();

            if let Some(column) = table.column_mut(name) {
                let from = column.kind();
                column.replace(target, cells);
                debug!(column = %name, %from, to = %target, "converted column");
                report.conversions.push(Conversion {
                    column: name.clone(),
                    from,
                    to: target,
                });
            }
        }

        info!(columns = self.converters.len(), "type normalization complete");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::config::ConversionRule;
    use crate::convert::FnConverter;
    use crate::model::{Column, ColumnKind};

    fn table() -> Table {
        Table::new(vec![
            Column::categorical("code", vec![Some("1"), Some(" 2.5 "), None]),
            Column::temporal("when", vec![Some("2024-01-02"), None, Some("2024-01-03")]),
            Column::categorical("label", vec![Some("x"), Some("y"), Some("z")]),
        ])
        .unwrap()
    }

    #[test]
    fn test_converts_mapped_columns_only() {
        let config = CleaningConfig::new()
            .with_conversion("code", ColumnKind::Numeric)
            .with_conversion("when", ConversionRule::temporal(["%Y-%m-%d"]));

        let mut report = CleaningReport::default();
        let table = TypeNormalizer::from_config(&config)
            .apply(table(), &mut report)
            .unwrap();

        let code = table.column("code").unwrap();
        assert_eq!(code.kind(), ColumnKind::Numeric);
        assert_eq!(
            code.cells(),
            &[CellValue::Float(1.0), CellValue::Float(2.5), CellValue::Null]
        );

        let when = table.column("when").unwrap();
        assert_eq!(
            when.cells()[0],
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
        );
        assert!(when.cells()[1].is_null());

        assert_eq!(table.column("label").unwrap().kind(), ColumnKind::Categorical);
        assert_eq!(report.conversions.len(), 2);
        assert_eq!(report.conversions[0].from, ColumnKind::Categorical);
    }

    #[test]
    fn test_failed_cell_names_column_and_value() {
        let table = Table::new(vec![Column::categorical(
            "price",
            vec![Some("3"), Some("abc")],
        )])
        .unwrap();
        let config = CleaningConfig::new().with_conversion("price", ColumnKind::Numeric);

        let err = TypeNormalizer::from_config(&config)
            .apply(table, &mut CleaningReport::default())
            .unwrap_err();
        match err {
            CleanError::ConversionError { column, value } => {
                assert_eq!(column, "price");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_converter_overrides_rule() {
        let config = CleaningConfig::new().with_conversion("label", ColumnKind::Numeric);
        let normalizer = TypeNormalizer::from_config(&config).with_converter(
            "label",
            FnConverter::new(ColumnKind::Numeric, |cell: &CellValue| match cell {
                CellValue::String(s) => Some(CellValue::Float((s.as_bytes()[0] - b'w') as f64)),
                _ => None,
            }),
        );

        let table = normalizer
            .apply(table(), &mut CleaningReport::default())
            .unwrap();
        let label: Vec<f64> = table.column("label").unwrap().present_values().collect();
        assert_eq!(label, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_converter_returning_wrong_kind_fails() {
        let normalizer = TypeNormalizer::new().with_converter(
            "label",
            FnConverter::new(ColumnKind::Numeric, |cell: &CellValue| Some(cell.clone())),
        );
        let err = normalizer
            .apply(table(), &mut CleaningReport::default())
            .unwrap_err();
        assert_eq!(err.column(), Some("label"));
    }
}
