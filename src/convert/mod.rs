//! Per-cell conversions used by type normalization

mod numeric;
mod temporal;
mod text;

use crate::config::ConversionRule;
use crate::model::{CellValue, ColumnKind};

pub use self::numeric::NumericConverter;
pub use self::temporal::TemporalConverter;
pub use self::text::{CategoricalConverter, PassthroughConverter};

/// Trait for converting present cells to a target kind
pub trait CellConverter: Send + Sync {
    /// Kind every converted cell belongs to
    fn target_kind(&self) -> ColumnKind;

    /// Convert one present cell, or `None` if the value cannot be converted
    fn convert(&self, cell: &CellValue) -> Option<CellValue>;
}

/// Converter backed by a caller-supplied function
pub struct FnConverter<F> {
    target: ColumnKind,
    func: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&CellValue) -> Option<CellValue> + Send + Sync,
{
    pub fn new(target: ColumnKind, func: F) -> Self {
        Self { target, func }
    }
}

impl<F> CellConverter for FnConverter<F>
where
    F: Fn(&CellValue) -> Option<CellValue> + Send + Sync,
{
    fn target_kind(&self) -> ColumnKind {
        self.target
    }

    fn convert(&self, cell: &CellValue) -> Option<CellValue> {
        (self.func)(cell)
    }
}

/// Factory for the built-in converters
pub struct ConverterFactory;

impl ConverterFactory {
    /// Create the converter a rule declares
    pub fn create(rule: &ConversionRule) -> Box<dyn CellConverter> {
        match rule.target {
            ColumnKind::Numeric => Box::new(NumericConverter),
            ColumnKind::Categorical => Box::new(CategoricalConverter),
            ColumnKind::Temporal => Box::new(TemporalConverter::new(rule.formats.clone())),
            ColumnKind::Other => Box::new(PassthroughConverter),
        }
    }
}
