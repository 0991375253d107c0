//! tabclean - Cleaning pipeline for tabular data
//!
//! Takes a raw in-memory table and removes its defects in a fixed order:
//! missing numeric values are imputed, exact duplicate rows are dropped,
//! z-score outliers are filtered one column at a time, and finally the
//! caller's declared type conversions are applied.

pub mod clean;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod report;
pub mod stats;

pub use clean::{clean_table, CleaningPipeline, CleaningResult};
pub use config::{CleaningConfig, ConversionRule};
pub use error::{CleanError, Result};
pub use model::{CellValue, Column, ColumnKind, Table};
pub use report::CleaningReport;
