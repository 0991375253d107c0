//! Data model for tabular data representation

mod schema;
mod table;

pub use schema::{Column, ColumnKind};
pub use table::{CellValue, Table};
