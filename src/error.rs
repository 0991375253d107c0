//! Error types for the cleaning pipeline

use thiserror::Error;

/// Errors raised while building a table or running a cleaning stage
#[derive(Debug, Error)]
pub enum CleanError {
    /// A numeric column has no present values to compute a statistic from
    #[error("cannot compute statistic for column '{column}': no present values")]
    UndefinedStatistic { column: String },

    /// A cell could not be converted to the column's target kind
    #[error("cannot convert value '{value}' in column '{column}'")]
    ConversionError { column: String, value: String },

    /// The pipeline configuration does not fit the table it was given
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The table violates a structural invariant
    #[error("invalid table: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CleanError {
    /// Column the error refers to, if any
    pub fn column(&self) -> Option<&str> {
        match self {
            CleanError::UndefinedStatistic { column } => Some(column),
            CleanError::ConversionError { column, .. } => Some(column),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
