//! Column metadata and declared kinds

use serde::{Deserialize, Serialize};

use crate::error::{CleanError, Result};

use super::table::CellValue;

/// Declared semantic kind of a column, fixed when the table is built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Temporal,
    #[default]
    Other,
}

impl ColumnKind {
    /// Check whether a cell may live in a column of this kind
    pub fn accepts(self, cell: &CellValue) -> bool {
        match (self, cell) {
            (_, CellValue::Null) => true,
            (ColumnKind::Numeric, CellValue::Float(f)) => f.is_finite(),
            (ColumnKind::Categorical, CellValue::String(_)) => true,
            (
                ColumnKind::Temporal,
                CellValue::String(_) | CellValue::Date(_) | CellValue::DateTime(_),
            ) => true,
            (ColumnKind::Other, _) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Temporal => write!(f, "temporal"),
            ColumnKind::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ColumnKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "numeric" => Ok(ColumnKind::Numeric),
            "categorical" => Ok(ColumnKind::Categorical),
            "temporal" => Ok(ColumnKind::Temporal),
            "other" => Ok(ColumnKind::Other),
            _ => Err(format!("Unknown column kind: {}", s)),
        }
    }
}

/// A named column of cells sharing one declared kind
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (unique within a table)
    name: String,
    /// Declared kind
    kind: ColumnKind,
    /// Cell values in row order
    cells: Vec<CellValue>,
}

impl Column {
    /// Create a column, rejecting cells that do not fit the declared kind
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<CellValue>) -> Result<Self> {
        let name = name.into();
        let cells: Vec<CellValue> = cells.into_iter().map(CellValue::normalized).collect();

        if let Some(bad) = cells.iter().find(|c| !kind.accepts(c)) {
            return Err(CleanError::InvalidTable(format!(
                "column '{}' is {} but holds value '{}'",
                name, kind, bad
            )));
        }

        Ok(Self { name, kind, cells })
    }

    /// Create a numeric column; `None` is the missing marker
    ///
    /// Infinities are kept here and rejected when the column joins a [`Table`].
    ///
    /// [`Table`]: super::Table
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
            cells: values.into_iter().map(CellValue::from).collect(),
        }
    }

    /// Create a categorical column from source strings
    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self::text(name, ColumnKind::Categorical, values)
    }

    /// Create a temporal column from its source encoding
    pub fn temporal<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self::text(name, ColumnKind::Temporal, values)
    }

    fn text<S: Into<String>>(
        name: impl Into<String>,
        kind: ColumnKind,
        values: Vec<Option<S>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            cells: values
                .into_iter()
                .map(|v| v.map(|s| CellValue::from(s.into())).unwrap_or(CellValue::Null))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }

    /// First cell the declared kind does not accept
    pub(crate) fn first_mismatch(&self) -> Option<&CellValue> {
        self.cells.iter().find(|c| !self.kind.accepts(c))
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of missing cells
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_null()).count()
    }

    /// Present numeric values in row order
    pub fn present_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(CellValue::as_f64)
    }

    /// Replace every missing cell with `value`, returning how many were filled
    pub(crate) fn fill_missing(&mut self, value: CellValue) -> usize {
        let mut filled = 0;
        for cell in self.cells.iter_mut().filter(|c| c.is_null()) {
            *cell = value.clone();
            filled += 1;
        }
        filled
    }

    /// Keep only the cells whose position is marked in `keep`
    pub(crate) fn retain(&mut self, keep: &[bool]) {
        let mut idx = 0;
        self.cells.retain(|_| {
            let kept = keep.get(idx).copied().unwrap_or(false);
            idx += 1;
            kept
        });
    }

    /// Swap in converted cells and the new declared kind
    pub(crate) fn replace(&mut self, kind: ColumnKind, cells: Vec<CellValue>) {
        self.kind = kind;
        self.cells = cells;
    }
}
