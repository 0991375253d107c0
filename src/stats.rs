//! Column statistics used by imputation and outlier filtering

use serde::Serialize;

use crate::model::Column;

/// Arithmetic mean, or `None` for an empty input
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator, as pandas' `std`)
///
/// Undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Summary of a numeric column's present values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

impl ColumnStats {
    pub fn of(column: &Column) -> Self {
        let values: Vec<f64> = column.present_values().collect();
        Self {
            count: values.len(),
            mean: mean(&values),
            std: sample_std(&values),
        }
    }

    /// True when every present value sits at the mean (zero or undefined std)
    pub fn is_constant(&self) -> bool {
        !self.std.is_some_and(|s| s > 0.0)
    }

    /// z-score of `value`, or `None` when the column has no present values
    ///
    /// A constant column scores every value as 0.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        let mean = self.mean?;
        match self.std {
            Some(s) if s > 0.0 => Some((value - mean) / s),
            _ => Some(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(sample_std(&[5.0]), None);
        assert_eq!(sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), Some((32.0f64 / 7.0).sqrt()));
    }

    #[test]
    fn test_z_score_of_constant_column() {
        let col = Column::numeric("c", vec![Some(4.0), Some(4.0), None]);
        let stats = ColumnStats::of(&col);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.std, Some(0.0));
        assert!(stats.is_constant());
        assert_eq!(stats.z_score(4.0), Some(0.0));
    }

    #[test]
    fn test_z_score_of_single_value_and_empty_column() {
        let single = ColumnStats::of(&Column::numeric("c", vec![Some(7.0)]));
        assert_eq!(single.std, None);
        assert!(single.is_constant());
        assert_eq!(single.z_score(7.0), Some(0.0));

        let empty = ColumnStats::of(&Column::numeric("c", vec![None]));
        assert_eq!(empty.z_score(1.0), None);
    }
}
