//! Pearson correlation over the monthly table.
//!
//! The matrix is computed over pairwise-complete observations: a row
//! only drops out of a pair's computation when either side is missing
//! there. A pair with fewer than two complete rows, or with zero
//! variance on either side, has no defined coefficient and carries
//! `None` instead.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use crate::transformations::cleaning::coerce_numeric;

/// Symmetric correlation matrix over a set of variables.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub variables: Vec<String>,
    /// Row-major coefficients; `None` marks an undefined cell.
    pub coefficients: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient between variables `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.coefficients.get(i)?.get(j).copied().flatten()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// True when no variable made it into the matrix.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// One strong correlation between two distinct variables.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationPair {
    pub variable_1: String,
    pub variable_2: String,
    pub coefficient: f64,
}

/// Intersects an allow-list with the columns a table actually has,
/// preserving the allow-list order.
pub fn select_present_columns<'a>(df: &DataFrame, allow_list: &[&'a str]) -> Vec<&'a str> {
    let present = df.get_column_names_str();
    allow_list
        .iter()
        .filter(|name| present.contains(*name))
        .copied()
        .collect()
}

/// Computes the Pearson matrix over the given columns of a table.
pub fn compute_correlation_matrix(df: &DataFrame, columns: &[&str]) -> Result<CorrelationMatrix> {
    let mut series: Vec<Vec<Option<f64>>> = Vec::with_capacity(columns.len());
    for name in columns {
        let coerced = coerce_numeric(df.column(name)?.as_materialized_series())?;
        series.push(coerced.f64()?.into_iter().collect());
    }

    let n = columns.len();
    let mut coefficients = vec![vec![None; n]; n];
    for i in 0..n {
        for j in i..n {
            let coefficient = pearson(&series[i], &series[j]);
            coefficients[i][j] = coefficient;
            coefficients[j][i] = coefficient;
        }
    }

    Ok(CorrelationMatrix {
        variables: columns.iter().map(|name| name.to_string()).collect(),
        coefficients,
    })
}

/// Pearson coefficient over the pairwise-complete rows of two columns.
///
/// Returns `None` when fewer than two complete pairs exist or either
/// side has zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .filter_map(|(&a, &b)| match (a, b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        })
        .collect();
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator == 0.0 {
        return None;
    }
    Some((covariance / denominator).clamp(-1.0, 1.0))
}

/// Extracts the pairs with |coefficient| at or above the threshold,
/// strongest first. Each unordered pair appears once and a variable is
/// never paired with itself.
pub fn strong_pairs(matrix: &CorrelationMatrix, threshold: f64) -> Vec<CorrelationPair> {
    let mut pairs: Vec<CorrelationPair> = Vec::new();
    for i in 0..matrix.len() {
        for j in (i + 1)..matrix.len() {
            if let Some(coefficient) = matrix.get(i, j) {
                if coefficient.abs() >= threshold {
                    pairs.push(CorrelationPair {
                        variable_1: matrix.variables[i].clone(),
                        variable_2: matrix.variables[j].clone(),
                        coefficient,
                    });
                }
            }
        }
    }
    pairs.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pairs
}

/// Non-null counts per column, in column order. Diagnostic output.
pub fn non_null_counts(df: &DataFrame, columns: &[&str]) -> Result<Vec<(String, usize)>> {
    let mut counts = Vec::with_capacity(columns.len());
    for name in columns {
        let column = df.column(name)?;
        counts.push((name.to_string(), column.len() - column.null_count()));
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("x".into(), &[1.0f64, 2.0, 3.0, 4.0]),
            Column::new("y".into(), &[2.0f64, 4.0, 6.0, 8.0]),
            Column::new("inverse".into(), &[4.0f64, 3.0, 2.0, 1.0]),
            Column::new("noise".into(), &[1.0f64, -1.0, 1.0, -1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_perfect_pair_is_strong() {
        let df = frame();
        let matrix = compute_correlation_matrix(&df, &["x", "y"]).unwrap();
        assert!((matrix.get(0, 1).unwrap() - 1.0).abs() < 1e-12);

        let pairs = strong_pairs(&matrix, 0.5);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].variable_1, "x");
        assert_eq!(pairs[0].variable_2, "y");
        assert!((pairs[0].coefficient - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_self_pairs() {
        let df = frame();
        let matrix = compute_correlation_matrix(&df, &["x", "y", "inverse"]).unwrap();
        let pairs = strong_pairs(&matrix, 0.0);
        for pair in &pairs {
            assert_ne!(pair.variable_1, pair.variable_2);
        }
        // Three variables, three unordered pairs
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_tied_coefficients_both_survive() {
        // x~y and x~inverse tie at |1.0|; both pairs must be reported
        let df = frame();
        let matrix = compute_correlation_matrix(&df, &["x", "y", "inverse"]).unwrap();
        let pairs = strong_pairs(&matrix, 0.5);
        assert_eq!(pairs.len(), 3);
        assert!((pairs[2].coefficient - -1.0).abs() < 1e-12 || (pairs[2].coefficient - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_pairwise_complete() {
        let x = vec![Some(1.0), Some(2.0), None, Some(4.0)];
        let y = vec![Some(2.0), Some(4.0), Some(100.0), Some(8.0)];
        // The third row is ignored entirely
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
        let constant = vec![Some(3.0), Some(3.0), Some(3.0)];
        let varying = vec![Some(1.0), Some(2.0), Some(3.0)];
        assert_eq!(pearson(&constant, &varying), None);
    }

    #[test]
    fn test_sorted_by_absolute_value() {
        let df = DataFrame::new(vec![
            Column::new("a".into(), &[1.0f64, 2.0, 3.0, 4.0]),
            Column::new("b".into(), &[1.0f64, 2.1, 2.9, 4.2]),
            Column::new("c".into(), &[-1.0f64, -2.0, -3.0, -4.0]),
        ])
        .unwrap();
        let matrix = compute_correlation_matrix(&df, &["a", "b", "c"]).unwrap();
        let pairs = strong_pairs(&matrix, 0.5);
        for window in pairs.windows(2) {
            assert!(window[0].coefficient.abs() >= window[1].coefficient.abs());
        }
    }

    #[test]
    fn test_select_present_columns() {
        let df = frame();
        let selected = select_present_columns(&df, &["y", "missing", "x"]);
        assert_eq!(selected, vec!["y", "x"]);
    }

    #[test]
    fn test_non_null_counts() {
        let df = DataFrame::new(vec![Column::new(
            "x".into(),
            &[Some(1.0f64), None, Some(3.0)],
        )])
        .unwrap();
        let counts = non_null_counts(&df, &["x"]).unwrap();
        assert_eq!(counts, vec![("x".to_string(), 2)]);
    }
}
