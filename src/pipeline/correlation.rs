//! Pearson correlation of predictor columns against a target column

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::PipelineResult;
use super::schema::float_values;

/// Correlation of one predictor with the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorCorrelation {
    pub factor: String,
    /// NaN when undefined (constant column or no complete pairs)
    pub correlation: f64,
}

/// Pearson correlation over pairwise-complete observations.
///
/// Uses a single-pass Welford update for numerical stability. Returns `None`
/// when fewer than two complete pairs exist or either side has zero variance.
pub fn pearson_correlation(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    if xs.len() != ys.len() {
        return None;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in xs.iter().zip(ys.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            n += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if n < 2.0 || var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov_xy / (var_x.sqrt() * var_y.sqrt()))
}

/// Correlate each factor with `target`, sorted ascending by coefficient.
///
/// Undefined correlations are reported as NaN and sort last. Any missing
/// column fails the whole computation.
pub fn correlations_with(
    df: &DataFrame,
    target: &str,
    factors: &[&str],
) -> PipelineResult<Vec<FactorCorrelation>> {
    let target_values = float_values(df, target)?;
    let factor_values = factors
        .iter()
        .map(|name| Ok((*name, float_values(df, name)?)))
        .collect::<PipelineResult<Vec<_>>>()?;

    let mut correlations: Vec<FactorCorrelation> = factor_values
        .par_iter()
        .map(|(name, values)| FactorCorrelation {
            factor: name.to_string(),
            correlation: pearson_correlation(values, &target_values).unwrap_or(f64::NAN),
        })
        .collect();

    correlations.sort_by(|a, b| match (a.correlation.is_nan(), b.correlation.is_nan()) {
        (false, false) => a.correlation.total_cmp(&b.correlation),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    });

    Ok(correlations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_perfect_positive_and_negative() {
        let x = some(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let up = some(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        let down = some(&[10.0, 8.0, 6.0, 4.0, 2.0]);

        assert!((pearson_correlation(&x, &up).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&x, &down).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_is_undefined() {
        let x = some(&[1.0, 1.0, 1.0]);
        let y = some(&[1.0, 2.0, 3.0]);
        assert!(pearson_correlation(&x, &y).is_none());
    }

    #[test]
    fn test_skips_incomplete_pairs() {
        let x = vec![Some(1.0), None, Some(2.0), Some(3.0)];
        let y = vec![Some(1.0), Some(100.0), Some(2.0), Some(3.0)];
        assert!((pearson_correlation(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlations_sorted_ascending_nan_last() {
        let df = df! {
            "target" => [1.0f64, 2.0, 3.0, 4.0],
            "pos" => [1.0f64, 2.0, 3.0, 5.0],
            "neg" => [4.0f64, 3.0, 2.0, 1.0],
            "flat" => [7.0f64, 7.0, 7.0, 7.0],
            "weak" => [1.0f64, 3.0, 2.0, 2.5],
        }
        .unwrap();

        let result = correlations_with(&df, "target", &["flat", "pos", "weak", "neg"]).unwrap();
        let names: Vec<&str> = result.iter().map(|c| c.factor.as_str()).collect();

        assert_eq!(names, vec!["neg", "weak", "pos", "flat"]);
        assert!(result[3].correlation.is_nan());
    }
}
