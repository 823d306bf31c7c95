//! Correlation of study and support factors with the final grade

use polars::prelude::*;

use super::{AxisValues, ChartKind, ChartSpec, Orientation, Trace};
use crate::pipeline::{correlations_with, PipelineResult, G3};

/// Predictors correlated against the final grade
pub const IMPACT_FACTORS: [&str; 8] = [
    "studytime",
    "absences",
    "failures",
    "schoolsup",
    "famsup",
    "paid",
    "activities",
    "internet",
];

pub const IMPACT_FACTORS_TITLE: &str = "Impact Factors on Final Grade";

/// Horizontal bar chart of each factor's correlation with G3, ascending
pub fn impact_factors(df: &DataFrame) -> PipelineResult<ChartSpec> {
    let correlations = correlations_with(df, G3, &IMPACT_FACTORS)?;

    let (factors, coefficients): (Vec<String>, Vec<f64>) = correlations
        .into_iter()
        .map(|c| (c.factor, c.correlation))
        .unzip();

    Ok(ChartSpec {
        kind: ChartKind::Bar,
        title: IMPACT_FACTORS_TITLE.to_string(),
        orientation: Orientation::Horizontal,
        x_field: "correlation".to_string(),
        y_field: Some("factor".to_string()),
        color_by: None,
        bins: None,
        traces: vec![Trace {
            name: None,
            x: AxisValues::Numbers(coefficients),
            y: Some(AxisValues::Labels(factors)),
        }],
    })
}
