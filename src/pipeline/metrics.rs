//! Summary performance metrics over a prepared table

use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, PipelineResult};
use super::schema::{float_values, G3, GRADE_IMPROVEMENT, PASS_GRADE};

/// Headline metrics shown on the dashboard overview
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Mean final grade (G3)
    pub average_grade: f64,
    /// Percentage of rows with G3 >= 10
    pub pass_rate: f64,
    /// Percentage of rows with a positive grade improvement
    pub improvement_rate: f64,
}

impl PerformanceMetrics {
    /// Plain-text lines rendered by the presentation layer
    pub fn display_lines(&self) -> [String; 3] {
        [
            format!("Average Grade: {:.2}", self.average_grade),
            format!("Pass Rate: {:.1}%", self.pass_rate),
            format!("Improvement Rate: {:.1}%", self.improvement_rate),
        ]
    }
}

/// Which table the descriptive outputs are computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsBasis {
    /// The standardized prepared table. Grades are z-scores here, so the
    /// average is near 0 and the pass threshold compares against a z-score.
    #[default]
    Prepared,
    /// The derived table before standardization, on the 0-20 grade scale
    Raw,
}

impl fmt::Display for MetricsBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsBasis::Prepared => write!(f, "prepared"),
            MetricsBasis::Raw => write!(f, "raw"),
        }
    }
}

impl FromStr for MetricsBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prepared" => Ok(MetricsBasis::Prepared),
            "raw" => Ok(MetricsBasis::Raw),
            _ => Err(format!(
                "Unknown metrics basis: '{}'. Use 'prepared' or 'raw'.",
                s
            )),
        }
    }
}

fn percentage(hits: usize, total: usize) -> f64 {
    hits as f64 / total as f64 * 100.0
}

/// Compute mean final grade, pass rate and improvement rate.
///
/// Rates are taken over all rows; a null grade counts as neither passing
/// nor improving. The mean skips nulls.
pub fn calculate_performance_metrics(df: &DataFrame) -> PipelineResult<PerformanceMetrics> {
    let final_grades = float_values(df, G3)?;
    let improvements = float_values(df, GRADE_IMPROVEMENT)?;

    let rows = df.height();
    if rows == 0 {
        return Err(PipelineError::EmptyDataset("performance metrics"));
    }

    let present: Vec<f64> = final_grades.iter().flatten().copied().collect();
    if present.is_empty() {
        return Err(PipelineError::EmptyDataset("average grade"));
    }
    let average_grade = present.iter().sum::<f64>() / present.len() as f64;

    let passing = present.iter().filter(|g| **g >= PASS_GRADE).count();
    let improving = improvements.iter().flatten().filter(|d| **d > 0.0).count();

    Ok(PerformanceMetrics {
        average_grade,
        pass_rate: percentage(passing, rows),
        improvement_rate: percentage(improving, rows),
    })
}
