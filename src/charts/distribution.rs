//! Final grade histogram grouped by subject

use polars::prelude::*;

use super::{AxisValues, ChartKind, ChartSpec, Orientation, Trace};
use crate::pipeline::{float_values, string_values, PipelineResult, Subject, G3, SUBJECT_COLUMN};

/// Number of histogram bins
pub const GRADE_DISTRIBUTION_BINS: usize = 20;

pub const GRADE_DISTRIBUTION_TITLE: &str = "Grade Distribution by Subject";

/// Histogram of final grades with one trace per subject
pub fn grade_distribution(df: &DataFrame) -> PipelineResult<ChartSpec> {
    let grades = float_values(df, G3)?;
    let subjects = string_values(df, SUBJECT_COLUMN)?;

    let traces = Subject::ALL
        .iter()
        .map(|subject| {
            let values: Vec<f64> = grades
                .iter()
                .zip(subjects.iter())
                .filter(|(_, tag)| tag.as_deref() == Some(subject.label()))
                .filter_map(|(grade, _)| *grade)
                .collect();
            Trace {
                name: Some(subject.label().to_string()),
                x: AxisValues::Numbers(values),
                y: None,
            }
        })
        .collect();

    Ok(ChartSpec {
        kind: ChartKind::Histogram,
        title: GRADE_DISTRIBUTION_TITLE.to_string(),
        orientation: Orientation::Vertical,
        x_field: G3.to_string(),
        y_field: None,
        color_by: Some(SUBJECT_COLUMN.to_string()),
        bins: Some(GRADE_DISTRIBUTION_BINS),
        traces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineError;

    #[test]
    fn test_traces_split_by_subject() {
        let df = df! {
            "G3" => [Some(10.0f64), Some(12.0), Some(5.0), None],
            "subject" => ["math", "math", "portuguese", "portuguese"],
        }
        .unwrap();

        let spec = grade_distribution(&df).unwrap();

        assert_eq!(spec.kind, ChartKind::Histogram);
        assert_eq!(spec.bins, Some(20));
        assert_eq!(spec.color_by.as_deref(), Some("subject"));
        assert_eq!(spec.traces.len(), 2);
        assert_eq!(spec.traces[0].name.as_deref(), Some("math"));
        assert_eq!(spec.traces[0].x, AxisValues::Numbers(vec![10.0, 12.0]));
        assert_eq!(spec.traces[1].x, AxisValues::Numbers(vec![5.0]));
    }

    #[test]
    fn test_missing_subject_column() {
        let df = df! { "G3" => [10.0f64] }.unwrap();

        assert!(matches!(
            grade_distribution(&df),
            Err(PipelineError::MissingColumn { .. })
        ));
    }
}
