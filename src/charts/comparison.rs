//! Per-subject mean grade across the three grading periods

use polars::prelude::*;

use super::{AxisValues, ChartKind, ChartSpec, Orientation, Trace};
use crate::pipeline::{float_values, string_values, PipelineResult, Subject, G1, G2, G3, SUBJECT_COLUMN};

pub const SUBJECT_COMPARISON_TITLE: &str = "Subject Performance Comparison";

const PERIODS: [&str; 3] = [G1, G2, G3];

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Line chart of mean G1, G2, G3 with one line per subject.
///
/// Subjects with no rows in the table get no line.
pub fn subject_comparison(df: &DataFrame) -> PipelineResult<ChartSpec> {
    let subjects = string_values(df, SUBJECT_COLUMN)?;
    let periods = PERIODS
        .iter()
        .map(|name| float_values(df, name))
        .collect::<PipelineResult<Vec<_>>>()?;

    let mut traces = Vec::new();
    for subject in Subject::ALL {
        let rows: Vec<usize> = subjects
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.as_deref() == Some(subject.label()))
            .map(|(row, _)| row)
            .collect();
        if rows.is_empty() {
            continue;
        }

        let means = periods
            .iter()
            .map(|values| mean(rows.iter().filter_map(|&row| values[row])))
            .collect();

        traces.push(Trace {
            name: Some(subject.label().to_string()),
            x: AxisValues::Labels(PERIODS.iter().map(|p| p.to_string()).collect()),
            y: Some(AxisValues::Numbers(means)),
        });
    }

    Ok(ChartSpec {
        kind: ChartKind::Line,
        title: SUBJECT_COMPARISON_TITLE.to_string(),
        orientation: Orientation::Vertical,
        x_field: "period".to_string(),
        y_field: Some("mean grade".to_string()),
        color_by: Some(SUBJECT_COLUMN.to_string()),
        bins: None,
        traces,
    })
}
