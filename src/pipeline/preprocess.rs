//! Feature preprocessing: binary encoding, derived metrics and standardization
//!
//! Every stage takes a table by reference and returns a new one; the input
//! is never modified.

use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, PipelineResult};
use super::schema::*;

/// Fixed translation of textual survey codes to 0/1
pub const BINARY_MAPPING: [(&str, i32); 10] = [
    ("yes", 1),
    ("no", 0),
    ("U", 1),
    ("R", 0),
    ("LE3", 0),
    ("GT3", 1),
    ("T", 1),
    ("A", 0),
    ("F", 0),
    ("M", 1),
];

/// Columns that receive the binary mapping
pub const BINARY_COLUMNS: [&str; 12] = [
    "schoolsup",
    "famsup",
    "paid",
    "activities",
    "nursery",
    "higher",
    "internet",
    "romantic",
    "address",
    "famsize",
    "Pstatus",
    "sex",
];

/// Columns rescaled to zero mean and unit variance
pub const NORMALIZED_COLUMNS: [&str; 9] = [
    "age",
    "absences",
    G1,
    G2,
    G3,
    AVERAGE_GRADE,
    GRADE_IMPROVEMENT,
    GRADE_VOLATILITY,
    STUDY_EFFICIENCY,
];

/// Mean and standard deviation fit for one standardized column.
///
/// These are relative to the table they were fit on; two runs over different
/// slices of data produce different scalings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnScaling {
    pub column: String,
    pub mean: f64,
    /// Population standard deviation (ddof = 0)
    pub std: f64,
}

impl ColumnScaling {
    /// Fit over the non-null values of a column
    pub fn fit(column: &str, values: &[Option<f64>]) -> Self {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            return Self {
                column: column.to_string(),
                mean: f64::NAN,
                std: f64::NAN,
            };
        }

        let n = present.len() as f64;
        let mean = present.iter().sum::<f64>() / n;
        let variance = present.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;

        Self {
            column: column.to_string(),
            mean,
            std: variance.sqrt(),
        }
    }

    /// Standardize a single value. Zero-variance columns are only centered.
    pub fn apply(&self, value: f64) -> f64 {
        let scale = if self.std > 0.0 { self.std } else { 1.0 };
        (value - self.mean) / scale
    }
}

/// Output of the full preprocessing pass
#[derive(Debug, Clone)]
pub struct PreparedData {
    /// Encoded table with derived features, before standardization
    pub derived: DataFrame,
    /// Prepared table: `derived` with the normalized columns rescaled
    pub prepared: DataFrame,
    /// Scaling fit for each normalized column, in `NORMALIZED_COLUMNS` order
    pub scaling: Vec<ColumnScaling>,
}

/// Run binary encoding, feature derivation and standardization
pub fn preprocess(merged: &DataFrame) -> PipelineResult<PreparedData> {
    let encoded = encode_binary_columns(merged)?;
    let derived = add_derived_features(&encoded)?;
    let (prepared, scaling) = standardize_columns(&derived, &NORMALIZED_COLUMNS)?;

    Ok(PreparedData {
        derived,
        prepared,
        scaling,
    })
}

fn lookup_code(value: &str) -> Option<i32> {
    BINARY_MAPPING
        .iter()
        .find(|(code, _)| *code == value)
        .map(|(_, mapped)| *mapped)
}

/// Replace each binary column with its 0/1 encoding (Int32).
///
/// Numeric columns already holding only 0/1 pass through, so encoding an
/// encoded table changes nothing. Nulls stay null. Any other value is an
/// `UnmappedValue` error.
pub fn encode_binary_columns(df: &DataFrame) -> PipelineResult<DataFrame> {
    let mut out = df.clone();
    for name in BINARY_COLUMNS {
        let encoded = encode_binary_column(df, name)?;
        out.with_column(Column::new(name.into(), encoded))?;
    }
    Ok(out)
}

fn encode_binary_column(df: &DataFrame, name: &str) -> PipelineResult<Vec<Option<i32>>> {
    let unmapped = |row: usize, value: String| PipelineError::UnmappedValue {
        column: name.to_string(),
        row,
        value,
    };

    if require_column(df, name)?.dtype().is_primitive_numeric() {
        float_values(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                None => Ok(None),
                Some(x) if x == 0.0 => Ok(Some(0)),
                Some(x) if x == 1.0 => Ok(Some(1)),
                Some(x) => Err(unmapped(row, x.to_string())),
            })
            .collect()
    } else {
        string_values(df, name)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| match value {
                None => Ok(None),
                Some(code) => lookup_code(&code)
                    .map(Some)
                    .ok_or_else(|| unmapped(row, code)),
            })
            .collect()
    }
}

/// Sample standard deviation (n - 1) of the three period grades
fn grade_volatility(grades: &[f64; 3]) -> f64 {
    let mean = grades.iter().sum::<f64>() / 3.0;
    let sum_sq: f64 = grades.iter().map(|g| (g - mean) * (g - mean)).sum();
    (sum_sq / 2.0).sqrt()
}

fn pair_mean(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some((a? + b?) / 2.0)
}

/// Add the six derived metric columns (Float64).
///
/// A null input yields a null output for that row. A zero study time is
/// rejected with `ZeroStudyTime` rather than producing a non-finite ratio.
pub fn add_derived_features(df: &DataFrame) -> PipelineResult<DataFrame> {
    let g1 = float_values(df, G1)?;
    let g2 = float_values(df, G2)?;
    let g3 = float_values(df, G3)?;
    let study_time = float_values(df, STUDY_TIME)?;
    let dalc = float_values(df, WEEKDAY_ALCOHOL)?;
    let walc = float_values(df, WEEKEND_ALCOHOL)?;
    let medu = float_values(df, MOTHER_EDUCATION)?;
    let fedu = float_values(df, FATHER_EDUCATION)?;

    let n = df.height();
    let mut average = Vec::with_capacity(n);
    let mut improvement = Vec::with_capacity(n);
    let mut volatility = Vec::with_capacity(n);
    let mut efficiency = Vec::with_capacity(n);
    let mut alcohol = Vec::with_capacity(n);
    let mut parent = Vec::with_capacity(n);

    for row in 0..n {
        let grades = match (g1[row], g2[row], g3[row]) {
            (Some(a), Some(b), Some(c)) => Some([a, b, c]),
            _ => None,
        };
        let avg = grades.map(|g| (g[0] + g[1] + g[2]) / 3.0);

        average.push(avg);
        improvement.push(grades.map(|g| g[2] - g[0]));
        volatility.push(grades.as_ref().map(grade_volatility));
        efficiency.push(match (avg, study_time[row]) {
            (Some(_), Some(t)) if t == 0.0 => return Err(PipelineError::ZeroStudyTime { row }),
            (Some(a), Some(t)) => Some(a / t),
            _ => None,
        });
        alcohol.push(pair_mean(dalc[row], walc[row]));
        parent.push(pair_mean(medu[row], fedu[row]));
    }

    let mut out = df.clone();
    out.with_column(Column::new(AVERAGE_GRADE.into(), average))?;
    out.with_column(Column::new(GRADE_IMPROVEMENT.into(), improvement))?;
    out.with_column(Column::new(GRADE_VOLATILITY.into(), volatility))?;
    out.with_column(Column::new(STUDY_EFFICIENCY.into(), efficiency))?;
    out.with_column(Column::new(ALCOHOL_CONSUMPTION.into(), alcohol))?;
    out.with_column(Column::new(PARENT_EDUCATION.into(), parent))?;

    Ok(out)
}

/// Standardize `columns` in place using statistics from this table only.
///
/// Returns the rescaled table and the scaling fit for each column.
pub fn standardize_columns(
    df: &DataFrame,
    columns: &[&str],
) -> PipelineResult<(DataFrame, Vec<ColumnScaling>)> {
    let extracted = columns
        .iter()
        .map(|name| Ok((*name, float_values(df, name)?)))
        .collect::<PipelineResult<Vec<_>>>()?;

    let scaled: Vec<(ColumnScaling, Vec<Option<f64>>)> = extracted
        .par_iter()
        .map(|(name, values)| {
            let scaling = ColumnScaling::fit(name, values);
            let rescaled = values
                .iter()
                .map(|v| v.map(|x| scaling.apply(x)))
                .collect();
            (scaling, rescaled)
        })
        .collect();

    let mut out = df.clone();
    let mut scalings = Vec::with_capacity(scaled.len());
    for (scaling, values) in scaled {
        out.with_column(Column::new(scaling.column.as_str().into(), values))?;
        scalings.push(scaling);
    }

    Ok((out, scalings))
}
