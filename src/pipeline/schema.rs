//! Column names of the student survey schema and typed column access

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// Column added by the loader to tag each row with its source course
pub const SUBJECT_COLUMN: &str = "subject";

pub const G1: &str = "G1";
pub const G2: &str = "G2";
pub const G3: &str = "G3";
pub const STUDY_TIME: &str = "studytime";
pub const WEEKDAY_ALCOHOL: &str = "Dalc";
pub const WEEKEND_ALCOHOL: &str = "Walc";
pub const MOTHER_EDUCATION: &str = "Medu";
pub const FATHER_EDUCATION: &str = "Fedu";

pub const AVERAGE_GRADE: &str = "average_grade";
pub const GRADE_IMPROVEMENT: &str = "grade_improvement";
pub const GRADE_VOLATILITY: &str = "grade_volatility";
pub const STUDY_EFFICIENCY: &str = "study_efficiency";
pub const ALCOHOL_CONSUMPTION: &str = "alcohol_consumption";
pub const PARENT_EDUCATION: &str = "parent_education";

/// Survey columns that must hold numbers wherever a value is present
pub const NUMERIC_COLUMNS: [&str; 11] = [
    "age",
    MOTHER_EDUCATION,
    FATHER_EDUCATION,
    STUDY_TIME,
    "failures",
    WEEKDAY_ALCOHOL,
    WEEKEND_ALCOHOL,
    "absences",
    G1,
    G2,
    G3,
];

/// Final grade threshold for a passing student (grades are on a 0-20 scale)
pub const PASS_GRADE: f64 = 10.0;

/// Look up a column, reporting a schema mismatch as `MissingColumn`.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> PipelineResult<&'a Column> {
    df.column(name)
        .map_err(|_| PipelineError::missing_column(name))
}

/// Read a numeric column as `f64` values, nulls preserved.
///
/// The cast is strict: a value that does not convert is an error, never a
/// new null.
pub fn float_values(df: &DataFrame, name: &str) -> PipelineResult<Vec<Option<f64>>> {
    let column = require_column(df, name)?;
    let float_col = column.strict_cast(&DataType::Float64)?;
    Ok(float_col.f64()?.iter().collect())
}

/// Read a column as owned strings, nulls preserved.
pub fn string_values(df: &DataFrame, name: &str) -> PipelineResult<Vec<Option<String>>> {
    let column = require_column(df, name)?;
    let string_col = column.cast(&DataType::String)?;
    Ok(string_col
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_values_casts_integers() {
        let df = df! {
            "G3" => [Some(10i64), None, Some(5)],
        }
        .unwrap();

        let values = float_values(&df, "G3").unwrap();
        assert_eq!(values, vec![Some(10.0), None, Some(5.0)]);
    }

    #[test]
    fn test_float_values_rejects_text() {
        let df = df! {
            "G3" => ["10", "abc"],
        }
        .unwrap();

        assert!(float_values(&df, "G3").is_err());
    }

    #[test]
    fn test_require_column_reports_missing() {
        let df = df! { "a" => [1i32] }.unwrap();

        let err = require_column(&df, "G3").unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { ref column } if column == "G3"));
    }
}
