//! Dataset loader for the two subject CSV files

use std::fmt;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::Serialize;

use super::error::{PipelineError, PipelineResult};
use super::schema::{string_values, NUMERIC_COLUMNS, SUBJECT_COLUMN};

/// Default directory holding both subject files
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MATH_FILE: &str = "student-mat.csv";
pub const DEFAULT_PORTUGUESE_FILE: &str = "student-por.csv";

/// Field separator used by both source files
const SEPARATOR: u8 = b';';

/// Source course of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Portuguese,
}

impl Subject {
    pub const ALL: [Subject; 2] = [Subject::Math, Subject::Portuguese];

    /// Literal tag written to the `subject` column
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Portuguese => "portuguese",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Locations of the two subject files
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetPaths {
    pub math: PathBuf,
    pub portuguese: PathBuf,
}

impl DatasetPaths {
    /// Both files under `data_dir` with their conventional names
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            math: data_dir.join(DEFAULT_MATH_FILE),
            portuguese: data_dir.join(DEFAULT_PORTUGUESE_FILE),
        }
    }

    pub fn path_for(&self, subject: Subject) -> &Path {
        match subject {
            Subject::Math => &self.math,
            Subject::Portuguese => &self.portuguese,
        }
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(DEFAULT_DATA_DIR))
    }
}

/// Row counts per subject in a merged table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubjectCounts {
    pub math: usize,
    pub portuguese: usize,
}

impl SubjectCounts {
    pub fn total(&self) -> usize {
        self.math + self.portuguese
    }
}

/// Load one subject file and tag every row with its subject label.
///
/// Fails with `DatasetNotFound` when the file is absent and with
/// `DatasetParse` when it is not `;`-delimited tabular data.
pub fn load_subject(path: &Path, subject: Subject) -> PipelineResult<DataFrame> {
    if !path.is_file() {
        return Err(PipelineError::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = LazyCsvReader::new(path)
        .with_separator(SEPARATOR)
        .with_has_header(true)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| PipelineError::parse(path, e))?;

    // A comma-separated file parses as a single column under ';'
    if df.width() < 2 {
        return Err(PipelineError::parse(
            path,
            format!(
                "expected ';'-delimited columns, found {} column(s)",
                df.width()
            ),
        ));
    }

    check_numeric_columns(&df, path)?;

    let tagged = df
        .lazy()
        .with_column(lit(subject.label()).alias(SUBJECT_COLUMN))
        .collect()?;

    Ok(tagged)
}

/// Reject numeric survey columns that were read as text.
///
/// The reader falls back to strings when any cell fails to parse, so a
/// single bad grade would otherwise turn into a null later on.
fn check_numeric_columns(df: &DataFrame, path: &Path) -> PipelineResult<()> {
    for name in NUMERIC_COLUMNS {
        let Ok(column) = df.column(name) else {
            continue;
        };
        if column.dtype() != &DataType::String {
            continue;
        }

        let bad_cell = column
            .str()?
            .into_iter()
            .enumerate()
            .find_map(|(row, value)| {
                value
                    .filter(|v| v.trim().parse::<f64>().is_err())
                    .map(|v| (row, v.to_string()))
            });

        if let Some((row, value)) = bad_cell {
            return Err(PipelineError::parse(
                path,
                format!("non-numeric value '{}' in column '{}' at row {}", value, name, row),
            ));
        }
    }
    Ok(())
}

/// Load both subject files and concatenate them into the merged table.
///
/// Math rows come first, then Portuguese rows, each in file order. Columns
/// present in only one source are kept and filled with nulls for the other.
/// Nothing is returned unless both files load.
pub fn load_and_merge(paths: &DatasetPaths) -> PipelineResult<DataFrame> {
    let math = load_subject(paths.path_for(Subject::Math), Subject::Math)?;
    let portuguese = load_subject(paths.path_for(Subject::Portuguese), Subject::Portuguese)?;

    let merged = concat_lf_diagonal(
        [math.lazy(), portuguese.lazy()],
        UnionArgs {
            to_supertypes: true,
            ..Default::default()
        },
    )?
    .collect()?;

    Ok(merged)
}

/// Count rows per subject tag
pub fn count_subjects(df: &DataFrame) -> PipelineResult<SubjectCounts> {
    let mut counts = SubjectCounts::default();
    for tag in string_values(df, SUBJECT_COLUMN)?.iter().flatten() {
        if tag == Subject::Math.label() {
            counts.math += 1;
        } else if tag == Subject::Portuguese.label() {
            counts.portuguese += 1;
        }
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = DatasetPaths::default();
        assert_eq!(paths.math, PathBuf::from("data/student-mat.csv"));
        assert_eq!(paths.portuguese, PathBuf::from("data/student-por.csv"));
    }

    #[test]
    fn test_subject_labels() {
        assert_eq!(Subject::Math.label(), "math");
        assert_eq!(Subject::Portuguese.to_string(), "portuguese");
    }

    #[test]
    fn test_count_subjects() {
        let df = df! {
            "subject" => ["math", "math", "portuguese"],
        }
        .unwrap();

        let counts = count_subjects(&df).unwrap();
        assert_eq!(counts.math, 2);
        assert_eq!(counts.portuguese, 1);
        assert_eq!(counts.total(), 3);
    }
}
