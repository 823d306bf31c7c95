//! Integration tests for the dataset loader

use student360::pipeline::{
    count_subjects, float_values, load_and_merge, load_subject, run_pipeline, string_values,
    DatasetPaths, MetricsBasis, PipelineConfig, PipelineError, Subject,
};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::StudentRow;

#[test]
fn test_merged_row_count_is_sum_of_sources() {
    let dir = common::create_dataset_dir(&common::varied_rows(0), &common::varied_rows(3)[..4]);
    let paths = DatasetPaths::in_dir(dir.path());

    let merged = load_and_merge(&paths).unwrap();

    assert_eq!(merged.height(), 10, "6 math rows + 4 portuguese rows");
    let counts = count_subjects(&merged).unwrap();
    assert_eq!(counts.math, 6);
    assert_eq!(counts.portuguese, 4);
}

#[test]
fn test_every_row_has_one_subject_tag() {
    let dir = common::create_scenario_dir();
    let merged = load_and_merge(&DatasetPaths::in_dir(dir.path())).unwrap();

    let tags = string_values(&merged, "subject").unwrap();
    assert_eq!(
        tags,
        vec![
            Some("math".to_string()),
            Some("math".to_string()),
            Some("portuguese".to_string()),
            Some("portuguese".to_string()),
        ]
    );
}

#[test]
fn test_source_order_is_preserved() {
    let math = vec![
        StudentRow::uniform(10).with_grades(1, 1, 1),
        StudentRow::uniform(10).with_grades(2, 2, 2),
    ];
    let portuguese = vec![
        StudentRow::uniform(10).with_grades(3, 3, 3),
        StudentRow::uniform(10).with_grades(4, 4, 4),
    ];
    let dir = common::create_dataset_dir(&math, &portuguese);

    let merged = load_and_merge(&DatasetPaths::in_dir(dir.path())).unwrap();

    let g3 = float_values(&merged, "G3").unwrap();
    assert_eq!(g3, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]);
}

#[test]
fn test_missing_math_file() {
    let dir = TempDir::new().unwrap();
    let paths = DatasetPaths::in_dir(dir.path());
    common::write_subject_csv(&paths.portuguese, &[StudentRow::uniform(12)]);

    let err = load_and_merge(&paths).unwrap_err();

    match err {
        PipelineError::DatasetNotFound { path } => assert_eq!(path, paths.math),
        other => panic!("Expected DatasetNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_portuguese_file() {
    let dir = TempDir::new().unwrap();
    let paths = DatasetPaths::in_dir(dir.path());
    common::write_subject_csv(&paths.math, &[StudentRow::uniform(12)]);

    assert!(matches!(
        load_and_merge(&paths),
        Err(PipelineError::DatasetNotFound { .. })
    ));
}

#[test]
fn test_comma_delimited_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("student-mat.csv");
    std::fs::write(&path, "G1,G2,G3\n10,11,12\n").unwrap();

    let err = load_subject(&path, Subject::Math).unwrap_err();

    assert!(
        matches!(err, PipelineError::DatasetParse { .. }),
        "Expected DatasetParse, got {err:?}"
    );
    assert!(err.to_string().contains("student-mat.csv"));
}

#[test]
fn test_extra_fields_in_a_row_are_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("student-por.csv");
    let rows = [StudentRow::uniform(12), StudentRow::uniform(9)];
    let lines = vec![
        rows[0].to_csv_line(),
        format!("{};99", rows[1].to_csv_line()),
    ];
    common::write_subject_lines(&path, &lines);

    let err = load_subject(&path, Subject::Portuguese).unwrap_err();

    assert!(
        matches!(err, PipelineError::DatasetParse { .. }),
        "Expected DatasetParse, got {err:?}"
    );
}

#[test]
fn test_non_numeric_grade_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("student-por.csv");
    let lines = vec![
        StudentRow::uniform(5).to_csv_line(),
        common::line_with_final_grade(&StudentRow::uniform(5), "abc"),
    ];
    common::write_subject_lines(&path, &lines);

    let err = load_subject(&path, Subject::Portuguese).unwrap_err();

    match &err {
        PipelineError::DatasetParse { path: failed, message } => {
            assert_eq!(failed, &path);
            assert!(message.contains("'G3'"), "Message should name the column: {message}");
            assert!(message.contains("'abc'"), "Message should name the value: {message}");
            assert!(message.contains("row 1"), "Message should name the row: {message}");
        }
        other => panic!("Expected DatasetParse, got {other:?}"),
    }
}

#[test]
fn test_non_numeric_grade_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let paths = DatasetPaths::in_dir(dir.path());
    common::write_subject_csv(&paths.math, &[StudentRow::uniform(10), StudentRow::uniform(10)]);
    common::write_subject_lines(
        &paths.portuguese,
        &[
            StudentRow::uniform(5).to_csv_line(),
            common::line_with_final_grade(&StudentRow::uniform(5), "abc"),
        ],
    );
    let config = PipelineConfig {
        paths,
        basis: MetricsBasis::Raw,
    };

    let err = run_pipeline(&config).unwrap_err();

    assert!(
        matches!(err, PipelineError::DatasetParse { .. }),
        "A bad grade must not be averaged away, got {err:?}"
    );
}

#[test]
fn test_load_subject_tags_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("por.csv");
    common::write_subject_csv(&path, &common::varied_rows(1));

    let df = load_subject(&path, Subject::Portuguese).unwrap();

    assert_eq!(df.height(), 6);
    assert_eq!(df.width(), 34, "33 survey columns + subject");
    let tags = string_values(&df, "subject").unwrap();
    assert!(tags.iter().all(|t| t.as_deref() == Some("portuguese")));
}

#[test]
fn test_columns_from_either_source_are_kept() {
    let dir = TempDir::new().unwrap();
    let paths = DatasetPaths::in_dir(dir.path());
    std::fs::write(&paths.math, "G1;G2;G3;extra\n10;10;10;1\n").unwrap();
    std::fs::write(&paths.portuguese, "G1;G2;G3\n5;5;5\n").unwrap();

    let merged = load_and_merge(&paths).unwrap();

    assert_eq!(merged.height(), 2);
    let extra = float_values(&merged, "extra").unwrap();
    assert_eq!(extra, vec![Some(1.0), None]);
}
