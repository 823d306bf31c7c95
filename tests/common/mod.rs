//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::Path;

use student360::pipeline::{DatasetPaths, PipelineConfig};
use tempfile::TempDir;

pub const HEADER: &str = "school;sex;age;address;famsize;Pstatus;Medu;Fedu;Mjob;Fjob;reason;guardian;traveltime;studytime;failures;schoolsup;famsup;paid;activities;nursery;higher;internet;romantic;famrel;freetime;goout;Dalc;Walc;health;absences;G1;G2;G3";

/// One record of the student survey schema with the fields tests vary
#[derive(Debug, Clone)]
pub struct StudentRow {
    pub sex: &'static str,
    pub age: u32,
    pub address: &'static str,
    pub studytime: u32,
    pub failures: u32,
    pub schoolsup: &'static str,
    pub internet: &'static str,
    pub absences: u32,
    pub grades: [u32; 3],
}

impl StudentRow {
    /// A row with every period grade equal to `grade`
    pub fn uniform(grade: u32) -> Self {
        Self {
            sex: "F",
            age: 17,
            address: "U",
            studytime: 2,
            failures: 0,
            schoolsup: "no",
            internet: "yes",
            absences: 4,
            grades: [grade; 3],
        }
    }

    pub fn with_grades(mut self, g1: u32, g2: u32, g3: u32) -> Self {
        self.grades = [g1, g2, g3];
        self
    }

    pub fn to_csv_line(&self) -> String {
        format!(
            "\"GP\";\"{}\";{};\"{}\";\"GT3\";\"T\";3;2;\"other\";\"services\";\"course\";\"mother\";1;{};{};\"{}\";\"yes\";\"no\";\"yes\";\"yes\";\"yes\";\"{}\";\"no\";4;3;2;1;2;3;{};{};{};{}",
            self.sex,
            self.age,
            self.address,
            self.studytime,
            self.failures,
            self.schoolsup,
            self.internet,
            self.absences,
            self.grades[0],
            self.grades[1],
            self.grades[2],
        )
    }
}

/// A small, varied set of rows so every standardized column has variance
pub fn varied_rows(offset: u32) -> Vec<StudentRow> {
    (0..6)
        .map(|i| StudentRow {
            sex: if i % 2 == 0 { "F" } else { "M" },
            age: 15 + (i + offset) % 5,
            address: if i % 3 == 0 { "R" } else { "U" },
            studytime: 1 + (i + offset) % 4,
            failures: (i * 2 + offset) % 3,
            schoolsup: if i % 4 == 0 { "yes" } else { "no" },
            internet: if i % 5 == 0 { "no" } else { "yes" },
            absences: (i * 7 + offset) % 11,
            grades: [
                5 + (i * 3 + offset) % 12,
                6 + (i * 2 + offset) % 11,
                4 + (i * 5 + offset) % 15,
            ],
        })
        .collect()
}

/// Write a `;`-delimited subject file with the standard header
pub fn write_subject_csv(path: &Path, rows: &[StudentRow]) {
    let lines: Vec<String> = rows.iter().map(StudentRow::to_csv_line).collect();
    write_subject_lines(path, &lines);
}

/// Write pre-formatted data lines under the standard header
pub fn write_subject_lines(path: &Path, lines: &[String]) {
    let mut content = String::from(HEADER);
    content.push('\n');
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    std::fs::write(path, content).unwrap();
}

/// A row whose final grade field is replaced with `g3`
pub fn line_with_final_grade(row: &StudentRow, g3: &str) -> String {
    let line = row.to_csv_line();
    let (head, _) = line.rsplit_once(';').unwrap();
    format!("{};{}", head, g3)
}

/// Create a temp data directory holding both subject files
pub fn create_dataset_dir(math: &[StudentRow], portuguese: &[StudentRow]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let paths = DatasetPaths::in_dir(temp_dir.path());
    write_subject_csv(&paths.math, math);
    write_subject_csv(&paths.portuguese, portuguese);
    temp_dir
}

/// Two math rows graded 10 and two Portuguese rows graded 5
pub fn create_scenario_dir() -> TempDir {
    create_dataset_dir(
        &[StudentRow::uniform(10), StudentRow::uniform(10)],
        &[StudentRow::uniform(5), StudentRow::uniform(5)],
    )
}

pub fn config_for(dir: &TempDir) -> PipelineConfig {
    PipelineConfig::for_dir(dir.path())
}

/// Population mean and standard deviation
pub fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
