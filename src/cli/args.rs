//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::{
    DatasetPaths, MetricsBasis, PipelineConfig, DEFAULT_DATA_DIR, DEFAULT_MATH_FILE,
    DEFAULT_PORTUGUESE_FILE,
};

/// Student360 - merge the math and Portuguese student datasets, derive
/// features and report performance metrics and charts
#[derive(Parser, Debug)]
#[command(name = "student360")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing both subject files
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Math course file name, relative to the data directory
    #[arg(long, default_value = DEFAULT_MATH_FILE)]
    pub math_file: PathBuf,

    /// Portuguese course file name, relative to the data directory
    #[arg(long, default_value = DEFAULT_PORTUGUESE_FILE)]
    pub portuguese_file: PathBuf,

    /// Table the metrics and descriptive charts are computed from.
    /// Options: "prepared" (standardized grades, default) or "raw" (0-20 scale)
    #[arg(long, default_value = "prepared")]
    pub metrics_basis: MetricsBasis,

    /// Write metrics, scaling and chart specifications to this JSON file
    #[arg(short = 'o', long)]
    pub export: Option<PathBuf>,

    /// Write the tabbed HTML dashboard to this file
    #[arg(long)]
    pub dashboard: Option<PathBuf>,

    /// Keep running and re-render the dashboard whenever an input file changes.
    /// Requires --dashboard.
    #[arg(long, default_value = "false", requires = "dashboard")]
    pub watch: bool,

    /// Seconds between input checks in watch mode
    #[arg(long, default_value = "2", value_parser = validate_interval)]
    pub interval: u64,
}

impl Cli {
    /// Pipeline configuration from the parsed arguments
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            paths: DatasetPaths {
                math: self.data_dir.join(&self.math_file),
                portuguese: self.data_dir.join(&self.portuguese_file),
            },
            basis: self.metrics_basis,
        }
    }
}

/// Validator for the watch interval
fn validate_interval(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of seconds", s))?;

    if value == 0 {
        Err("interval must be at least 1 second".to_string())
    } else {
        Ok(value)
    }
}
