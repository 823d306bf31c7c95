//! Pipeline entry point: load, prepare, then summarize into metrics and charts

use std::path::Path;

use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineResult;
use super::loader::{count_subjects, load_and_merge, DatasetPaths, SubjectCounts};
use super::metrics::{calculate_performance_metrics, MetricsBasis, PerformanceMetrics};
use super::preprocess::{preprocess, ColumnScaling, PreparedData};
use crate::charts::{grade_distribution, impact_factors, subject_comparison, ChartSpec};

/// Inputs of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PipelineConfig {
    pub paths: DatasetPaths,
    pub basis: MetricsBasis,
}

impl PipelineConfig {
    /// Conventional file names under `data_dir`, default basis
    pub fn for_dir(data_dir: &Path) -> Self {
        Self {
            paths: DatasetPaths::in_dir(data_dir),
            basis: MetricsBasis::default(),
        }
    }
}

/// The three charts shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub grade_distribution: ChartSpec,
    pub impact_factors: ChartSpec,
    pub subject_comparison: ChartSpec,
}

/// Everything the presentation layer consumes from one run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub subject_counts: SubjectCounts,
    /// Prepared (standardized) table
    pub prepared: DataFrame,
    pub scaling: Vec<ColumnScaling>,
    /// Table the metrics and descriptive charts were computed from
    pub basis: MetricsBasis,
    pub metrics: PerformanceMetrics,
    pub charts: DashboardCharts,
}

/// Compute metrics and charts from already prepared data.
///
/// Metrics, the grade histogram and the subject comparison read the table
/// selected by `basis`. Impact factors always read the prepared table;
/// correlation does not depend on the scale.
pub fn summarize(
    data: PreparedData,
    subject_counts: SubjectCounts,
    basis: MetricsBasis,
) -> PipelineResult<PipelineOutput> {
    let descriptive = match basis {
        MetricsBasis::Prepared => &data.prepared,
        MetricsBasis::Raw => &data.derived,
    };

    let metrics = calculate_performance_metrics(descriptive)?;
    let charts = DashboardCharts {
        grade_distribution: grade_distribution(descriptive)?,
        impact_factors: impact_factors(&data.prepared)?,
        subject_comparison: subject_comparison(descriptive)?,
    };

    Ok(PipelineOutput {
        subject_counts,
        prepared: data.prepared,
        scaling: data.scaling,
        basis,
        metrics,
        charts,
    })
}

/// Run the whole pipeline from the two input files
pub fn run_pipeline(config: &PipelineConfig) -> PipelineResult<PipelineOutput> {
    let merged = load_and_merge(&config.paths)?;
    let subject_counts = count_subjects(&merged)?;
    let data = preprocess(&merged)?;
    summarize(data, subject_counts, config.basis)
}

/// Run with `data/student-mat.csv` and `data/student-por.csv`
pub fn run_default() -> PipelineResult<PipelineOutput> {
    run_pipeline(&PipelineConfig::default())
}
