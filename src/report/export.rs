//! JSON export of a pipeline run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{
    ColumnScaling, DashboardCharts, MetricsBasis, PerformanceMetrics, PipelineConfig,
    PipelineOutput, SubjectCounts,
};

/// Metadata about the run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (RFC 3339)
    pub timestamp: String,
    /// student360 version
    pub version: String,
    pub math_file: String,
    pub portuguese_file: String,
    pub metrics_basis: MetricsBasis,
}

/// Complete report: metadata, metrics, scaling and chart specifications
#[derive(Serialize)]
pub struct ReportExport<'a> {
    pub metadata: ExportMetadata,
    pub records: SubjectCounts,
    pub metrics: PerformanceMetrics,
    /// Fitted standardization per column; values are relative to this run
    pub scaling: &'a [ColumnScaling],
    pub charts: &'a DashboardCharts,
}

impl<'a> ReportExport<'a> {
    pub fn new(output: &'a PipelineOutput, config: &PipelineConfig) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                math_file: config.paths.math.display().to_string(),
                portuguese_file: config.paths.portuguese.display().to_string(),
                metrics_basis: output.basis,
            },
            records: output.subject_counts,
            metrics: output.metrics,
            scaling: &output.scaling,
            charts: &output.charts,
        }
    }
}

/// Write the run report to a JSON file
pub fn export_report(
    output: &PipelineOutput,
    config: &PipelineConfig,
    output_path: &Path,
) -> Result<()> {
    let export = ReportExport::new(output, config);

    let json = serde_json::to_string_pretty(&export).context("Failed to serialize report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    Ok(())
}
