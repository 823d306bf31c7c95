//! Student360: Student Performance Analytics CLI
//!
//! Runs the data-preparation pipeline over the two subject files, prints the
//! performance summary, and optionally exports a JSON report and renders the
//! tabbed HTML dashboard.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::ProgressBar;

use student360::cli::Cli;
use student360::pipeline::{
    count_subjects, load_and_merge, preprocess, summarize, PipelineCache, PipelineConfig,
    PipelineOutput, PipelineResult,
};
use student360::report::{export_report, render_dashboard, DashboardHandler, MetricsSummary};
use student360::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.pipeline_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let output = run_with_progress(&config)?;

    MetricsSummary::new(output.subject_counts, output.metrics, output.basis).display();

    if let Some(export_path) = &cli.export {
        let spinner = create_spinner("Writing JSON report...");
        export_report(&output, &config, export_path)?;
        finish_with_success(&spinner, &format!("Report saved to {}", export_path.display()));
    }

    if let Some(dashboard_path) = &cli.dashboard {
        let spinner = create_spinner("Rendering dashboard...");
        let html = render_dashboard(&output)?;
        write_dashboard(dashboard_path, &html)?;
        finish_with_success(
            &spinner,
            &format!("Dashboard saved to {}", dashboard_path.display()),
        );

        if cli.watch {
            return watch_dashboard(config, dashboard_path, Duration::from_secs(cli.interval));
        }
    }

    print_completion();

    Ok(())
}

/// Finish the spinner according to the step result
fn finish_step<T>(spinner: &ProgressBar, result: PipelineResult<T>, done: &str) -> Result<T> {
    match result {
        Ok(value) => {
            finish_with_success(spinner, done);
            Ok(value)
        }
        Err(e) => {
            finish_with_error(spinner, &e.to_string());
            Err(e.into())
        }
    }
}

/// Run the pipeline step by step with spinners and timings
fn run_with_progress(config: &PipelineConfig) -> Result<PipelineOutput> {
    // Step 1: Load and merge
    print_step_header(1, "Load Datasets");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading subject files...");
    let merged = finish_step(&spinner, load_and_merge(&config.paths), "Datasets merged")?;
    let counts = count_subjects(&merged)?;

    println!("\n    {} Merged Table:", style("✧").cyan());
    println!("      Math rows: {}", counts.math);
    println!("      Portuguese rows: {}", counts.portuguese);
    println!("      Columns: {}", merged.width());
    print_step_time(step_start.elapsed());

    // Step 2: Encode, derive, standardize
    print_step_header(2, "Feature Preprocessing");
    let step_start = Instant::now();
    let spinner = create_spinner("Encoding, deriving and standardizing features...");
    let data = finish_step(&spinner, preprocess(&merged), "Prepared table built")?;
    print_info(&format!(
        "{} column(s) standardized over {} rows",
        data.scaling.len(),
        data.prepared.height()
    ));
    print_step_time(step_start.elapsed());

    // Step 3: Metrics and charts
    print_step_header(3, "Metrics & Charts");
    let step_start = Instant::now();
    let spinner = create_spinner("Computing metrics and chart specifications...");
    let output = finish_step(
        &spinner,
        summarize(data, counts, config.basis),
        "Metrics and charts ready",
    )?;
    print_step_time(step_start.elapsed());

    Ok(output)
}

fn write_dashboard(path: &Path, html: &str) -> Result<()> {
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write dashboard to {}", path.display()))
}

/// Re-render the dashboard whenever an input file changes. Runs until killed.
fn watch_dashboard(config: PipelineConfig, path: &Path, interval: Duration) -> Result<()> {
    let mut cache = PipelineCache::new();
    let mut handler = DashboardHandler::new(move || cache.get(&config));

    // Seed the cache with the inputs as they are now
    let page = handler.handle()?;
    write_dashboard(path, &page.html)?;

    println!();
    print_info(&format!(
        "Watching input files every {}s (Ctrl+C to stop)",
        interval.as_secs()
    ));

    loop {
        thread::sleep(interval);
        match handler.handle() {
            Ok(page) if page.refreshed => {
                write_dashboard(path, &page.html)?;
                print_success(&format!("Inputs changed, dashboard re-rendered to {}", path.display()));
            }
            Ok(_) => {}
            Err(e) => print_warning(&format!("{:#}", e)),
        }
    }
}
