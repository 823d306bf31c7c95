//! Metrics summary table for the terminal

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{MetricsBasis, PerformanceMetrics, SubjectCounts};

/// Summary of one pipeline run as shown at the end of the CLI output
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub counts: SubjectCounts,
    pub metrics: PerformanceMetrics,
    pub basis: MetricsBasis,
}

impl MetricsSummary {
    pub fn new(counts: SubjectCounts, metrics: PerformanceMetrics, basis: MetricsBasis) -> Self {
        Self {
            counts,
            metrics,
            basis,
        }
    }

    fn rate_color(rate: f64) -> Color {
        if rate >= 60.0 {
            Color::Green
        } else if rate >= 30.0 {
            Color::Yellow
        } else {
            Color::Red
        }
    }

    /// Build the table without printing it
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📘 Math Records"),
            Cell::new(self.counts.math),
        ]);
        table.add_row(vec![
            Cell::new("📗 Portuguese Records"),
            Cell::new(self.counts.portuguese),
        ]);
        table.add_row(vec![
            Cell::new("📁 Total Records"),
            Cell::new(self.counts.total()).add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🎓 Average Grade"),
            Cell::new(format!("{:.2}", self.metrics.average_grade))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("✅ Pass Rate"),
            Cell::new(format!("{:.1}%", self.metrics.pass_rate))
                .fg(Self::rate_color(self.metrics.pass_rate)),
        ]);
        table.add_row(vec![
            Cell::new("📈 Improvement Rate"),
            Cell::new(format!("{:.1}%", self.metrics.improvement_rate))
                .fg(Self::rate_color(self.metrics.improvement_rate)),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PERFORMANCE SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        if self.basis == MetricsBasis::Prepared {
            println!();
            println!(
                "    {}",
                style("Grades are standardized (z-scores); use --metrics-basis raw for the 0-20 scale")
                    .dim()
            );
        }
    }
}
