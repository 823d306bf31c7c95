//! Tabbed HTML dashboard rendered from a pipeline run
//!
//! The page is self-contained apart from Plotly.js, which draws the chart
//! specifications client-side. Rendering reads only the `PipelineOutput`
//! it is handed.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::charts::ChartSpec;
use crate::pipeline::{run_pipeline, CacheLookup, PipelineConfig, PipelineOutput, PipelineResult};

pub const DASHBOARD_TITLE: &str = "Student360 Analytics Dashboard";

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; background: #f9fafb; color: #1f2937; }
.tabs { display: flex; gap: 0.5rem; border-bottom: 1px solid #d1d5db; }
.tab { padding: 0.5rem 1rem; cursor: pointer; border: none; background: none; font-size: 1rem; }
.tab.active { border-bottom: 3px solid #2563eb; font-weight: bold; }
.panel { display: none; padding: 1rem 0; }
.panel.active { display: block; }
.chart { width: 100%; height: 480px; }
"#;

const TAB_SCRIPT: &str = r#"
document.querySelectorAll('.tab').forEach(function (tab) {
  tab.addEventListener('click', function () {
    document.querySelectorAll('.tab, .panel').forEach(function (el) { el.classList.remove('active'); });
    tab.classList.add('active');
    document.getElementById(tab.dataset.panel).classList.add('active');
    window.dispatchEvent(new Event('resize'));
  });
});
"#;

/// (panel id, tab label, heading, chart element id)
const TABS: [(&str, &str, &str, &str); 3] = [
    ("overview", "Overview", "Performance Metrics", "grade-distribution"),
    ("impact", "Impact Analysis", "Factor Impact Analysis", "impact-factors"),
    ("detailed", "Detailed Analysis", "Subject Performance Comparison", "subject-comparison"),
];

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize a chart as a Plotly figure safe to embed in a script block
fn figure_json(spec: &ChartSpec) -> Result<String> {
    let json = serde_json::to_string(&spec.to_plotly())
        .with_context(|| format!("Failed to serialize chart '{}'", spec.title))?;
    Ok(json.replace("</", "<\\/"))
}

/// Render the full dashboard page for one pipeline run
pub fn render_dashboard(output: &PipelineOutput) -> Result<String> {
    let charts = [
        &output.charts.grade_distribution,
        &output.charts.impact_factors,
        &output.charts.subject_comparison,
    ];

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", DASHBOARD_TITLE));
    html.push_str(&format!("<script src=\"{}\"></script>\n", PLOTLY_SRC));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str(&format!("<h1>{}</h1>\n", DASHBOARD_TITLE));

    html.push_str("<div class=\"tabs\">\n");
    for (i, (panel, label, _, _)) in TABS.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        html.push_str(&format!(
            "<button class=\"tab{}\" data-panel=\"{}\">{}</button>\n",
            active, panel, label
        ));
    }
    html.push_str("</div>\n");

    for (i, (panel, _, heading, chart_id)) in TABS.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        html.push_str(&format!(
            "<section id=\"{}\" class=\"panel{}\">\n<h3>{}</h3>\n",
            panel, active, heading
        ));
        if i == 0 {
            html.push_str("<div id=\"performance-metrics\">\n");
            for line in output.metrics.display_lines() {
                html.push_str(&format!("<p>{}</p>\n", escape_html(&line)));
            }
            html.push_str("</div>\n");
        }
        html.push_str(&format!("<div id=\"{}\" class=\"chart\"></div>\n</section>\n", chart_id));
    }

    html.push_str("<script>\n");
    for ((_, _, _, chart_id), spec) in TABS.iter().zip(charts) {
        html.push_str(&format!(
            "(function () {{ var fig = {}; Plotly.newPlot('{}', fig.data, fig.layout, {{responsive: true}}); }})();\n",
            figure_json(spec)?,
            chart_id
        ));
    }
    html.push_str(TAB_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    Ok(html)
}

/// A rendered page and whether its data was recomputed for this request
#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub html: String,
    pub refreshed: bool,
}

/// Renders the dashboard from an injected pipeline source on each request.
///
/// The handler owns no data of its own; whatever state the source keeps
/// (for example a `PipelineCache`) lives in the closure the caller passes.
pub struct DashboardHandler<S> {
    source: S,
}

impl<S> DashboardHandler<S>
where
    S: FnMut() -> PipelineResult<CacheLookup>,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn handle(&mut self) -> Result<DashboardPage> {
        let lookup = (self.source)().context("Pipeline run failed")?;
        Ok(DashboardPage {
            html: render_dashboard(&lookup.output)?,
            refreshed: lookup.refreshed,
        })
    }
}

/// Handler that recomputes the pipeline on every request
pub fn uncached_handler(
    config: PipelineConfig,
) -> DashboardHandler<impl FnMut() -> PipelineResult<CacheLookup>> {
    DashboardHandler::new(move || {
        run_pipeline(&config).map(|output| CacheLookup {
            output: Arc::new(output),
            refreshed: true,
        })
    })
}
