//! Declarative chart specifications built from the prepared table
//!
//! Builders never draw anything. They emit a `ChartSpec` that a renderer can
//! draw; `ChartSpec::to_plotly` converts one into a Plotly.js figure.

pub mod comparison;
pub mod distribution;
pub mod impact;

pub use comparison::*;
pub use distribution::*;
pub use impact::*;

use serde::Serialize;
use serde_json::{json, Value};

/// Chart type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Histogram,
    Bar,
    Line,
}

/// Direction bars or bins extend in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Values bound to one axis of a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValues {
    Numbers(Vec<f64>),
    Labels(Vec<String>),
}

impl AxisValues {
    pub fn len(&self) -> usize {
        match self {
            AxisValues::Numbers(v) => v.len(),
            AxisValues::Labels(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One data series of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: AxisValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisValues>,
}

/// Renderer-agnostic chart description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub orientation: Orientation,
    /// Field bound to the x axis
    pub x_field: String,
    /// Field bound to the y axis (histograms count rows instead)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_field: Option<String>,
    /// Column the traces are grouped and colored by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_by: Option<String>,
    /// Bin count for histograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<usize>,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    /// Convert to a Plotly.js figure (`{"data": [...], "layout": {...}}`)
    pub fn to_plotly(&self) -> Value {
        let data: Vec<Value> = self
            .traces
            .iter()
            .map(|trace| {
                let mut value = json!({
                    "x": trace.x,
                    "orientation": match self.orientation {
                        Orientation::Vertical => "v",
                        Orientation::Horizontal => "h",
                    },
                });
                if let Some(y) = &trace.y {
                    value["y"] = json!(y);
                }
                if let Some(name) = &trace.name {
                    value["name"] = json!(name);
                }
                match self.kind {
                    ChartKind::Histogram => {
                        value["type"] = json!("histogram");
                        if let Some(bins) = self.bins {
                            value["nbinsx"] = json!(bins);
                        }
                    }
                    ChartKind::Bar => value["type"] = json!("bar"),
                    ChartKind::Line => {
                        value["type"] = json!("scatter");
                        value["mode"] = json!("lines+markers");
                    }
                }
                value
            })
            .collect();

        let y_title = match (&self.y_field, self.kind) {
            (Some(field), _) => field.clone(),
            (None, ChartKind::Histogram) => "count".to_string(),
            (None, _) => String::new(),
        };

        let mut layout = json!({
            "title": { "text": self.title },
            "xaxis": { "title": { "text": self.x_field } },
            "yaxis": { "title": { "text": y_title } },
        });
        if let Some(group) = &self.color_by {
            layout["legend"] = json!({ "title": { "text": group } });
        }
        if self.kind == ChartKind::Histogram {
            layout["barmode"] = json!("relative");
        }

        json!({ "data": data, "layout": layout })
    }
}
