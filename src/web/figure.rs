use serde::Serialize;

use crate::color::YearColors;
use crate::data::series::{Chart, MonthAxis, Series};

// ---------------------------------------------------------------------------
// Chart → browser figure (plotly.js `data` + `layout`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<u8>,
    pub y: Vec<f64>,
    pub line: TraceStyle,
    pub marker: TraceStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStyle {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub xaxis: XAxis,
    pub showlegend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub range: [f64; 2],
    pub tickvals: Vec<u8>,
    pub ticktext: Vec<&'static str>,
}

impl Trace {
    fn from_series(series: &Series, colors: &YearColors) -> Self {
        let color = colors.hex_for(&series.name);
        Trace {
            kind: "scatter",
            mode: "lines+markers",
            name: series.name.clone(),
            x: series.points.iter().map(|p| p.month).collect(),
            y: series.points.iter().map(|p| p.value).collect(),
            line: TraceStyle {
                color: color.clone(),
            },
            marker: TraceStyle { color },
        }
    }
}

impl From<MonthAxis> for XAxis {
    fn from(axis: MonthAxis) -> Self {
        XAxis {
            range: axis.range,
            tickvals: axis.tick_values.to_vec(),
            ticktext: axis.tick_labels.to_vec(),
        }
    }
}

impl Figure {
    /// One `lines+markers` trace per series, in series order.
    pub fn from_chart(chart: &Chart, colors: &YearColors) -> Self {
        Figure {
            data: chart
                .series
                .iter()
                .map(|s| Trace::from_series(s, colors))
                .collect(),
            layout: Layout {
                xaxis: chart.x_axis.into(),
                showlegend: true,
            },
        }
    }
}
