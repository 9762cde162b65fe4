use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{GridInput, GridMark, Legend, Line, Plot, PlotPoints, Points};

use super::text;
use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Series plot (central panel)
// ---------------------------------------------------------------------------

/// Render the year-over-year line chart in the central panel.
pub fn series_plot(ui: &mut Ui, state: &DashboardState) {
    let chart = match &state.chart {
        Some(chart) => chart,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(text::OPEN_HINT);
            });
            return;
        }
    };

    let axis = chart.x_axis;
    let y_label = state
        .options
        .item_label(&state.selection.item_id)
        .unwrap_or(&state.selection.item_id)
        .to_string();

    Plot::new("series_plot")
        .legend(Legend::default())
        .y_axis_label(y_label)
        .include_x(axis.range[0])
        .include_x(axis.range[1])
        .x_grid_spacer(move |_input: GridInput| {
            axis.tick_values
                .iter()
                .map(|&m| GridMark {
                    value: f64::from(m),
                    step_size: 1.0,
                })
                .collect()
        })
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            axis.label_for(mark.value).unwrap_or_default().to_string()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = state.colors.color_for(&series.name);

                let line_points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [f64::from(p.month), p.value])
                    .collect();
                let markers: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [f64::from(p.month), p.value])
                    .collect();

                plot_ui.line(
                    Line::new(line_points)
                        .name(&series.name)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(markers)
                        .name(&series.name)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}
