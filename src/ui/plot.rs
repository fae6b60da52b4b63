use chrono::DateTime;
use eframe::egui::Ui;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoint, PlotPoints};

use crate::color::SeriesColors;
use crate::data::model::Series;
use crate::view::PlotView;

// ---------------------------------------------------------------------------
// Weather line chart (central panel)
// ---------------------------------------------------------------------------

/// Render the month's series as lines on a shared time axis.
pub fn weather_plot(ui: &mut Ui, plot: &PlotView) {
    ui.heading("Interactive plots");
    if let Some(month) = plot.selection.month {
        ui.label(format!(
            "{month} · {} · {} rows",
            plot.selection.column, plot.row_count
        ));
    }

    if plot.projection.series.iter().all(Series::is_empty) {
        return;
    }

    let colors = SeriesColors::new(&plot.numeric_columns);

    Plot::new("weather_plot")
        .legend(Legend::default())
        .x_axis_label("Time")
        .x_axis_formatter(|mark: GridMark, _range| format_time_axis(mark.value))
        .label_formatter(|name: &str, value: &PlotPoint| {
            format!("{name}\n{}\n{:.2}", format_time_axis(value.x), value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &plot.projection.series {
                // Gaps in the data are skipped rather than drawn as zero.
                let points: PlotPoints = series
                    .points
                    .iter()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(ts, v)| [ts.and_utc().timestamp() as f64, *v])
                    .collect();

                let line = Line::new(points)
                    .name(&series.name)
                    .color(colors.color_for(&series.name))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// Axis label for seconds since the Unix epoch.
fn format_time_axis(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
