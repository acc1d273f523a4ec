use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::view::histogram::Histogram;

const PLOT_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Histogram plot
// ---------------------------------------------------------------------------

/// Render `histogram` as adjacent bars. `id` must be unique per plot.
pub fn histogram_plot(ui: &mut Ui, id: &str, histogram: &Histogram, x_label: &str, color: Color32) {
    if histogram.is_empty() {
        ui.label(format!("No {} values to plot.", x_label.to_lowercase()));
        return;
    }

    let bars: Vec<Bar> = histogram
        .bins()
        .map(|(start, end, count)| {
            Bar::new((start + end) / 2.0, count as f64)
                .width(end - start)
                .name(format!("{start:.2} – {end:.2}"))
        })
        .collect();

    let chart = BarChart::new(bars).name(x_label).color(color);

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Count")
        .allow_scroll(false)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
    ui.weak(format!("{} values in {} bins", histogram.total(), histogram.counts.len()));
}
