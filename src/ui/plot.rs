use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Shared plot frame
// ---------------------------------------------------------------------------

/// A fixed, non-interactive plot with axis labels and a legend.
fn static_plot<'a>(id: &str, x_label: &str, y_label: &str, height: f32) -> Plot<'a> {
    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .height(height)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false)
}

// ---------------------------------------------------------------------------
// The four charts (central panel, 2×2 grid)
// ---------------------------------------------------------------------------

/// Render all four charts, two per row.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let height = (ui.available_height() / 2.0 - 40.0).max(120.0);
    ui.columns(2, |cols: &mut [Ui]| {
        trend_chart(&mut cols[0], state, height);
        bar_chart(&mut cols[1], state, height);
    });
    ui.separator();
    ui.columns(2, |cols: &mut [Ui]| {
        histogram_chart(&mut cols[0], state, height);
        scatter_chart(&mut cols[1], state, height);
    });
}

/// 1. Line chart – petal length over row index.
pub fn trend_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Petal Length Trend");
    static_plot("trend_plot", "Index", "Petal Length (cm)", height).show(ui, |plot_ui| {
        let points = PlotPoints::from(state.charts.trend.clone());
        plot_ui.line(
            Line::new(points)
                .name("Petal Length")
                .color(Color32::LIGHT_BLUE)
                .width(1.5),
        );
    });
}

/// 2. Bar chart – average petal length per category.
pub fn bar_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Average Petal Length by Species");
    let labels: Vec<String> = state.charts.bars.iter().map(|(l, _)| l.clone()).collect();
    static_plot("bar_plot", "Species", "Petal Length (cm)", height)
        .x_axis_formatter(move |mark: GridMark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, (label, mean)) in state.charts.bars.iter().enumerate() {
                let color = state.colors.color_for(label);
                let bar = Bar::new(i as f64, *mean).width(0.6).fill(color).name(label);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(label).color(color));
            }
        });
}

/// 3. Histogram – distribution of sepal length with a density overlay.
pub fn histogram_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Distribution of Sepal Length");
    let hist = &state.charts.histogram;
    static_plot("histogram_plot", "Sepal Length (cm)", "Frequency", height).show(ui, |plot_ui| {
        let bars: Vec<Bar> = hist
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                Bar::new(hist.center(i), count as f64)
                    .width(hist.width)
                    .fill(Color32::from_rgb(70, 110, 220))
            })
            .collect();
        plot_ui.bar_chart(BarChart::new(bars).name("Count").color(Color32::BLUE));

        if !state.charts.density.is_empty() {
            let curve = PlotPoints::from(state.charts.density.clone());
            plot_ui.line(Line::new(curve).name("Density").color(Color32::BLUE).width(2.0));
        }
    });
}

/// 4. Scatter plot – sepal length vs petal length coloured by category.
pub fn scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Sepal Length vs Petal Length");
    static_plot(
        "scatter_plot",
        "Sepal Length (cm)",
        "Petal Length (cm)",
        height,
    )
    .show(ui, |plot_ui| {
        for (label, points) in &state.charts.scatter {
            plot_ui.points(
                Points::new(PlotPoints::from(points.clone()))
                    .name(label)
                    .color(state.colors.color_for(label))
                    .radius(3.0),
            );
        }
    });
}
