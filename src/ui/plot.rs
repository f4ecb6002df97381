use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::model::PopulationDataset;
use crate::data::views::Snapshot;

const PLOT_HEIGHT: f32 = 280.0;

/// Group row indices by prefecture, preserving each group's row order.
fn by_prefecture<'a>(dataset: &'a PopulationDataset, rows: &[usize]) -> BTreeMap<&'a str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for &i in rows {
        groups
            .entry(dataset.records[i].prefecture.as_str())
            .or_default()
            .push(i);
    }
    groups
}

// ---------------------------------------------------------------------------
// Trend – line chart, one series per prefecture
// ---------------------------------------------------------------------------

/// Population of the total bracket over time.
pub fn trend_plot(ui: &mut Ui, dataset: &PopulationDataset, trend: &[usize], colors: &ColorMap) {
    let series = by_prefecture(dataset, trend);

    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Population")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (prefecture, rows) in &series {
                let points: PlotPoints = rows
                    .iter()
                    .map(|&i| {
                        let r = &dataset.records[i];
                        [r.year as f64, r.population]
                    })
                    .collect();

                let line = Line::new(points)
                    .name(prefecture)
                    .color(colors.color_for(prefecture))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Snapshot – grouped bar chart over age brackets
// ---------------------------------------------------------------------------

/// Age-bracket composition at the snapshot year; brackets on x, one bar
/// group per bracket with a bar per prefecture.
pub fn snapshot_plot(
    ui: &mut Ui,
    dataset: &PopulationDataset,
    snapshot: &Snapshot,
    bracket_order: &[String],
    colors: &ColorMap,
) {
    // Only the brackets present in the snapshot, in dataset order.
    let brackets: Vec<String> = bracket_order
        .iter()
        .filter(|b| {
            snapshot
                .indices
                .iter()
                .any(|&i| &dataset.records[i].age_bracket == *b)
        })
        .cloned()
        .collect();
    let series = by_prefecture(dataset, &snapshot.indices);

    let n_series = series.len().max(1) as f64;
    let bar_width = 0.8 / n_series;

    let charts: Vec<BarChart> = series
        .iter()
        .enumerate()
        .map(|(s, (prefecture, rows))| {
            let offset = (s as f64 - (n_series - 1.0) / 2.0) * bar_width;
            let bars: Vec<Bar> = rows
                .iter()
                .filter_map(|&i| {
                    let r = &dataset.records[i];
                    let x = brackets.iter().position(|b| *b == r.age_bracket)?;
                    Some(
                        Bar::new(x as f64 + offset, r.population)
                            .width(bar_width)
                            .name(&r.age_bracket),
                    )
                })
                .collect();
            BarChart::new(bars)
                .name(prefecture)
                .color(colors.color_for(prefecture))
        })
        .collect();

    let labels = brackets.clone();
    Plot::new("snapshot_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Age bracket")
        .y_axis_label("Population")
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
