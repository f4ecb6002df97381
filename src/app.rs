use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::ViewerConfig;
use crate::data::model::Dimension;
use crate::data::views::{SnapshotNotice, TrendNotice};
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const WARNING: Color32 = Color32::from_rgb(0xE0, 0xA0, 0x20);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CensusViewerApp {
    pub state: AppState,
}

impl CensusViewerApp {
    pub fn new(config: &ViewerConfig) -> Self {
        let mut state = AppState::new(config);
        if let Some(path) = &config.data_path {
            state.load_path(path);
        }
        Self { state }
    }
}

impl eframe::App for CensusViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: summary, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    results(ui, &mut self.state);
                });
        });
    }
}

fn warning(ui: &mut Ui, text: &str) {
    ui.colored_label(WARNING, format!("⚠ {text}"));
}

fn results(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Population by prefecture and five-year age bracket, 1920–2015");

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view population data  (File → Open…)");
        });
        return;
    }

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.strong("Current filter");
        ui.label(state.criteria.summary().to_string());
    });
    ui.add_space(8.0);

    if state.criteria.selection(Dimension::Prefecture).is_empty() {
        egui::CollapsingHeader::new("Getting started")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.label("Select one or more prefectures in the left panel to start the analysis.");
                ui.label(format!(
                    "Include \"{}\" in the age bracket selection to see the population trend. \
                     Moving the year range updates the bar chart.",
                    state.total_label
                ));
            });
    } else {
        analysis_section(ui, state);
    }

    ui.add_space(8.0);
    let Some(dataset) = &state.dataset else {
        return;
    };
    ui.heading(format!("Selected rows ({})", state.analysis.filtered.len()));
    table::data_table(ui, dataset, &state.analysis.filtered);
}

fn analysis_section(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let analysis = &state.analysis;
    let total = state.total_label.as_str();

    // ---- Trend ----
    ui.heading("Population trend");
    match analysis.trend_notice(&state.criteria, total) {
        None => {
            plot::trend_plot(ui, dataset, &analysis.trend, &state.color_map);
            ui.small("Compare how each prefecture's population grew or shrank.");
        }
        Some(TrendNotice::TotalNotSelected) => {
            warning(ui, &format!("Add \"{total}\" to the age bracket selection to draw the trend."));
        }
        Some(TrendNotice::NoData) => {
            warning(ui, "No data to display for the current filter.");
        }
    }
    ui.add_space(8.0);

    // ---- Snapshot ----
    ui.heading("Population by age bracket");
    match (&analysis.snapshot, analysis.snapshot_notice(&state.criteria, total)) {
        (Some(snapshot), None) => {
            plot::snapshot_plot(
                ui,
                dataset,
                snapshot,
                dataset.distinct(Dimension::AgeBracket),
                &state.color_map,
            );
            ui.small(format!(
                "Age composition in {}, the latest year in the selected range.",
                snapshot.year
            ));
        }
        (_, Some(SnapshotNotice::NoAgeBracket)) => {
            warning(ui, &format!("Select at least one age bracket other than \"{total}\"."));
        }
        _ => warning(ui, "No data to display for the current filter."),
    }
    ui.add_space(8.0);

    if ui
        .button(RichText::new("Save CSV…").strong())
        .on_hover_text("Save the selected rows with all original columns")
        .clicked()
    {
        panels::save_file_dialog(state);
    }
}
