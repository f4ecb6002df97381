use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::DEFAULT_EXPORT_NAME;
use crate::data::filter::YearRange;
use crate::data::model::{Dimension, YEAR_MAX, YEAR_MIN};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone the option lists so state can be mutated inside the loop.
    let options: Vec<(Dimension, Vec<String>)> = Dimension::ALL
        .iter()
        .map(|&dim| (dim, dataset.distinct(dim).to_vec()))
        .collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (dim, all_values) in &options {
                let n_selected = state.criteria.selection(*dim).len();
                let header_text = format!("{dim}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim)
                    .default_open(*dim != Dimension::AgeBracket)
                    .show(ui, |ui: &mut Ui| {
                        if state.select_all_shortcuts {
                            ui.horizontal(|ui: &mut Ui| {
                                if ui.small_button("All").clicked() {
                                    state.select_all(*dim);
                                }
                                if ui.small_button("None").clicked() {
                                    state.select_none(*dim);
                                }
                            });
                        }

                        for value in all_values {
                            let mut checked = state.criteria.selection(*dim).contains(value);
                            let mut text = RichText::new(value);
                            if *dim == Dimension::Prefecture {
                                text = text.color(state.color_map.color_for(value));
                            }
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle(*dim, value);
                            }
                        }
                    });
            }

            ui.separator();
            year_range_controls(ui, state);
        });
}

fn year_range_controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Years");
    let mut from = state.criteria.years.min();
    let mut to = state.criteria.years.max();
    let from_changed = ui
        .add(egui::Slider::new(&mut from, YEAR_MIN..=YEAR_MAX).text("from"))
        .changed();
    let to_changed = ui
        .add(egui::Slider::new(&mut to, YEAR_MIN..=YEAR_MAX).text("to"))
        .changed();

    // Dragging one handle past the other pushes it along rather than swapping.
    if from_changed && from > to {
        to = from;
    } else if to_changed && to < from {
        from = to;
    }
    state.set_years(YearRange::new(from, to));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Save CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} selected",
                ds.len(),
                state.analysis.filtered.len()
            ));
        }

        if let Some(notice) = &state.notice {
            ui.separator();
            ui.label(RichText::new(format!("✔ {notice}")).color(Color32::DARK_GREEN));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open population data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_to(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
