use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::PopulationDataset;

const ROW_HEIGHT: f32 = 18.0;

/// Raw rows of the filtered view, all original columns.
pub fn data_table(ui: &mut Ui, dataset: &PopulationDataset, rows: &[usize]) {
    ui.push_id("data_table", |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .max_scroll_height(360.0);
        for _ in &dataset.headers {
            table = table.column(Column::auto().at_least(60.0).clip(true));
        }

        table
            .header(ROW_HEIGHT + 4.0, |mut header| {
                for name in &dataset.headers {
                    header.col(|ui| {
                        ui.strong(name.as_str());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = &dataset.records[rows[row.index()]];
                    for cell in &record.cells {
                        row.col(|ui| {
                            ui.label(cell.as_str());
                        });
                    }
                });
            });
    });
}
