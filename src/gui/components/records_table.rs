// src/gui/components/records_table.rs
//
// Lists the records behind the current scene. Purely a view.

use eframe::egui::{self, Align, Color32, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::classify::ScoreCategory;
use crate::core::geo::haversine_m;
use crate::gui::app::App;

const HEADERS: [&str; 6] = ["Name", "Score", "Category", "Inspected", "Address", "Distance"];
const WIDTHS: [f32; 6] = [220.0, 50.0, 70.0, 90.0, 260.0, 70.0];
// Score and Distance are centered.
const NUMERIC: [bool; 6] = [false, true, false, false, false, true];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let records = app.table.records();
    if records.is_empty() {
        ui.label(RichText::new("No records").weak());
        return;
    }
    let origin = app.origin();

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(f32::INFINITY);
    for (i, w) in WIDTHS.iter().enumerate() {
        let col = if i + 1 == WIDTHS.len() {
            Column::remainder().at_least(*w)
        } else {
            Column::initial(*w).resizable(true).clip(true).at_least(20.0)
        };
        table = table.column(col);
    }

    table
        .header(24.0, |mut header| {
            for (ci, label) in HEADERS.iter().enumerate() {
                header.col(|ui| {
                    let text = RichText::new(*label).strong();
                    if NUMERIC[ci] {
                        ui.centered_and_justified(|ui| { ui.label(text); });
                    } else {
                        ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(text); });
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, records.len(), |mut row| {
                let Some(r) = records.get(row.index()) else { return };
                let category = ScoreCategory::classify(r.score);
                let [cr, cg, cb] = category.rgb();

                let cells = [
                    RichText::new(&r.name),
                    RichText::new(r.score.map(|s| s.to_string()).unwrap_or_default()),
                    RichText::new(category.label()).color(Color32::from_rgb(cr, cg, cb)),
                    RichText::new(
                        r.inspection_day()
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| r.inspection_date.clone()),
                    ),
                    RichText::new(r.street_address().unwrap_or_default()),
                    RichText::new(
                        origin
                            .map(|o| format!("{:.0} m", haversine_m(o, r.position())))
                            .unwrap_or_default(),
                    ),
                ];

                for (ci, cell) in cells.into_iter().enumerate() {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Truncate);
                        if NUMERIC[ci] {
                            ui.centered_and_justified(|ui| { ui.label(cell); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(cell); });
                        }
                    });
                }
            });
        });
}
