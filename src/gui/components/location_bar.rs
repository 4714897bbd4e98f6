// src/gui/components/location_bar.rs
//
// Latitude/longitude fields, the "Update Location" button, and the status line.
// Fields take any text; the builder decides what is a usable coordinate.

use eframe::egui::{self, widgets::Spinner};

use crate::gui::{actions::locate, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label("Latitude:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.state.gui.lat_text)
                .desired_width(120.0)
                .font(egui::TextStyle::Monospace))
            .changed()
        {
            logd!("UI: lat_text → {}", app.state.gui.lat_text);
        }

        ui.label("Longitude:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.state.gui.lon_text)
                .desired_width(120.0)
                .font(egui::TextStyle::Monospace))
            .changed()
        {
            logd!("UI: lon_text → {}", app.state.gui.lon_text);
        }

        let clicked = ui
            .add_enabled(!app.running, egui::Button::new("Update Location"))
            .clicked();
        if clicked {
            locate::start(app, ui.ctx());
        }

        if app.running {
            ui.add(Spinner::new());
        }

        ui.separator();
        ui.label(app.status_text());
    });
    ui.add_space(4.0);
}
