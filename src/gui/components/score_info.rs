// src/gui/components/score_info.rs
use eframe::egui::{self, RichText};

use crate::classify::ScoreCategory;
use crate::config::consts::SCORE_EXPLANATION;

pub fn draw(ui: &mut egui::Ui) {
    ui.add_space(4.0);
    ui.label(RichText::new("Score Explanation").strong());
    ui.label(SCORE_EXPLANATION);

    ui.horizontal(|ui| {
        for (cat, range) in [
            (ScoreCategory::Good, "90 and up"),
            (ScoreCategory::Passing, "70 to 89"),
            (ScoreCategory::Failing, "below 70 or unscored"),
        ] {
            let [r, g, b] = cat.rgb();
            ui.label(RichText::new("●").color(egui::Color32::from_rgb(r, g, b)));
            ui.label(format!("{} ({range})", cat.label()));
            ui.add_space(8.0);
        }
    });
    ui.add_space(4.0);
}
