// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::ViewportBuilder;
use inspection_map::{
    config::state::GuiState,
    gui, loge,
    log::{self, LogTarget},
};

fn main() {
    // No console on Windows release builds; log to .store/debug.log
    log::init(LogTarget::File);

    let gui_state = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([gui_state.window_w as f32, gui_state.window_h as f32])
            .with_title("Restaurant Inspection Map"),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        loge!("GUI failed: {e}");
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
