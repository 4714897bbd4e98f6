// src/gui/app.rs
use std::{
    error::Error,
    sync::{mpsc::Receiver, Arc, Mutex},
};

use eframe::egui;

use crate::{
    builder::{MapBuild, MapBuilder},
    config::state::AppState,
    core::GeoPoint,
    record::InspectionTable,
    scene::MapScene,
};

use super::{actions::locate, components, tiles::TileCache};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Restaurant Inspection Map",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::from_env())))),
    )?;
    Ok(())
}

const IDLE_STATUS: &str = "Press Update Location to map nearby inspections";

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    pub builder: Arc<MapBuilder>,

    // last completed build
    pub scene: MapScene,
    pub table: InspectionTable,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub pending: Option<Receiver<MapBuild>>,

    pub tiles: TileCache,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let builder = Arc::new(MapBuilder::from_options(&state.options));
        let tiles = TileCache::new(state.options.map.tile_url.clone());
        let scene = MapScene::no_data(None, &state.options.map);

        logf!(
            "Init: endpoint={} location=({}, {})",
            state.options.fetch.endpoint,
            state.gui.lat_text,
            state.gui.lon_text
        );

        // Startup only fills the location fields; the first build waits for the button.
        Self {
            state,
            builder,
            scene,
            table: InspectionTable::empty(),
            status: Arc::new(Mutex::new(s!(IDLE_STATUS))),
            running: false,
            pending: None,
            tiles,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Query point of the current scene, for distances in the table.
    pub fn origin(&self) -> Option<GeoPoint> {
        self.scene.center
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        locate::poll(self);
        self.tiles.poll(ctx);

        egui::TopBottomPanel::top("location").show(ctx, |ui| {
            components::location_bar::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("score_info")
            .resizable(false)
            .show(ctx, |ui| {
                components::score_info::draw(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::map_view::draw(ui, self);

            ui.separator();

            components::records_table::draw(ui, self);
        });

        if self.running {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
