// src/gui/tiles.rs
//
// OpenStreetMap raster tiles for the map panel. Each missing tile is fetched on its own
// worker thread; decoded images come back over a channel and are uploaded as textures
// on the UI thread. Failed tiles are remembered and not retried.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use ureq::Agent;

use crate::core::geo::TileId;
use crate::core::net;

pub enum TileSlot {
    Loading,
    Ready(TextureHandle),
    Failed,
}

type TileResult = (TileId, Result<ColorImage, String>);

pub struct TileCache {
    template: String,
    agent: Agent,
    slots: HashMap<TileId, TileSlot>,
    tx: Sender<TileResult>,
    rx: Receiver<TileResult>,
}

impl TileCache {
    pub fn new(template: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { template: template.into(), agent: net::agent(), slots: HashMap::new(), tx, rx }
    }

    /// Texture for `id` if it has arrived. Starts a download on first request.
    pub fn get(&mut self, ctx: &egui::Context, id: TileId) -> Option<&TextureHandle> {
        if !self.slots.contains_key(&id) {
            self.spawn_fetch(ctx, id);
            self.slots.insert(id, TileSlot::Loading);
        }
        match self.slots.get(&id) {
            Some(TileSlot::Ready(tex)) => Some(tex),
            _ => None,
        }
    }

    pub fn pending(&self) -> usize {
        self.slots.values().filter(|s| matches!(s, TileSlot::Loading)).count()
    }

    /// Upload whatever finished since the last frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok((id, result)) = self.rx.try_recv() {
            let slot = match result {
                Ok(img) => {
                    let name = format!("tile-{}-{}-{}", id.z, id.x, id.y);
                    TileSlot::Ready(ctx.load_texture(name, img, TextureOptions::LINEAR))
                }
                Err(e) => {
                    logw!("Tiles: {}/{}/{} failed: {e}", id.z, id.x, id.y);
                    TileSlot::Failed
                }
            };
            self.slots.insert(id, slot);
        }
    }

    fn spawn_fetch(&self, ctx: &egui::Context, id: TileId) {
        let url = id.url(&self.template);
        let agent = self.agent.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            logd!("Tiles: GET {url}");
            let result = net::http_get_bytes(&agent, &url)
                .map_err(|e| e.to_string())
                .and_then(|bytes| decode_tile(&bytes));
            // Receiver gone means the app is closing.
            let _ = tx.send((id, result));
            ctx.request_repaint();
        });
    }
}

/// PNG bytes to an egui image.
pub fn decode_tile(bytes: &[u8]) -> Result<ColorImage, String> {
    let rgba = image::load_from_memory(bytes).map_err(|e| e.to_string())?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
