// src/gui/actions/locate.rs
//
// "Update Location": build a scene for whatever the location fields hold.
// The build runs on a worker thread; one at a time (the button is disabled meanwhile).

use std::{sync::mpsc, thread};

use eframe::egui;

use crate::{gui::app::App, gui::progress::GuiProgress};

pub fn start(app: &mut App, ctx: &egui::Context) {
    if app.running {
        logd!("Locate: build already running, ignoring");
        return;
    }

    let lat = app.state.gui.lat_text.clone();
    let lon = app.state.gui.lon_text.clone();
    logf!("Locate: Begin lat={lat:?} lon={lon:?}");

    let builder = app.builder.clone();
    let status = app.status.clone();
    let ctx = ctx.clone();
    let (tx, rx) = mpsc::channel();

    app.running = true;
    app.pending = Some(rx);
    app.status("Loading…");

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);

        // → This is where the fetch happens ←
        let build = builder.build(&lat, &lon, Some(&mut prog));

        let _ = tx.send(build);
        ctx.request_repaint();
    });
}

/// Pick up a finished build, if any.
pub fn poll(app: &mut App) {
    let Some(rx) = app.pending.as_ref() else { return };

    match rx.try_recv() {
        Ok(build) => {
            logf!("Locate: OK title={:?} points={}", build.scene.title, build.scene.points.len());
            app.scene = build.scene;
            app.table = build.table;
            app.running = false;
            app.pending = None;
        }
        Err(mpsc::TryRecvError::Empty) => {}
        Err(mpsc::TryRecvError::Disconnected) => {
            loge!("Locate: worker exited without a result");
            app.status("Error: map build was interrupted");
            app.running = false;
            app.pending = None;
        }
    }
}
