// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Mirrors build progress into the shared status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    // a failure line was shown; keep it visible past `finish`
    failed: bool,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, failed: false }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, lat: f64, lon: f64) {
        self.set_status(format!("Looking up inspections near ({lat:.5}, {lon:.5})…"));
    }

    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }

    fn fail(&mut self, reason: &str) {
        self.failed = true;
        self.set_status(s!(reason));
    }

    fn finish(&mut self, points: usize) {
        match points {
            0 if self.failed => {}
            0 => self.set_status(s!("No inspections found nearby")),
            1 => self.set_status(s!("Done: 1 restaurant")),
            n => self.set_status(format!("Done: {n} restaurants")),
        }
    }
}
