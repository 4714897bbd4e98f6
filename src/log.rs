// src/log.rs
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};

/// Where log lines go. GUI builds have no console, so they log to a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file() -> io::Result<File> {
    fs::create_dir_all(STORE_DIR)?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(Path::new(LOG_FILE))
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init(target: LogTarget) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false);

    let _ = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File => match open_log_file() {
            Ok(file) => builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            Err(e) => {
                eprintln!("Could not open {LOG_FILE} ({e}); logging to stderr");
                builder.with_writer(io::stderr).try_init()
            }
        },
    };
}
