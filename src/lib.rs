// src/lib.rs

#[macro_use]
pub mod macros;

pub mod audit;
pub mod builder;
pub mod classify;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod fetch;
pub mod gui;
pub mod log;
pub mod progress;
pub mod query;
pub mod record;
pub mod scene;

#[cfg(feature = "cli")]
pub mod cli;

pub use builder::{MapBuild, MapBuilder};
pub use classify::ScoreCategory;
pub use fetch::{EmptyReason, Fetched, Fetcher, HttpSource, InspectionSource};
pub use record::{InspectionRecord, InspectionTable};
pub use scene::{MapScene, SceneStatus};
