// src/gui/mod.rs
pub mod actions;
pub mod app;
pub mod components;
pub mod progress;
pub mod tiles;

pub use app::run;
