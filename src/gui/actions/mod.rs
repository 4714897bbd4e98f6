// src/gui/actions/mod.rs
pub mod locate;
