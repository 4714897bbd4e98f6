// src/core/mod.rs

pub mod geo;
pub mod net;
pub mod sanitize;

pub use geo::GeoPoint;
