// src/fetch/mod.rs
mod fetcher;
mod source;

pub use fetcher::{EmptyReason, Fetched, Fetcher};
pub use source::{decode_records, HttpSource, InspectionSource};
