// src/gui/components/mod.rs
pub mod location_bar;
pub mod map_view;
pub mod records_table;
pub mod score_info;
