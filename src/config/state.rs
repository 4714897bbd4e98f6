// src/config/state.rs
use super::consts::{ENV_LAT, ENV_LON, LOCATION_ERROR};
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Location fields as text; geolocation sentinels like "Error" are kept verbatim
    pub lat_text: String,
    pub lon_text: String,

    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            lat_text: s!(LOCATION_ERROR),
            lon_text: s!(LOCATION_ERROR),
            window_w: 1100,
            window_h: 900,
        }
    }
}

impl GuiState {
    /// Initial location from the environment. Missing values become the
    /// geolocation-denied sentinel, which the map builder turns into an error scene.
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| s!(LOCATION_ERROR))
        };
        Self {
            lat_text: read(ENV_LAT),
            lon_text: read(ENV_LON),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            options: AppOptions::default(),
            gui: GuiState::default(),
        }
    }
}

impl AppState {
    pub fn from_env() -> Self {
        Self {
            options: AppOptions::from_env(),
            gui: GuiState::from_vars(|key| std::env::var(key).ok()),
        }
    }
}
