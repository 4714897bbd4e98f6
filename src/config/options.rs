// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

/// Runtime options. Read once at startup, immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub map: MapOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            fetch: FetchOptions::default(),
            map: MapOptions::default(),
        }
    }
}

impl AppOptions {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with the variable lookup supplied by the caller.
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            fetch: FetchOptions::from_vars(&get),
            map: MapOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuditTarget {
    Disabled,
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FetchOptions {
    pub endpoint: String,
    pub app_token: Option<String>,
    pub radius_m: f64,
    pub lookback_days: i64,
    pub limit: u32,
    pub audit: AuditTarget,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            endpoint: s!(API_URL),
            app_token: None,
            radius_m: DEFAULT_RADIUS_M,
            lookback_days: LOOKBACK_DAYS,
            limit: RESULT_LIMIT,
            audit: AuditTarget::File(PathBuf::from(DEFAULT_AUDIT_FILE)),
        }
    }
}

impl FetchOptions {
    fn from_vars<F>(get: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut opts = Self::default();
        if let Some(endpoint) = non_empty(ENV_ENDPOINT) {
            opts.endpoint = endpoint;
        }
        opts.app_token = non_empty(ENV_API_TOKEN);
        if let Some(audit) = non_empty(ENV_AUDIT) {
            opts.audit = if audit.eq_ignore_ascii_case(AUDIT_DISABLED) {
                AuditTarget::Disabled
            } else {
                AuditTarget::File(PathBuf::from(audit))
            };
        }
        opts
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    pub zoom: u8,
    pub height_px: u32,
    pub marker_size: f32,
    pub tile_url: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom: MAP_ZOOM,
            height_px: MAP_HEIGHT_PX,
            marker_size: MARKER_SIZE,
            tile_url: s!(TILE_URL),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the tabular formats.
    pub fn delimiter(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let opts = AppOptions::from_vars(vars(&[]));
        assert_eq!(opts, AppOptions::default());
        assert_eq!(opts.fetch.endpoint, API_URL);
        assert_eq!(opts.fetch.radius_m, 800.0);
        assert_eq!(opts.fetch.limit, 250);
        assert_eq!(opts.fetch.lookback_days, 548);
        assert!(opts.fetch.app_token.is_none());
    }

    #[test]
    fn token_endpoint_and_audit_from_environment() {
        let opts = AppOptions::from_vars(vars(&[
            (ENV_API_TOKEN, " abc123 "),
            (ENV_ENDPOINT, "http://localhost:9999/x.json"),
            (ENV_AUDIT, "logs/raw.txt"),
        ]));
        assert_eq!(opts.fetch.app_token.as_deref(), Some("abc123"));
        assert_eq!(opts.fetch.endpoint, "http://localhost:9999/x.json");
        assert_eq!(opts.fetch.audit, AuditTarget::File(PathBuf::from("logs/raw.txt")));
    }

    #[test]
    fn blank_token_is_none_and_off_disables_audit() {
        let opts = AppOptions::from_vars(vars(&[(ENV_API_TOKEN, "   "), (ENV_AUDIT, "OFF")]));
        assert!(opts.fetch.app_token.is_none());
        assert_eq!(opts.fetch.audit, AuditTarget::Disabled);
    }

    #[test]
    fn export_format_delimiters() {
        assert_eq!(ExportFormat::Csv.delimiter(), Some(','));
        assert_eq!(ExportFormat::Tsv.delimiter(), Some('\t'));
        assert_eq!(ExportFormat::Json.delimiter(), None);
        assert_eq!(ExportFormat::Tsv.ext(), "tsv");
    }
}
