// src/config/consts.rs

// Upstream (Austin food establishment inspection scores, Socrata)
pub const API_URL: &str = "https://data.austintexas.gov/resource/ecmv-9xxi.json";
pub const API_TOKEN_HEADER: &str = "X-App-Token";
pub const USER_AGENT: &str = concat!("inspection_map/", env!("CARGO_PKG_VERSION"));

// Environment
pub const ENV_API_TOKEN: &str = "AUSTIN_DATA_API_TOKEN";
pub const ENV_ENDPOINT: &str = "INSPECTION_MAP_ENDPOINT";
pub const ENV_AUDIT: &str = "INSPECTION_MAP_AUDIT";
pub const ENV_LAT: &str = "INSPECTION_MAP_LAT";
pub const ENV_LON: &str = "INSPECTION_MAP_LON";

// Query
pub const DEFAULT_RADIUS_M: f64 = 800.0;
pub const LOOKBACK_DAYS: i64 = 548; // ~18 months
pub const RESULT_LIMIT: u32 = 250;

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_AUDIT_FILE: &str = "data.csv";
pub const AUDIT_SEP: char = ' ';
pub const AUDIT_DISABLED: &str = "off";

// Map
pub const MAP_ZOOM: u8 = 15;
pub const MAP_HEIGHT_PX: u32 = 500;
pub const MARKER_SIZE: f32 = 3.0;
pub const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_SIZE: f64 = 256.0;

// Scene titles
pub const TITLE_READY: &str = "Restaurant Inspection Scores";
pub const TITLE_NO_DATA: &str = "No Inspection Data Found";
pub const TITLE_ERROR: &str = "Error Generating Map";

// What geolocation hands us when it is denied
pub const LOCATION_ERROR: &str = "Error";

pub const SCORE_EXPLANATION: &str = "Inspection scores are captured during routine inspections of food \
facilities. All routine inspections start at 100 and begin counting down as violations are \
observed. A perfect score is 100 and can range all the way down to 0, with a \"passing\" score \
being 70 or above.";
