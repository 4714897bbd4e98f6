// src/core/geo.rs
// Great-circle distance and Web Mercator projection for the map view.

use serde::Serialize;

use crate::config::consts::TILE_SIZE;

/// Mean Earth radius (IUGG), meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Web Mercator is undefined at the poles; tiles stop here.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Haversine distance in meters.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// World size in pixels at `zoom` (256 px tiles).
pub fn world_size_px(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(1u32 << zoom.min(30))
}

/// Project to global Web Mercator pixel coordinates at `zoom`.
pub fn to_world_px(p: GeoPoint, zoom: u8) -> (f64, f64) {
    let size = world_size_px(zoom);
    let lat = p.latitude.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (p.longitude + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of `to_world_px`.
pub fn from_world_px(x: f64, y: f64, zoom: u8) -> GeoPoint {
    let size = world_size_px(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    GeoPoint::new(lat, lon)
}

/// Slippy-map tile address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }

    /// Top-left corner in world pixels.
    pub fn origin_px(&self) -> (f64, f64) {
        (f64::from(self.x) * TILE_SIZE, f64::from(self.y) * TILE_SIZE)
    }
}

/// Tiles covering the world-pixel rectangle `[min, max]` at `zoom`.
pub fn tiles_covering(min: (f64, f64), max: (f64, f64), zoom: u8) -> Vec<TileId> {
    let count = 1u32 << zoom.min(30);
    let last = f64::from(count - 1);
    let to_tile = |v: f64| (v / TILE_SIZE).floor().clamp(0.0, last) as u32;

    let (x0, y0) = (to_tile(min.0), to_tile(min.1));
    let (x1, y1) = (to_tile(max.0), to_tile(max.1));

    let mut out = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            out.push(TileId { z: zoom, x, y });
        }
    }
    out
}
