// src/builder.rs
//
// Location in, MapScene out. Every failure (bad coordinates, failed or empty fetch)
// becomes a titled, empty scene; nothing is returned as an error.

use crate::config::options::{AppOptions, MapOptions};
use crate::core::sanitize::parse_finite;
use crate::core::GeoPoint;
use crate::error::{Axis, CoordinateError};
use crate::fetch::{Fetched, Fetcher};
use crate::progress::Progress;
use crate::record::InspectionTable;
use crate::scene::{MapScene, ScenePoint};

/// A built scene plus the table it was drawn from, for frontends that list records too.
#[derive(Clone, Debug)]
pub struct MapBuild {
    pub scene: MapScene,
    pub table: InspectionTable,
}

/// Parse a latitude/longitude pair as typed or as handed over by geolocation.
pub fn parse_location(lat: &str, lon: &str) -> Result<GeoPoint, CoordinateError> {
    let parse = |axis: Axis, text: &str| {
        parse_finite(text).ok_or_else(|| CoordinateError { axis, input: s!(text) })
    };
    Ok(GeoPoint::new(parse(Axis::Latitude, lat)?, parse(Axis::Longitude, lon)?))
}

pub struct MapBuilder {
    fetcher: Fetcher,
    map: MapOptions,
}

impl MapBuilder {
    pub fn new(fetcher: Fetcher, map: MapOptions) -> Self {
        Self { fetcher, map }
    }

    /// HTTP-backed builder configured from `opts`.
    pub fn from_options(opts: &AppOptions) -> Self {
        Self::new(Fetcher::from_options(&opts.fetch), opts.map.clone())
    }

    pub fn build_map(&self, lat: &str, lon: &str) -> MapScene {
        self.build_map_with(lat, lon, None)
    }

    pub fn build_map_with(
        &self,
        lat: &str,
        lon: &str,
        progress: Option<&mut dyn Progress>,
    ) -> MapScene {
        self.build(lat, lon, progress).scene
    }

    pub fn build_map_at(&self, lat: f64, lon: f64) -> MapScene {
        self.build_at(GeoPoint::new(lat, lon), None).scene
    }

    /// Like `build_map_with`, also handing back the records behind the scene.
    pub fn build(&self, lat: &str, lon: &str, mut progress: Option<&mut dyn Progress>) -> MapBuild {
        match parse_location(lat, lon) {
            Ok(at) => self.build_at(at, progress),
            Err(e) => {
                loge!("Map: Error generating map: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.fail(&format!("Invalid location: {e}"));
                    p.finish(0);
                }
                self.failed(e.to_string())
            }
        }
    }

    fn failed(&self, reason: String) -> MapBuild {
        MapBuild { scene: MapScene::error(reason, &self.map), table: InspectionTable::empty() }
    }

    pub fn build_at(&self, at: GeoPoint, mut progress: Option<&mut dyn Progress>) -> MapBuild {
        if !at.is_finite() {
            loge!("Map: non-finite location ({}, {})", at.latitude, at.longitude);
            if let Some(p) = progress.as_deref_mut() {
                p.fail("Invalid location: not a finite point");
                p.finish(0);
            }
            return self.failed(s!("location must be finite"));
        }

        if let Some(p) = progress.as_deref_mut() {
            p.begin(at.latitude, at.longitude);
            p.log("Fetching inspections…");
        }

        let build = match self.fetcher.fetch(at.latitude, at.longitude) {
            Fetched::Data(table) if !table.is_empty() => {
                let points: Vec<ScenePoint> = table
                    .iter()
                    .map(|r| ScenePoint::from_record(r, self.map.marker_size))
                    .collect();
                logf!("Map: {} points around ({}, {})", points.len(), at.latitude, at.longitude);
                MapBuild { scene: MapScene::ready(at, points, &self.map), table }
            }
            other => {
                if let Some(e) = other.error() {
                    logd!("Map: empty scene after fetch failure: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.fail(&format!("Fetch failed: {e}"));
                    }
                }
                MapBuild { scene: MapScene::no_data(Some(at), &self.map), table: other.into_table() }
            }
        };

        if let Some(p) = progress.as_deref_mut() {
            p.finish(build.scene.points.len());
        }
        build
    }
}
