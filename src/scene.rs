// src/scene.rs
//! Renderer-agnostic map description.
//!
//! A `MapScene` is what the map builder hands to a frontend: points with styling,
//! hover content, and the base-map settings. Styling (`PointStyle`) and hover content
//! (`HoverInfo`) are separate types, so color and marker size never show up in hover text.

use serde::Serialize;

use crate::classify::ScoreCategory;
use crate::config::consts::{TITLE_ERROR, TITLE_NO_DATA, TITLE_READY};
use crate::config::options::MapOptions;
use crate::core::GeoPoint;
use crate::record::InspectionRecord;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum SceneStatus {
    Ready,
    NoData,
    Error(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseLayer {
    OpenStreetMap,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HoverInfo {
    pub name: String,
    pub score: Option<f64>,
    pub inspection_date: String,
}

impl HoverInfo {
    /// Name on the first line, then score and inspection date.
    pub fn text(&self) -> String {
        let score = self.score.map(|s| s.to_string()).unwrap_or_else(|| s!("n/a"));
        format!("{}\nScore: {}\nInspection date: {}", self.name, score, self.inspection_date)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointStyle {
    pub category: ScoreCategory,
    pub color: &'static str,
    pub marker_size: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenePoint {
    pub position: GeoPoint,
    pub style: PointStyle,
    pub hover: HoverInfo,
}

impl ScenePoint {
    pub fn from_record(record: &InspectionRecord, marker_size: f32) -> Self {
        let category = ScoreCategory::classify(record.score);
        Self {
            position: record.position(),
            style: PointStyle { category, color: category.color(), marker_size },
            hover: HoverInfo {
                name: record.name.clone(),
                score: record.score,
                inspection_date: record.inspection_date.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapScene {
    pub title: String,
    pub status: SceneStatus,
    pub center: Option<GeoPoint>,
    pub zoom: u8,
    pub height_px: u32,
    pub base_layer: BaseLayer,
    pub show_legend: bool,
    pub points: Vec<ScenePoint>,
}

impl MapScene {
    fn blank(title: &str, status: SceneStatus, center: Option<GeoPoint>, opts: &MapOptions) -> Self {
        Self {
            title: s!(title),
            status,
            center,
            zoom: opts.zoom,
            height_px: opts.height_px,
            base_layer: BaseLayer::OpenStreetMap,
            show_legend: false,
            points: Vec::new(),
        }
    }

    pub fn no_data(center: Option<GeoPoint>, opts: &MapOptions) -> Self {
        Self::blank(TITLE_NO_DATA, SceneStatus::NoData, center, opts)
    }

    pub fn error(reason: impl Into<String>, opts: &MapOptions) -> Self {
        Self::blank(TITLE_ERROR, SceneStatus::Error(reason.into()), None, opts)
    }

    pub fn ready(center: GeoPoint, points: Vec<ScenePoint>, opts: &MapOptions) -> Self {
        Self {
            points,
            ..Self::blank(TITLE_READY, SceneStatus::Ready, Some(center), opts)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Count of points per category, in Good/Passing/Failing order.
    pub fn category_counts(&self) -> [(ScoreCategory, usize); 3] {
        let count = |c: ScoreCategory| self.points.iter().filter(|p| p.style.category == c).count();
        [
            (ScoreCategory::Good, count(ScoreCategory::Good)),
            (ScoreCategory::Passing, count(ScoreCategory::Passing)),
            (ScoreCategory::Failing, count(ScoreCategory::Failing)),
        ]
    }
}
