// src/gui/components/map_view.rs
//
// Draws the current MapScene: OSM tiles around the scene center at the scene zoom,
// one filled circle per point in its category color, and a tooltip for the point
// under the pointer. A scene without points shows its title only.

use eframe::egui::{self, Color32, Pos2, Rect, RichText, Sense, Stroke, Vec2};

use crate::config::consts::TILE_SIZE;
use crate::core::geo::{tiles_covering, to_world_px};
use crate::gui::app::App;
use crate::scene::{MapScene, SceneStatus};

// Screen radius per unit of marker size.
const MARKER_SCALE: f32 = 2.0;
const HOVER_SLOP: f32 = 4.0;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading(&app.scene.title);

    match &app.scene.status {
        SceneStatus::Error(reason) => {
            ui.label(RichText::new(reason).color(ui.visuals().error_fg_color));
        }
        SceneStatus::Ready => {
            let counts: Vec<String> = app
                .scene
                .category_counts()
                .iter()
                .map(|(cat, n)| format!("{n} {}", cat.label()))
                .collect();
            ui.label(counts.join(" · "));
        }
        SceneStatus::NoData => {}
    }

    let size = Vec2::new(ui.available_width(), app.scene.height_px as f32);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

    let Some(center) = app.scene.center.filter(|_| !app.scene.is_empty()) else {
        ui.painter().rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
        return;
    };

    let zoom = app.scene.zoom;
    let (cx, cy) = to_world_px(center, zoom);
    let min = (cx - f64::from(rect.width()) / 2.0, cy - f64::from(rect.height()) / 2.0);
    let max = (min.0 + f64::from(rect.width()), min.1 + f64::from(rect.height()));

    // world px → screen
    let to_screen = |x: f64, y: f64| rect.min + Vec2::new((x - min.0) as f32, (y - min.1) as f32);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

    let ctx = ui.ctx().clone();
    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    for id in tiles_covering(min, max, zoom) {
        if let Some(tex) = app.tiles.get(&ctx, id) {
            let (ox, oy) = id.origin_px();
            let tile_rect = Rect::from_min_size(to_screen(ox, oy), Vec2::splat(TILE_SIZE as f32));
            painter.image(tex.id(), tile_rect, uv, Color32::WHITE);
        }
    }
    if app.tiles.pending() > 0 {
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }

    let screen_points = project_points(&app.scene, &to_screen);
    for (pos, radius, color) in &screen_points {
        painter.circle_filled(*pos, *radius, *color);
        painter.circle_stroke(*pos, *radius, Stroke::new(0.5, Color32::from_gray(40)));
    }

    painter.text(
        rect.right_bottom() - Vec2::new(4.0, 2.0),
        egui::Align2::RIGHT_BOTTOM,
        "© OpenStreetMap contributors",
        egui::FontId::proportional(10.0),
        Color32::from_gray(60),
    );

    if let Some(hover) = response.hover_pos() {
        if let Some(ix) = nearest_point(&screen_points, hover) {
            let text = app.scene.points[ix].hover.text();
            response.on_hover_ui_at_pointer(|ui| {
                ui.label(text);
            });
        }
    }
}

fn project_points(
    scene: &MapScene,
    to_screen: &dyn Fn(f64, f64) -> Pos2,
) -> Vec<(Pos2, f32, Color32)> {
    scene
        .points
        .iter()
        .map(|p| {
            let (x, y) = to_world_px(p.position, scene.zoom);
            let [r, g, b] = p.style.category.rgb();
            (to_screen(x, y), p.style.marker_size * MARKER_SCALE, Color32::from_rgb(r, g, b))
        })
        .collect()
}

/// Index of the topmost point under `pos`. Later points draw on top, so search from the end.
fn nearest_point(points: &[(Pos2, f32, Color32)], pos: Pos2) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .rev()
        .find(|(_, (p, r, _))| p.distance(pos) <= r + HOVER_SLOP)
        .map(|(i, _)| i)
}
