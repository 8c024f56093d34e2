use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};
use firemap_core::annotation::ShapeExtent;
use firemap_core::consts::DRAFT_OUTLINE;
use firemap_core::drawing::{CursorHint, MapTool, PointerOutcome};
use firemap_core::geometry::{Rgba, SurfaceBox, SurfacePoint};
use firemap_core::layers::ids;
use firemap_core::risk_map::{BaseView, RiskMap, Scene};
use firemap_core::search::EntityKind;
use firemap_core::viewport::SurfaceTransform;
use tracing::debug;

use crate::app::FiremapApp;
use crate::convert::{color32, faded32, surface_rect, to_pos2, to_screen_pos};

const INCIDENT_RADIUS: f32 = 8.0;
const STATION_HALF: f32 = 5.0;
const WIND_ARROW_LEN: f32 = 24.0;
const MARKER_HIT_PX: f32 = 10.0;

pub fn show(ctx: &egui::Context, app: &mut FiremapApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, Sense::click_and_drag());

        route_pointer(ui, &response, rect, app);

        let surface = content_box(rect, app.risk_map.viewport().transform());
        if response.hovered() {
            let icon = match app.risk_map.drawing().tool().cursor() {
                CursorHint::Default => egui::CursorIcon::Default,
                CursorHint::Grab if app.risk_map.drawing().is_panning() => {
                    egui::CursorIcon::Grabbing
                }
                CursorHint::Grab => egui::CursorIcon::Grab,
                CursorHint::Crosshair => egui::CursorIcon::Crosshair,
            };
            ui.ctx().set_cursor_icon(icon);
        }

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_gray(20));
        paint_scene(&painter, &app.risk_map, &surface);

        let label = format!("{} · {}", app.risk_map.base_view, app.risk_map.timeframe);
        painter.text(
            rect.left_top() + egui::vec2(8.0, 8.0),
            Align2::LEFT_TOP,
            label,
            FontId::proportional(14.0),
            Color32::from_white_alpha(200),
        );

        if app.risk_map.is_animating() {
            ctx.request_repaint();
        }
    });
}

/// Screen box of the map content after the viewport transform, scaled about
/// the panel centre.
fn content_box(rect: Rect, transform: SurfaceTransform) -> SurfaceBox {
    let center = rect.center();
    let origin = center
        + (rect.min - center) * transform.scale
        + egui::vec2(transform.translate_x, transform.translate_y);
    SurfaceBox::new(
        to_screen_pos(origin),
        rect.width() * transform.scale,
        rect.height() * transform.scale,
    )
}

/// Feed raw pointer events to the risk map. Presses start a gesture only on
/// the map; moves outside it end the gesture with the leave policy.
fn route_pointer(ui: &egui::Ui, response: &egui::Response, rect: Rect, app: &mut FiremapApp) {
    let (pos, pressed, released, moved) = ui.input(|i| {
        (
            i.pointer.hover_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.delta() != egui::Vec2::ZERO,
        )
    });
    let surface = content_box(rect, app.risk_map.viewport().transform());

    if pressed && response.hovered() {
        if let Some(pos) = pos {
            app.risk_map.pointer_down(to_screen_pos(pos), &surface);
        }
    }

    let drawing = app.risk_map.drawing();
    let active = drawing.is_drawing() || drawing.is_panning();
    if active {
        let inside = pos.is_some_and(|p| rect.contains(p));
        let outcome = if released {
            Some(app.risk_map.pointer_up(pos.map(to_screen_pos), &surface))
        } else if !inside {
            Some(app.risk_map.pointer_leave(pos.map(to_screen_pos), &surface))
        } else {
            if moved {
                if let Some(pos) = pos {
                    app.risk_map.pointer_move(to_screen_pos(pos), &surface);
                }
            }
            None
        };
        match outcome {
            Some(PointerOutcome::Committed(id)) => {
                app.ui_state.add_log(format!("Annotation {id} added"));
            }
            Some(PointerOutcome::Discarded) => {
                debug!("draft discarded on leave");
            }
            _ => {}
        }
    }

    if response.clicked() && app.risk_map.tool() == MapTool::Select {
        if let Some(pos) = pos {
            let hit = {
                let scene = app.risk_map.scene();
                hit_test(&scene, &surface, pos)
            };
            if let Some((kind, id)) = hit {
                app.risk_map.click_marker(kind, &id);
            }
        }
    }
}

/// Topmost marker under `pos`: stations, then incidents, then zones.
fn hit_test(scene: &Scene<'_>, surface: &SurfaceBox, pos: Pos2) -> Option<(EntityKind, String)> {
    let near = |p: SurfacePoint| to_pos2(surface.to_screen(p)).distance(pos) <= MARKER_HIT_PX;

    if let Some(mark) = scene.stations.iter().rev().find(|m| near(m.station.point)) {
        return Some((EntityKind::Station, mark.station.id.clone()));
    }
    if let Some(mark) = scene.incidents.iter().rev().find(|m| near(m.incident.point)) {
        return Some((EntityKind::Incident, mark.incident.id.clone()));
    }
    let at = surface.to_surface_percent(to_screen_pos(pos));
    scene
        .zones
        .iter()
        .rev()
        .find(|m| m.zone.bbox.contains(at))
        .map(|m| (EntityKind::Zone, m.zone.id.clone()))
}

fn base_color(view: BaseView) -> Color32 {
    match view {
        BaseView::Satellite => Color32::from_rgb(38, 52, 40),
        BaseView::Terrain => Color32::from_rgb(196, 182, 150),
        BaseView::Street => Color32::from_rgb(226, 226, 222),
    }
}

fn paint_scene(painter: &egui::Painter, map: &RiskMap, surface: &SurfaceBox) {
    let scene = map.scene();
    let scale = scene.transform.scale;
    let screen = |p: SurfacePoint| to_pos2(surface.to_screen(p));
    let content = surface_rect(surface);

    painter.rect_filled(content, 0.0, base_color(map.base_view));
    let grid = Stroke::new(1.0, Color32::from_black_alpha(24));
    for i in 1..10 {
        let t = i as f32 * 10.0;
        painter.line_segment(
            [screen(SurfacePoint::new(t, 0.0)), screen(SurfacePoint::new(t, 100.0))],
            grid,
        );
        painter.line_segment(
            [screen(SurfacePoint::new(0.0, t)), screen(SurfacePoint::new(100.0, t))],
            grid,
        );
    }

    for mark in &scene.zones {
        let b = mark.zone.bbox;
        let rect = Rect::from_two_pos(
            screen(SurfacePoint::new(b.left, b.top)),
            screen(SurfacePoint::new(b.right(), b.bottom())),
        );
        let stroke = if mark.selected {
            Stroke::new(3.0, Color32::WHITE)
        } else {
            Stroke::new(2.0, faded32(mark.zone.risk_level.border(), mark.opacity))
        };
        painter.rect(
            rect,
            4.0,
            faded32(mark.zone.risk_level.fill(), mark.opacity),
            stroke,
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.center_top() + egui::vec2(0.0, 4.0),
            Align2::CENTER_TOP,
            &mark.zone.name,
            FontId::proportional(12.0 * scale.max(0.8)),
            Color32::from_white_alpha((230.0 * mark.opacity) as u8),
        );
    }

    let elapsed = map.animation().elapsed_secs();
    for mark in &scene.incidents {
        let center = screen(mark.incident.point);
        let color = mark.incident.marker_color();
        if map.is_animating() {
            let phase = (elapsed * 0.8).fract();
            let ring = (INCIDENT_RADIUS + phase * 14.0) * scale;
            painter.circle_stroke(
                center,
                ring,
                Stroke::new(2.0, faded32(color, mark.opacity * (1.0 - phase))),
            );
        }
        painter.circle_filled(center, INCIDENT_RADIUS * scale, faded32(color, mark.opacity));
        if mark.selected {
            painter.circle_stroke(center, (INCIDENT_RADIUS + 3.0) * scale, Stroke::new(2.0, Color32::WHITE));
        }
    }

    let station_color = map
        .layers()
        .get(ids::WEATHER_STATIONS)
        .map(|l| l.color_tag.rgba())
        .unwrap_or(Rgba::opaque(59, 130, 246));
    for mark in &scene.stations {
        let center = screen(mark.station.point);
        let rect = Rect::from_center_size(center, egui::vec2(STATION_HALF * 2.0, STATION_HALF * 2.0) * scale);
        painter.rect_filled(rect, 1.0, faded32(station_color, mark.opacity));
        if mark.selected {
            painter.rect_stroke(rect.expand(2.0), 1.0, Stroke::new(2.0, Color32::WHITE), egui::StrokeKind::Outside);
        }
    }

    for arrow in &scene.wind_arrows {
        let start = screen(arrow.position);
        let heading = arrow.heading_deg.to_radians();
        let dir = egui::vec2(heading.sin(), -heading.cos());
        let tip = start + dir * WIND_ARROW_LEN * scale;
        let stroke = Stroke::new(2.0, Color32::from_white_alpha((255.0 * arrow.opacity) as u8));
        painter.arrow(start, tip - start, stroke);
    }

    for annotation in scene.annotations {
        paint_shape(
            painter,
            surface,
            annotation.anchor(),
            annotation.extent(),
            color32(annotation.color()),
            Stroke::new(2.0, color32(annotation.color().with_alpha(255))),
        );
    }

    if let Some(draft) = scene.draft {
        if let Some(extent) = draft.extent() {
            paint_shape(
                painter,
                surface,
                draft.anchor(),
                extent,
                faded32(draft.color(), 0.5),
                Stroke::new(2.0, color32(DRAFT_OUTLINE)),
            );
        }
    }
}

fn paint_shape(
    painter: &egui::Painter,
    surface: &SurfaceBox,
    anchor: SurfacePoint,
    extent: ShapeExtent,
    fill: Color32,
    stroke: Stroke,
) {
    let a = to_pos2(surface.to_screen(anchor));
    match extent {
        ShapeExtent::Radius(r) => {
            let radius = r / 100.0 * surface.width;
            painter.circle(a, radius, fill, stroke);
        }
        ShapeExtent::Corner(corner) => {
            let rect = Rect::from_two_pos(a, to_pos2(surface.to_screen(corner)));
            painter.rect(rect, 0.0, fill, stroke, egui::StrokeKind::Middle);
        }
    }
}
