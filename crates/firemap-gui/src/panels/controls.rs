use firemap_core::drawing::MapTool;
use firemap_core::risk_map::{BaseView, Timeframe};
use firemap_core::search::SearchHit;
use firemap_core::viewport::ZoomDirection;

use super::helpers::{detail_row, enum_combo, swatch};
use super::section_header;
use crate::app::FiremapApp;

pub fn show(ctx: &egui::Context, app: &mut FiremapApp) {
    egui::SidePanel::left("controls")
        .default_width(280.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                search_section(ui, app);
                ui.separator();
                tools_section(ui, app);
                ui.separator();
                view_section(ui, app);
                ui.separator();
                layers_section(ui, app);
                ui.separator();
                annotations_section(ui, app);
                ui.separator();
                selection_section(ui, app);
            });
        });
}

fn search_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    section_header(ui, "Search", None);

    let mut query = app.risk_map.query().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text("Zones, incidents, stations")
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        app.risk_map.set_query(query);
    }

    let hits = app.risk_map.search_results();
    let mut chosen: Option<SearchHit> = None;
    for hit in &hits {
        ui.horizontal(|ui| {
            ui.small(hit.kind.to_string());
            if ui.link(&hit.name).clicked() {
                chosen = Some(hit.clone());
            }
        });
    }
    if !app.risk_map.query().is_empty() && hits.is_empty() {
        ui.weak("No matches");
    }
    if let Some(hit) = chosen {
        app.risk_map.choose(&hit);
    }
}

fn tools_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    section_header(ui, "Tools", None);

    let current = app.risk_map.tool();
    ui.horizontal_wrapped(|ui| {
        for &tool in MapTool::ALL {
            if ui.selectable_label(current == tool, tool.to_string()).clicked() {
                app.risk_map.set_tool(tool);
            }
        }
    });
}

fn view_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    let zoom = format!("{}%", app.risk_map.viewport().zoom_percent());
    section_header(ui, "View", Some(&zoom));

    ui.horizontal(|ui| {
        if ui.button("−").on_hover_text("Zoom out").clicked() {
            app.risk_map.zoom(ZoomDirection::Out);
        }
        if ui.button("+").on_hover_text("Zoom in").clicked() {
            app.risk_map.zoom(ZoomDirection::In);
        }
        let at_rest = app.risk_map.viewport().is_initial();
        if ui.add_enabled(!at_rest, egui::Button::new("Reset")).clicked() {
            app.risk_map.reset_view();
        }
    });

    enum_combo(ui, "Timeframe", &mut app.risk_map.timeframe, Timeframe::ALL);
    enum_combo(ui, "Base map", &mut app.risk_map.base_view, BaseView::ALL);

    let mut animating = app.risk_map.is_animating();
    if ui.checkbox(&mut animating, "Animate fire spread").changed() {
        let ctx = ui.ctx().clone();
        app.set_animating(&ctx, animating);
    }
}

fn layers_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    section_header(ui, "Layers", None);

    let layers: Vec<_> = app.risk_map.layers().iter().cloned().collect();
    for layer in layers {
        ui.horizontal(|ui| {
            swatch(ui, layer.color_tag.rgba());
            let mut enabled = layer.enabled;
            if ui.checkbox(&mut enabled, &layer.display_name).changed() {
                app.risk_map.toggle_layer(&layer.id);
            }
        });
        if layer.enabled {
            let mut opacity = layer.opacity;
            if ui
                .add(
                    egui::Slider::new(&mut opacity, 0.0..=100.0)
                        .suffix("%")
                        .text("Opacity"),
                )
                .changed()
            {
                app.risk_map.set_layer_opacity(&layer.id, opacity);
            }
        }
    }
}

fn annotations_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    let count = app.risk_map.annotations().len();
    let status = format!("{count}");
    section_header(ui, "Annotations", Some(&status));

    if count == 0 {
        ui.weak("Pick a draw tool and drag on the map");
        return;
    }

    let mut remove: Option<String> = None;
    for annotation in app.risk_map.annotations() {
        ui.horizontal(|ui| {
            swatch(ui, annotation.color());
            ui.small(annotation.to_string());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Remove").clicked() {
                    remove = Some(annotation.id().to_string());
                }
            });
        });
    }
    if let Some(id) = remove {
        app.risk_map.remove_annotation(&id);
    }

    if ui.button("Clear all").clicked() {
        app.risk_map.clear_annotations();
        app.ui_state.add_log("Annotations cleared".into());
    }
}

fn selection_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    section_header(ui, "Details", None);

    if app.risk_map.selection().is_empty() {
        ui.weak("Click a marker or a search result");
        return;
    }

    if let Some(zone) = app.risk_map.selected_zone() {
        ui.horizontal(|ui| {
            swatch(ui, zone.risk_level.fill());
            ui.strong(&zone.name);
        });
        egui::Grid::new("zone_details").num_columns(2).show(ui, |ui| {
            detail_row(ui, "Risk", zone.risk_level.label());
            detail_row(ui, "Temperature", format!("{:.0}°F", zone.temperature));
            detail_row(ui, "Humidity", format!("{:.0}%", zone.humidity));
            detail_row(ui, "Wind", format!("{:.0} mph", zone.wind_speed));
            detail_row(ui, "Updated", &zone.last_updated);
        });
        ui.add_space(4.0);
    }

    if let Some(incident) = app.risk_map.selected_incident() {
        ui.horizontal(|ui| {
            swatch(ui, incident.marker_color());
            ui.strong(&incident.name);
        });
        egui::Grid::new("incident_details").num_columns(2).show(ui, |ui| {
            detail_row(ui, "Status", incident.status);
            detail_row(ui, "Acres", incident.acres);
            detail_row(ui, "Containment", format!("{}%", incident.containment_pct));
            detail_row(ui, "Threat", incident.threat_level.label());
            detail_row(ui, "Started", &incident.start_date);
        });
        ui.add_space(4.0);
    }

    if let Some(station) = app.risk_map.selected_station() {
        ui.strong(&station.name);
        egui::Grid::new("station_details").num_columns(2).show(ui, |ui| {
            detail_row(ui, "Temperature", format!("{:.0}°F", station.temperature));
            detail_row(ui, "Humidity", format!("{:.0}%", station.humidity));
            detail_row(
                ui,
                "Wind",
                format!("{:.0} mph @ {}°", station.wind_speed, station.wind_direction_deg),
            );
            detail_row(ui, "Reading", &station.last_reading);
        });
    }

    if ui.button("Clear selection").clicked() {
        app.risk_map.clear_selection();
    }
}
