use egui_plot::Plot;
use firemap_core::consts::HEATMAP_INTENSITY_RANGE;
use firemap_core::heatmap::ramp::{DENSITY_RAMP, RISK_RAMP};

use super::helpers::swatch;
use super::section_header;
use crate::app::FiremapApp;

pub fn show(ctx: &egui::Context, app: &mut FiremapApp) {
    egui::SidePanel::left("heatmap_controls")
        .default_width(260.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                data_section(ui, app);
                ui.separator();
                layer_section(ui, app);
                ui.separator();
                legend_section(ui, app);
            });
        });

    egui::CentralPanel::default().show(ctx, |ui| {
        let size = ui.available_size();
        let now = ui.input(|i| i.time);
        let ctx = ui.ctx().clone();
        let renderer = app.heatmap.renderer_mut();

        let response = Plot::new("heatmap_plot")
            .width(size.x)
            .height(size.y)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_grid(true)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .show(ui, |plot_ui| renderer.draw(&ctx, plot_ui, size, now));

        if let Some(tooltip) = response.inner {
            response.response.on_hover_text_at_pointer(tooltip);
        }

        if renderer.is_animating() {
            ctx.request_repaint();
        }

        if app.heatmap.source().is_none() && app.heatmap.pending().is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No heatmap data. Pick a date and press Load.")
                        .size(16.0)
                        .color(egui::Color32::from_gray(140)),
                );
            });
        }
    });
}

fn data_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    let status = app.heatmap.shown_date().map(|d| d.to_string());
    section_header(ui, "Data", status.as_deref());

    let mut submit = false;
    ui.horizontal(|ui| {
        ui.label("Date");
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.date_input)
                .hint_text("YYYY-MM-DD")
                .desired_width(110.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        if ui.button("Load").clicked() {
            submit = true;
        }
    });
    if submit {
        app.reload_from_input();
    }

    ui.label(format!("{} points", app.heatmap.point_count()));
    if let Some(ticket) = app.heatmap.pending() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(format!("Loading {}...", ticket.date));
        });
    }
    ui.small(format!("Source: {}", app.config.api.base_url));
}

fn layer_section(ui: &mut egui::Ui, app: &mut FiremapApp) {
    let visible = app.heatmap.heatmap_visible();
    section_header(ui, "Layers", Some(if visible { "density" } else { "points" }));

    let label = if visible {
        "Hide Heatmap"
    } else {
        "Show Heatmap"
    };
    if ui.button(label).clicked() {
        app.heatmap.toggle_heatmap();
    }

    let mut intensity = app.heatmap.intensity();
    if ui
        .add(
            egui::Slider::new(&mut intensity, HEATMAP_INTENSITY_RANGE)
                .step_by(0.1)
                .text("Intensity"),
        )
        .changed()
    {
        app.heatmap.set_heatmap_intensity(intensity);
    }

    ui.label(format!(
        "Circle opacity: {:.0}%",
        app.heatmap.circle_opacity() * 100.0
    ));
}

fn legend_section(ui: &mut egui::Ui, app: &FiremapApp) {
    section_header(ui, "Legend", None);

    ui.label("Point risk");
    for &(t, color) in RISK_RAMP.stops() {
        ui.horizontal(|ui| {
            swatch(ui, color);
            ui.label(format!("{t:.1}"));
        });
    }

    if app.heatmap.heatmap_visible() {
        ui.add_space(4.0);
        ui.label("Density");
        ui.horizontal(|ui| {
            for &(_, color) in DENSITY_RAMP.stops() {
                swatch(ui, color);
            }
            ui.small("low → high");
        });
    }
}
