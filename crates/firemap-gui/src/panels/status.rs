use crate::app::FiremapApp;
use crate::states::ViewMode;

pub fn show(ctx: &egui::Context, app: &mut FiremapApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| match app.ui_state.view {
            ViewMode::RiskMap => {
                let viewport = app.risk_map.viewport();
                ui.label(format!("Zoom: {}%", viewport.zoom_percent()));
                ui.separator();
                ui.label(format!("Pan: {:.0}, {:.0}", viewport.pan_x(), viewport.pan_y()));
                ui.separator();
                ui.label(format!("Tool: {}", app.risk_map.tool()));
                ui.separator();
                ui.label(format!("{} annotations", app.risk_map.annotations().len()));
                ui.separator();
                match app.ui_state.fixtures_path {
                    Some(ref path) => ui.label(format!("Fixtures: {}", path.display())),
                    None => ui.label("Fixtures: sample"),
                };
                if app.risk_map.is_animating() {
                    ui.separator();
                    ui.label("Animating");
                }
            }
            ViewMode::Heatmap => {
                match app.heatmap.shown_date() {
                    Some(date) => ui.label(format!("Date: {date}")),
                    None => ui.label("No data"),
                };
                ui.separator();
                ui.label(format!("{} points", app.heatmap.point_count()));
                if let Some(ticket) = app.heatmap.pending() {
                    ui.separator();
                    ui.spinner();
                    ui.label(format!("Loading {}...", ticket.date));
                }
            }
        });

        ui.add_space(2.0);
    });
}
