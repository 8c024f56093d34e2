use firemap_core::config::FiremapConfig;

use crate::app::FiremapApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::states::ViewMode;
use crate::workers;

pub fn show(ctx: &egui::Context, app: &mut FiremapApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let reload_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::R);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(
                        egui::Button::new("Open Fixtures...")
                            .shortcut_text(ctx.format_shortcut(&open_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    open_fixtures(app);
                }

                if ui.button("Save Fixtures As...").clicked() {
                    ui.close();
                    save_fixtures(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset View").clicked() {
                    ui.close();
                    app.risk_map.reset_view();
                }
                if ui.button("Clear Annotations").clicked() {
                    ui.close();
                    app.risk_map.clear_annotations();
                    app.ui_state.add_log("Annotations cleared".into());
                }
                if ui.button("Clear Selection").clicked() {
                    ui.close();
                    app.risk_map.clear_selection();
                }
            });

            ui.menu_button("View", |ui| {
                for &mode in ViewMode::ALL {
                    if ui
                        .selectable_label(app.ui_state.view == mode, mode.to_string())
                        .clicked()
                    {
                        ui.close();
                        app.ui_state.view = mode;
                    }
                }
                ui.separator();
                if ui
                    .add(
                        egui::Button::new("Reload Heatmap")
                            .shortcut_text(ctx.format_shortcut(&reload_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    app.reload_from_input();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_fixtures(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&reload_shortcut)) {
            app.reload_from_input();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_fixtures(app: &mut FiremapApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadFixtures { path });
        }
    });
}

fn save_fixtures(app: &mut FiremapApp) {
    let cmd_tx = app.cmd_tx.clone();
    let fixtures = app.current_fixtures();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("fixtures.toml")
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::SaveFixtures { path, fixtures });
        }
    });
}

fn import_config(ctx: &egui::Context, app: &mut FiremapApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match FiremapConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { path, config },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        workers::send(&result_tx, &ctx, result);
    });
}

fn export_config(ctx: &egui::Context, app: &mut FiremapApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    let config = app.config.clone();

    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("firemap.toml")
            .save_file()
        else {
            return;
        };
        let message = match config
            .to_toml_string()
            .map_err(|e| e.to_string())
            .and_then(|s| std::fs::write(&path, s).map_err(|e| e.to_string()))
        {
            Ok(()) => WorkerResult::Log {
                message: format!("Config exported to {}", path.display()),
            },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to export config: {e}"),
            },
        };
        workers::send(&result_tx, &ctx, message);
    });
}
