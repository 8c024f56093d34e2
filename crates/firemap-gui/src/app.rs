use std::sync::mpsc;

use firemap_core::config::FiremapConfig;
use firemap_core::heatmap::{HeatmapDate, HeatmapPanel, PanelSettings, ReloadOutcome};
use firemap_core::provider::{EntityProvider, Fixtures};
use firemap_core::risk_map::RiskMap;
use tracing::{error, info};

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::plot_renderer::PlotRenderer;
use crate::states::{UIState, ViewMode};
use crate::workers;

pub struct FiremapApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub config: FiremapConfig,
    pub risk_map: RiskMap,
    pub heatmap: HeatmapPanel<PlotRenderer>,
    pub show_about: bool,
}

impl FiremapApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone());

        let config = FiremapConfig::from_env_or_default();
        let (settings, settings_error) = heatmap_settings(&config);
        let heatmap = HeatmapPanel::new(PlotRenderer::new(config.heatmap.point_radius), settings);

        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::new(heatmap.default_date().to_string()),
            risk_map: RiskMap::new(Box::new(Fixtures::sample()), &config.map),
            heatmap,
            config,
            show_about: false,
        };
        if let Some(message) = settings_error {
            app.ui_state.add_log(message);
        }
        if let Some(path) = app.config.map.fixtures.clone() {
            app.send_command(WorkerCommand::LoadFixtures { path });
        }
        app.request_reload(app.heatmap.default_date());
        app
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Points { ticket, result } => {
                    match self.heatmap.complete_reload(ticket, result) {
                        ReloadOutcome::Applied { points } => {
                            self.ui_state
                                .add_log(format!("Heatmap: {points} points for {}", ticket.date));
                        }
                        ReloadOutcome::Stale => {
                            self.ui_state
                                .add_log(format!("Dropped superseded response for {}", ticket.date));
                        }
                        ReloadOutcome::Failed(message) => {
                            self.ui_state.add_log(format!(
                                "ERROR: heatmap for {} failed: {message}",
                                ticket.date
                            ));
                        }
                    }
                }
                WorkerResult::FixturesLoaded { path, fixtures } => {
                    self.ui_state.add_log(format!(
                        "Loaded {} entities from {}",
                        fixtures.len(),
                        path.display()
                    ));
                    self.risk_map.set_provider(Box::new(fixtures));
                    self.ui_state.fixtures_path = Some(path);
                }
                WorkerResult::FixturesSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::ConfigImported { path, config } => {
                    self.ui_state
                        .add_log(format!("Config imported from {}", path.display()));
                    self.apply_config(config);
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Issue a heatmap fetch. Any fetch still in flight becomes stale.
    pub fn request_reload(&mut self, date: HeatmapDate) {
        let ticket = self.heatmap.begin_reload(date);
        info!(%date, generation = ticket.generation, "heatmap reload requested");
        self.send_command(WorkerCommand::FetchPoints {
            ticket,
            api: self.config.api.clone(),
        });
    }

    /// Reload for the date typed into the date field.
    pub fn reload_from_input(&mut self) {
        match self.ui_state.date_input.parse::<HeatmapDate>() {
            Ok(date) => self.request_reload(date),
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    pub fn set_animating(&mut self, ctx: &egui::Context, running: bool) {
        let ctx = ctx.clone();
        if let Err(e) = self
            .risk_map
            .set_animating(running, move || ctx.request_repaint())
        {
            error!(error = %e, "could not start spread animation");
            self.ui_state.add_log(format!("ERROR: {e}"));
        }
    }

    /// Snapshot of the entities currently on the risk map.
    pub fn current_fixtures(&self) -> Fixtures {
        let provider = self.risk_map.provider();
        Fixtures {
            zones: provider.list_zones().to_vec(),
            incidents: provider.list_incidents().to_vec(),
            stations: provider.list_stations().to_vec(),
        }
    }

    fn apply_config(&mut self, config: FiremapConfig) {
        self.risk_map
            .drawing_mut()
            .set_leave_policy(config.map.leave_policy);

        let (settings, settings_error) = heatmap_settings(&config);
        if let Some(message) = settings_error {
            self.ui_state.add_log(message);
        }
        self.heatmap
            .reconfigure(PlotRenderer::new(config.heatmap.point_radius), settings);
        self.ui_state.date_input = self.heatmap.default_date().to_string();

        if let Some(path) = config.map.fixtures.clone() {
            self.send_command(WorkerCommand::LoadFixtures { path });
        }
        self.config = config;
        self.request_reload(self.heatmap.default_date());
    }
}

/// Heatmap settings for `config`. An invalid `[heatmap]` section falls back
/// to the defaults and returns the message to log.
fn heatmap_settings(config: &FiremapConfig) -> (PanelSettings, Option<String>) {
    match PanelSettings::from_config(&config.heatmap) {
        Ok(settings) => (settings, None),
        Err(e) => (
            PanelSettings::default(),
            Some(format!("ERROR: invalid [heatmap] settings: {e}")),
        ),
    }
}

impl eframe::App for FiremapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        if self.risk_map.is_animating() {
            let dt = ctx.input(|i| i.stable_dt);
            self.risk_map.advance_animation(dt);
        }

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        match self.ui_state.view {
            ViewMode::RiskMap => {
                panels::controls::show(ctx, self);
                panels::map_view::show(ctx, self);
            }
            ViewMode::Heatmap => {
                panels::heatmap_view::show(ctx, self);
            }
        }

        // About dialog
        if self.show_about {
            egui::Window::new("About Firemap")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Firemap");
                        ui.label("Wildfire Risk Mapping");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
