use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::HeatmapConfig;
use crate::consts::{CIRCLE_OPACITY_DIMMED, CIRCLE_OPACITY_NORMAL};
use crate::error::Result;

use super::client::{HeatmapDate, PointSource};
use super::geo::{FeatureCollection, GeoPoint};
use super::renderer::{FitOptions, MapRenderer, Paint, RenderLayer, Visibility};

/// Panel parameters resolved from [`HeatmapConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelSettings {
    pub default_date: HeatmapDate,
    pub initial_intensity: f32,
    pub fit: FitOptions,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            default_date: HeatmapDate::default(),
            initial_intensity: crate::consts::DEFAULT_HEATMAP_INTENSITY,
            fit: FitOptions::default(),
        }
    }
}

impl PanelSettings {
    pub fn from_config(config: &HeatmapConfig) -> Result<Self> {
        Ok(Self {
            default_date: config.default_date.parse()?,
            initial_intensity: config.initial_intensity,
            fit: FitOptions {
                padding: config.fit_padding,
                duration: Duration::from_millis(config.fit_duration_ms),
            },
        })
    }
}

/// Handle for one issued reload. Only the most recently issued ticket can
/// apply its response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReloadTicket {
    pub generation: u64,
    pub date: HeatmapDate,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReloadOutcome {
    /// The point source now holds exactly this many points for the ticket's date.
    Applied { points: usize },
    /// A newer reload was issued; the response was dropped.
    Stale,
    /// Fetch or renderer failure. The previous data stays in place.
    Failed(String),
}

/// Binds a [`MapRenderer`] to a point set and switches between point-circle
/// and density rendering.
pub struct HeatmapPanel<R: MapRenderer> {
    renderer: R,
    settings: PanelSettings,
    generation: u64,
    pending: Option<ReloadTicket>,
    shown_date: Option<HeatmapDate>,
    circle_opacity: f32,
    intensity: f32,
}

impl<R: MapRenderer> HeatmapPanel<R> {
    /// Set up the layer state: circles shown at normal opacity, density
    /// layer hidden, initial intensity. Renderer failures are logged.
    pub fn new(renderer: R, settings: PanelSettings) -> Self {
        let mut panel = Self {
            renderer,
            settings,
            generation: 0,
            pending: None,
            shown_date: None,
            circle_opacity: CIRCLE_OPACITY_NORMAL,
            intensity: settings.initial_intensity,
        };
        let init = panel
            .renderer
            .set_layer_visibility(RenderLayer::Heat, Visibility::Hidden)
            .and_then(|_| panel.renderer.set_paint(Paint::CircleOpacity(CIRCLE_OPACITY_NORMAL)))
            .and_then(|_| {
                panel
                    .renderer
                    .set_paint(Paint::HeatmapIntensity(settings.initial_intensity))
            });
        if let Err(e) = init {
            error!(error = %e, "heatmap panel initialisation failed");
        }
        panel
    }

    /// Swap in a new renderer and settings. The reload counter carries over
    /// and moves past every ticket issued so far, so responses already in
    /// flight are discarded as stale.
    pub fn reconfigure(&mut self, renderer: R, settings: PanelSettings) {
        let generation = self.generation + 1;
        *self = Self::new(renderer, settings);
        self.generation = generation;
        debug!(generation, "heatmap panel reconfigured");
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    pub fn default_date(&self) -> HeatmapDate {
        self.settings.default_date
    }

    /// Date of the data currently installed, if any.
    pub fn shown_date(&self) -> Option<HeatmapDate> {
        self.shown_date
    }

    /// Most recent reload still awaiting its response.
    pub fn pending(&self) -> Option<ReloadTicket> {
        self.pending
    }

    pub fn source(&self) -> Option<&FeatureCollection> {
        self.renderer.source()
    }

    pub fn point_count(&self) -> usize {
        self.source().map_or(0, FeatureCollection::len)
    }

    pub fn heatmap_visible(&self) -> bool {
        self.renderer.layer_visibility(RenderLayer::Heat).is_visible()
    }

    pub fn circle_opacity(&self) -> f32 {
        self.circle_opacity
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Replace the point source with `points` and fit the view to them.
    /// An empty set still replaces the source but leaves the camera alone.
    pub fn load(&mut self, date: HeatmapDate, points: &[GeoPoint]) -> Result<()> {
        let collection = FeatureCollection::from_points(points);
        let bounds = collection.bounds();
        self.renderer.set_source(collection)?;
        self.shown_date = Some(date);
        if let Some(bounds) = bounds {
            self.renderer.fit_bounds(bounds, self.settings.fit)?;
        }
        info!(%date, points = points.len(), "heatmap source replaced");
        Ok(())
    }

    /// Issue a new reload. Any earlier ticket becomes stale.
    pub fn begin_reload(&mut self, date: HeatmapDate) -> ReloadTicket {
        self.generation += 1;
        let ticket = ReloadTicket {
            generation: self.generation,
            date,
        };
        self.pending = Some(ticket);
        debug!(generation = ticket.generation, %date, "heatmap reload issued");
        ticket
    }

    pub fn is_current(&self, ticket: &ReloadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the response for `ticket` if it is still the latest request.
    pub fn complete_reload(
        &mut self,
        ticket: ReloadTicket,
        response: Result<Vec<GeoPoint>>,
    ) -> ReloadOutcome {
        if !self.is_current(&ticket) {
            warn!(
                generation = ticket.generation,
                latest = self.generation,
                date = %ticket.date,
                "discarding stale heatmap response"
            );
            return ReloadOutcome::Stale;
        }
        self.pending = None;

        let applied = response.and_then(|points| {
            self.load(ticket.date, &points)?;
            Ok(points.len())
        });
        match applied {
            Ok(points) => ReloadOutcome::Applied { points },
            Err(e) => {
                error!(date = %ticket.date, error = %e, "heatmap reload failed");
                ReloadOutcome::Failed(e.to_string())
            }
        }
    }

    /// Fetch and apply points for `date` on the calling thread.
    pub fn reload_for(&mut self, source: &dyn PointSource, date: HeatmapDate) -> ReloadOutcome {
        let ticket = self.begin_reload(date);
        let response = source.fetch_points(&date);
        self.complete_reload(ticket, response)
    }

    /// Flip the density layer and dim the circles while it is visible.
    /// Returns the density layer visibility after the call; a failed
    /// renderer update leaves both the layer and the circles as they were.
    pub fn toggle_heatmap(&mut self) -> Visibility {
        let current = self.renderer.layer_visibility(RenderLayer::Heat);
        let next = current.flipped();
        let opacity = if next.is_visible() {
            CIRCLE_OPACITY_DIMMED
        } else {
            CIRCLE_OPACITY_NORMAL
        };

        if let Err(e) = self.renderer.set_layer_visibility(RenderLayer::Heat, next) {
            error!(error = %e, "heatmap toggle failed");
            return self.renderer.layer_visibility(RenderLayer::Heat);
        }
        match self.renderer.set_paint(Paint::CircleOpacity(opacity)) {
            Ok(()) => {
                self.circle_opacity = opacity;
                debug!(visibility = %next, circle_opacity = opacity, "heatmap toggled");
            }
            Err(e) => {
                error!(error = %e, "circle opacity update failed, reverting heatmap toggle");
                if let Err(e) = self.renderer.set_layer_visibility(RenderLayer::Heat, current) {
                    error!(error = %e, "reverting heatmap visibility failed");
                }
            }
        }
        self.renderer.layer_visibility(RenderLayer::Heat)
    }

    /// Pass `value` straight to the density layer. Not validated.
    pub fn set_heatmap_intensity(&mut self, value: f32) {
        match self.renderer.set_paint(Paint::HeatmapIntensity(value)) {
            Ok(()) => self.intensity = value,
            Err(e) => error!(error = %e, "setting heatmap intensity failed"),
        }
    }
}
