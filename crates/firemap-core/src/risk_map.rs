use std::fmt;

use tracing::debug;

use crate::animation::SpreadAnimation;
use crate::annotation::{Annotation, Draft};
use crate::config::MapConfig;
use crate::consts::WIND_ARROW_COUNT;
use crate::drawing::{DrawingEngine, MapTool, PointerOutcome};
use crate::entities::{FireIncident, RiskZone, WeatherStation};
use crate::error::Result;
use crate::geometry::{ScreenPos, SurfaceBox, SurfacePoint};
use crate::layers::{ids, LayerRegistry};
use crate::provider::{EntityProvider, Fixtures};
use crate::search::{search, EntityKind, SearchHit, Selection};
use crate::viewport::{SurfaceTransform, Viewport, ZoomDirection};

/// Data horizon shown on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timeframe {
    #[default]
    Current,
    Forecast6h,
    Forecast24h,
}

impl Timeframe {
    pub const ALL: &[Self] = &[Self::Current, Self::Forecast6h, Self::Forecast24h];
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "Current"),
            Self::Forecast6h => write!(f, "6hr Forecast"),
            Self::Forecast24h => write!(f, "24hr Forecast"),
        }
    }
}

/// Base imagery style under the overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BaseView {
    #[default]
    Satellite,
    Terrain,
    Street,
}

impl BaseView {
    pub const ALL: &[Self] = &[Self::Satellite, Self::Terrain, Self::Street];
}

impl fmt::Display for BaseView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satellite => write!(f, "Satellite"),
            Self::Terrain => write!(f, "Terrain"),
            Self::Street => write!(f, "Street"),
        }
    }
}

pub struct ZoneMark<'a> {
    pub zone: &'a RiskZone,
    pub opacity: f32,
    pub selected: bool,
}

pub struct IncidentMark<'a> {
    pub incident: &'a FireIncident,
    pub opacity: f32,
    pub selected: bool,
}

pub struct StationMark<'a> {
    pub station: &'a WeatherStation,
    pub opacity: f32,
    pub selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindArrow {
    pub position: SurfacePoint,
    pub heading_deg: f32,
    pub opacity: f32,
}

/// Everything the surface should draw for one frame, in paint order.
pub struct Scene<'a> {
    pub transform: SurfaceTransform,
    /// Ids of the layers that contributed content, in registry order.
    pub rendered_layers: Vec<&'a str>,
    pub zones: Vec<ZoneMark<'a>>,
    pub incidents: Vec<IncidentMark<'a>>,
    pub stations: Vec<StationMark<'a>>,
    pub wind_arrows: Vec<WindArrow>,
    pub annotations: &'a [Annotation],
    pub draft: Option<&'a Draft>,
}

/// The interactive risk map: viewport, annotations, layers, search and
/// selection over one entity provider.
pub struct RiskMap {
    provider: Box<dyn EntityProvider + Send>,
    viewport: Viewport,
    drawing: DrawingEngine,
    layers: LayerRegistry,
    selection: Selection,
    query: String,
    animation: SpreadAnimation,
    pub timeframe: Timeframe,
    pub base_view: BaseView,
}

impl Default for RiskMap {
    fn default() -> Self {
        Self::new(Box::new(Fixtures::sample()), &MapConfig::default())
    }
}

impl RiskMap {
    pub fn new(provider: Box<dyn EntityProvider + Send>, config: &MapConfig) -> Self {
        Self {
            provider,
            viewport: Viewport::default(),
            drawing: DrawingEngine::new(config.leave_policy),
            layers: LayerRegistry::default(),
            selection: Selection::default(),
            query: String::new(),
            animation: SpreadAnimation::new(config.animation_interval()),
            timeframe: Timeframe::default(),
            base_view: BaseView::default(),
        }
    }

    pub fn provider(&self) -> &dyn EntityProvider {
        self.provider.as_ref()
    }

    /// Swap the entity source. Selections are cleared since ids may not exist
    /// in the new data.
    pub fn set_provider(&mut self, provider: Box<dyn EntityProvider + Send>) {
        self.provider = provider;
        self.selection.clear();
        self.query.clear();
    }

    // Viewport

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        self.viewport.zoom(direction);
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    // Tools and pointer events

    pub fn tool(&self) -> MapTool {
        self.drawing.tool()
    }

    pub fn set_tool(&mut self, tool: MapTool) {
        self.drawing.set_tool(tool);
    }

    pub fn drawing(&self) -> &DrawingEngine {
        &self.drawing
    }

    pub fn drawing_mut(&mut self) -> &mut DrawingEngine {
        &mut self.drawing
    }

    pub fn pointer_down(&mut self, pos: ScreenPos, surface: &SurfaceBox) {
        self.drawing.pointer_down(pos, surface);
    }

    pub fn pointer_move(&mut self, pos: ScreenPos, surface: &SurfaceBox) {
        self.drawing.pointer_move(pos, surface, &mut self.viewport);
    }

    pub fn pointer_up(&mut self, pos: Option<ScreenPos>, surface: &SurfaceBox) -> PointerOutcome {
        self.drawing.pointer_up(pos, surface)
    }

    pub fn pointer_leave(&mut self, pos: Option<ScreenPos>, surface: &SurfaceBox) -> PointerOutcome {
        self.drawing.pointer_leave(pos, surface)
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.drawing.annotations()
    }

    pub fn clear_annotations(&mut self) {
        self.drawing.clear();
    }

    pub fn remove_annotation(&mut self, id: &str) -> bool {
        self.drawing.remove(id)
    }

    // Layers

    pub fn layers(&self) -> &LayerRegistry {
        &self.layers
    }

    pub fn toggle_layer(&mut self, id: &str) -> bool {
        self.layers.toggle(id)
    }

    pub fn set_layer_opacity(&mut self, id: &str, value: f32) -> bool {
        self.layers.set_opacity(id, value)
    }

    // Search and selection

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn search_results(&self) -> Vec<SearchHit> {
        search(self.provider.as_ref(), &self.query)
    }

    /// Select a search result and clear the query.
    pub fn choose(&mut self, hit: &SearchHit) {
        debug!(kind = %hit.kind, id = %hit.id, "search result chosen");
        self.selection.select(hit.kind, &hit.id);
        self.query.clear();
    }

    /// Marker click: toggles the selection of that entity.
    pub fn click_marker(&mut self, kind: EntityKind, id: &str) {
        self.selection.toggle(kind, id);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_zone(&self) -> Option<&RiskZone> {
        self.selection
            .zone
            .as_deref()
            .and_then(|id| self.provider.find_zone(id))
    }

    pub fn selected_incident(&self) -> Option<&FireIncident> {
        self.selection
            .incident
            .as_deref()
            .and_then(|id| self.provider.find_incident(id))
    }

    pub fn selected_station(&self) -> Option<&WeatherStation> {
        self.selection
            .station
            .as_deref()
            .and_then(|id| self.provider.find_station(id))
    }

    // Animation

    pub fn animation(&self) -> &SpreadAnimation {
        &self.animation
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }

    /// Start or stop the fire-spread animation. `on_tick` runs on the ticker
    /// thread for every tick while running.
    pub fn set_animating<F>(&mut self, running: bool, on_tick: F) -> Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        if running {
            self.animation.start(on_tick)
        } else {
            self.animation.stop();
            Ok(())
        }
    }

    pub fn advance_animation(&mut self, dt_secs: f32) {
        self.animation.advance(dt_secs);
    }

    // Rendering

    pub fn scene(&self) -> Scene<'_> {
        let mut rendered_layers = Vec::new();

        let zones = match self.layers.visible_opacity(ids::RISK_ZONES) {
            Some(opacity) => {
                rendered_layers.push(ids::RISK_ZONES);
                self.provider
                    .list_zones()
                    .iter()
                    .map(|zone| ZoneMark {
                        zone,
                        opacity,
                        selected: self.selection.is_selected(EntityKind::Zone, &zone.id),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let incidents = match self.layers.visible_opacity(ids::FIRE_INCIDENTS) {
            Some(opacity) => {
                rendered_layers.push(ids::FIRE_INCIDENTS);
                self.provider
                    .list_incidents()
                    .iter()
                    .map(|incident| IncidentMark {
                        incident,
                        opacity,
                        selected: self
                            .selection
                            .is_selected(EntityKind::Incident, &incident.id),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let stations = match self.layers.visible_opacity(ids::WEATHER_STATIONS) {
            Some(opacity) => {
                rendered_layers.push(ids::WEATHER_STATIONS);
                self.provider
                    .list_stations()
                    .iter()
                    .map(|station| StationMark {
                        station,
                        opacity,
                        selected: self.selection.is_selected(EntityKind::Station, &station.id),
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let wind_arrows = match self.layers.visible_opacity(ids::WIND_PATTERNS) {
            Some(opacity) => {
                rendered_layers.push(ids::WIND_PATTERNS);
                (0..WIND_ARROW_COUNT)
                    .map(|i| WindArrow {
                        position: SurfacePoint::new(
                            15.0 + i as f32 * 10.0,
                            20.0 + (i % 3) as f32 * 20.0,
                        ),
                        heading_deg: self.animation.wind_heading(i),
                        opacity,
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Scene {
            transform: self.viewport.transform(),
            rendered_layers,
            zones,
            incidents,
            stations,
            wind_arrows,
            annotations: self.drawing.annotations(),
            draft: self.drawing.draft(),
        }
    }
}
