//! Geo heatmap panel: backend point fetch, GeoJSON source, renderer facade
//! and the circle/density layer switch.

pub mod client;
pub mod density;
pub mod geo;
pub mod panel;
pub mod ramp;
pub mod renderer;

pub use client::{HeatmapDate, HttpPointSource, PointSource};
pub use geo::{FeatureCollection, GeoBounds, GeoPoint, LngLat, PointFeature};
pub use panel::{HeatmapPanel, PanelSettings, ReloadOutcome, ReloadTicket};
pub use renderer::{
    FitOptions, MapRenderer, Paint, RecordingRenderer, RenderLayer, RendererState, Visibility,
};
