use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rgba;

/// Well-known layer ids of the risk map.
pub mod ids {
    pub const RISK_ZONES: &str = "risk-zones";
    pub const FIRE_INCIDENTS: &str = "fire-incidents";
    pub const WEATHER_STATIONS: &str = "weather-stations";
    pub const WIND_PATTERNS: &str = "wind-patterns";
    pub const EVACUATION_ROUTES: &str = "evacuation-routes";
    pub const VEGETATION: &str = "vegetation";
}

/// Colour family of a layer in the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// Per-feature colours (e.g. risk zones coloured by level).
    Multi,
    Red,
    Blue,
    Purple,
    Green,
}

impl ColorTag {
    pub fn rgba(&self) -> Rgba {
        match self {
            Self::Multi => Rgba::opaque(120, 120, 120),
            Self::Red => Rgba::opaque(220, 38, 38),
            Self::Blue => Rgba::opaque(37, 99, 235),
            Self::Purple => Rgba::opaque(147, 51, 234),
            Self::Green => Rgba::opaque(22, 163, 74),
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multi => write!(f, "multi"),
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
            Self::Purple => write!(f, "purple"),
            Self::Green => write!(f, "green"),
        }
    }
}

/// A togglable overlay. `opacity` is a percentage, nominally 0–100.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub display_name: String,
    pub enabled: bool,
    pub opacity: f32,
    pub color_tag: ColorTag,
}

impl Layer {
    pub fn new(id: &str, display_name: &str, enabled: bool, opacity: f32, color_tag: ColorTag) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            enabled,
            opacity,
            color_tag,
        }
    }

    /// Opacity as a multiplicative factor (`opacity / 100`). Not clamped.
    pub fn opacity_factor(&self) -> f32 {
        self.opacity / 100.0
    }
}

/// The canonical, ordered list of layers of one map instance.
///
/// Order is display order only. Unknown ids are ignored by every mutator.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new(vec![
            Layer::new(ids::RISK_ZONES, "Risk Zones", true, 70.0, ColorTag::Multi),
            Layer::new(ids::FIRE_INCIDENTS, "Fire Incidents", true, 100.0, ColorTag::Red),
            Layer::new(ids::WEATHER_STATIONS, "Weather Stations", true, 100.0, ColorTag::Blue),
            Layer::new(ids::WIND_PATTERNS, "Wind Patterns", false, 60.0, ColorTag::Purple),
            Layer::new(ids::EVACUATION_ROUTES, "Evacuation Routes", false, 80.0, ColorTag::Green),
            Layer::new(ids::VEGETATION, "Vegetation Density", false, 50.0, ColorTag::Green),
        ])
    }
}

impl LayerRegistry {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Flip `enabled` on the matching layer. Returns `false` if absent.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.enabled = !layer.enabled;
                true
            }
            None => false,
        }
    }

    /// Set opacity as given; callers keep it within 0–100.
    pub fn set_opacity(&mut self, id: &str, value: f32) -> bool {
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => {
                layer.opacity = value;
                true
            }
            None => false,
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.get(id).is_some_and(|l| l.enabled)
    }

    /// Opacity factor of an enabled layer; `None` when disabled or unknown.
    pub fn visible_opacity(&self, id: &str) -> Option<f32> {
        self.get(id).filter(|l| l.enabled).map(Layer::opacity_factor)
    }

    pub fn enabled_ids(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|l| l.enabled)
            .map(|l| l.id.as_str())
            .collect()
    }
}
