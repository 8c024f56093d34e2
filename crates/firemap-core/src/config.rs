use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{
    ANIMATION_TICK_MS, DEFAULT_API_BASE_URL, DEFAULT_HEATMAP_DATE, DEFAULT_HEATMAP_INTENSITY,
    FIT_DURATION_MS, FIT_PADDING, POINT_RADIUS,
};
use crate::drawing::LeavePolicy;
use crate::error::Result;

/// Environment variable that overrides [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "FIREMAP_API_URL";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FiremapConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub heatmap: HeatmapConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds. `None` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub default_date: String,
    pub initial_intensity: f32,
    pub fit_padding: f32,
    pub fit_duration_ms: u64,
    pub point_radius: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            default_date: DEFAULT_HEATMAP_DATE.to_string(),
            initial_intensity: DEFAULT_HEATMAP_INTENSITY,
            fit_padding: FIT_PADDING,
            fit_duration_ms: FIT_DURATION_MS,
            point_radius: POINT_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub leave_policy: LeavePolicy,
    pub animation_tick_ms: u64,
    /// TOML fixture file replacing the built-in sample entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<PathBuf>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            leave_policy: LeavePolicy::default(),
            animation_tick_ms: ANIMATION_TICK_MS,
            fixtures: None,
        }
    }
}

impl MapConfig {
    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_tick_ms)
    }
}

impl FiremapConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env();
        debug!(path = %path.display(), base_url = %config.api.base_url, "config loaded");
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply `FIREMAP_API_URL` if set and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            self.apply_api_url_override(&url);
        }
    }

    fn apply_api_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api.base_url = url.to_string();
        }
    }
}
