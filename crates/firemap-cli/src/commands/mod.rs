pub mod config;
pub mod fixtures;
pub mod heatmap;
pub mod layers;
pub mod search;

use std::path::Path;

use anyhow::{Context, Result};
use firemap_core::config::FiremapConfig;
use firemap_core::provider::Fixtures;

/// Config from `path`, or defaults plus environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<FiremapConfig> {
    match path {
        Some(path) => FiremapConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(FiremapConfig::from_env_or_default()),
    }
}

/// Entity fixtures: explicit path first, then `[map].fixtures`, then the
/// built-in sample set.
pub fn load_fixtures(path: Option<&Path>, config: &FiremapConfig) -> Result<Fixtures> {
    match path.or(config.map.fixtures.as_deref()) {
        Some(path) => Fixtures::load(path)
            .with_context(|| format!("Failed to load fixtures from {}", path.display())),
        None => Ok(Fixtures::sample()),
    }
}
