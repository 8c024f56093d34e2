use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use firemap_core::config::FiremapConfig;
use firemap_core::risk_map::RiskMap;
use tracing::warn;

use crate::summary;

#[derive(Args)]
pub struct LayersArgs {
    /// Flip a layer on or off (repeatable)
    #[arg(long, value_name = "ID")]
    pub toggle: Vec<String>,

    /// Set a layer opacity, e.g. `risk-zones=40` (repeatable)
    #[arg(long, value_name = "ID=PERCENT", value_parser = parse_opacity)]
    pub opacity: Vec<(String, f32)>,

    /// Fixture file to render instead of the configured or sample data
    #[arg(long)]
    pub fixtures: Option<PathBuf>,
}

fn parse_opacity(s: &str) -> std::result::Result<(String, f32), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=PERCENT, got '{s}'"))?;
    let value: f32 = value.trim().parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("opacity {value} is outside 0-100"));
    }
    Ok((id.trim().to_string(), value))
}

pub fn run(args: &LayersArgs, config: &FiremapConfig) -> Result<()> {
    let fixtures = super::load_fixtures(args.fixtures.as_deref(), config)?;
    let mut map = RiskMap::new(Box::new(fixtures), &config.map);

    for id in &args.toggle {
        if !map.toggle_layer(id) {
            warn!(%id, "unknown layer");
        }
    }
    for (id, value) in &args.opacity {
        if !map.set_layer_opacity(id, *value) {
            warn!(%id, "unknown layer");
        }
    }

    summary::print_layers(map.layers());
    summary::print_scene(&map.scene());
    Ok(())
}
