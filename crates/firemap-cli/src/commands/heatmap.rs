use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use firemap_core::config::FiremapConfig;
use firemap_core::heatmap::{
    HeatmapDate, HeatmapPanel, HttpPointSource, PanelSettings, RecordingRenderer, ReloadOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::summary;

#[derive(Args)]
pub struct HeatmapArgs {
    /// Date to fetch (YYYY-MM-DD); defaults to `[heatmap].default_date`
    #[arg(short, long)]
    pub date: Option<String>,

    /// Backend base URL, overriding the config and FIREMAP_API_URL
    #[arg(long)]
    pub url: Option<String>,

    /// Write the points as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: Option<PathBuf>,

    /// Show the N highest-risk points
    #[arg(long, default_value = "10")]
    pub top: usize,
}

pub fn run(args: &HeatmapArgs, config: &FiremapConfig) -> Result<()> {
    let mut api = config.api.clone();
    if let Some(ref url) = args.url {
        api.base_url = url.clone();
    }

    let settings = PanelSettings::from_config(&config.heatmap)?;
    let date: HeatmapDate = match args.date {
        Some(ref d) => d.parse()?,
        None => settings.default_date,
    };

    let source = HttpPointSource::new(&api)?;
    let mut panel = HeatmapPanel::new(RecordingRenderer::new(), settings);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(format!("Fetching {} from {}", date, source.endpoint()));
    pb.enable_steady_tick(Duration::from_millis(100));

    match panel.reload_for(&source, date) {
        ReloadOutcome::Applied { points } => {
            pb.finish_with_message(format!("{} points for {}", points, date));
        }
        ReloadOutcome::Failed(message) => {
            pb.abandon_with_message("Fetch failed");
            bail!("Heatmap fetch for {} failed: {}", date, message);
        }
        ReloadOutcome::Stale => {
            pb.abandon();
            bail!("Heatmap response for {} was superseded", date);
        }
    }

    summary::print_heatmap(&panel, args.top);

    if let (Some(path), Some(source)) = (&args.geojson, panel.source()) {
        std::fs::write(path, source.to_json_string()?)
            .with_context(|| format!("Failed to write GeoJSON to {}", path.display()))?;
        println!("GeoJSON saved to {}", path.display());
    }

    Ok(())
}
