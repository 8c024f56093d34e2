mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "firemap", about = "Wildfire risk map engine")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (TOML); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search zones, incidents and stations by name
    Search(commands::search::SearchArgs),
    /// Show the layer set and what the map would render
    Layers(commands::layers::LayersArgs),
    /// Fetch heatmap points for a date and summarise them
    Heatmap(commands::heatmap::HeatmapArgs),
    /// Print or save the default config
    Config(commands::config::ConfigArgs),
    /// Print or save the sample entity fixtures
    Fixtures(commands::fixtures::FixturesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = commands::load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Search(args) => commands::search::run(args, &config),
        Commands::Layers(args) => commands::layers::run(args, &config),
        Commands::Heatmap(args) => commands::heatmap::run(args, &config),
        Commands::Config(args) => commands::config::run(args),
        Commands::Fixtures(args) => commands::fixtures::run(args),
    }
}
