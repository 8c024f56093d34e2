use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use firemap_core::config::FiremapConfig;
use firemap_core::provider::EntityProvider;
use firemap_core::search::{search, EntityKind};

use crate::summary;

#[derive(Args)]
pub struct SearchArgs {
    /// Case-insensitive name fragment
    pub query: String,

    /// Fixture file to search instead of the configured or sample data
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Print the details of every hit
    #[arg(short, long)]
    pub details: bool,
}

pub fn run(args: &SearchArgs, config: &FiremapConfig) -> Result<()> {
    let fixtures = super::load_fixtures(args.fixtures.as_deref(), config)?;
    let hits = search(&fixtures, &args.query);

    if hits.is_empty() {
        println!("No matches for '{}'", args.query);
        return Ok(());
    }

    println!("{:>3}  {:<9}  {:<8}  {}", "#", "Kind", "Id", "Name");
    println!("{}", "-".repeat(44));
    for (i, hit) in hits.iter().enumerate() {
        println!("{:>3}  {:<9}  {:<8}  {}", i + 1, hit.kind, hit.id, hit.name);
    }

    if args.details {
        for hit in &hits {
            match hit.kind {
                EntityKind::Zone => {
                    if let Some(zone) = fixtures.find_zone(&hit.id) {
                        summary::print_zone(zone);
                    }
                }
                EntityKind::Incident => {
                    if let Some(incident) = fixtures.find_incident(&hit.id) {
                        summary::print_incident(incident);
                    }
                }
                EntityKind::Station => {
                    if let Some(station) = fixtures.find_station(&hit.id) {
                        summary::print_station(station);
                    }
                }
            }
        }
    }

    Ok(())
}
