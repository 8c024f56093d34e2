use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use firemap_core::provider::Fixtures;

#[derive(Args)]
pub struct FixturesArgs {
    /// Write fixtures to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the sample zones, incidents and stations as TOML, as a
/// starting point for `[map].fixtures`.
pub fn run(args: &FixturesArgs) -> Result<()> {
    let fixtures = Fixtures::sample();

    if let Some(ref path) = args.output {
        fixtures
            .save(path)
            .with_context(|| format!("Failed to write fixtures to {}", path.display()))?;
        println!(
            "{} sample entities saved to {}",
            fixtures.len(),
            path.display()
        );
    } else {
        print!("{}", fixtures.to_toml_string()?);
    }

    Ok(())
}
