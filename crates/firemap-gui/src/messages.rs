use std::path::PathBuf;

use firemap_core::config::{ApiConfig, FiremapConfig};
use firemap_core::error::Result;
use firemap_core::heatmap::{GeoPoint, ReloadTicket};
use firemap_core::provider::Fixtures;

/// Commands sent from the UI thread to the worker thread.
pub enum WorkerCommand {
    /// Fetch the heatmap points for the ticket's date.
    FetchPoints {
        ticket: ReloadTicket,
        api: ApiConfig,
    },
    LoadFixtures {
        path: PathBuf,
    },
    SaveFixtures {
        path: PathBuf,
        fixtures: Fixtures,
    },
}

/// Results sent from the worker thread back to the UI thread.
pub enum WorkerResult {
    /// Response for a reload ticket; the panel decides whether it is still current.
    Points {
        ticket: ReloadTicket,
        result: Result<Vec<GeoPoint>>,
    },
    FixturesLoaded {
        path: PathBuf,
        fixtures: Fixtures,
    },
    FixturesSaved {
        path: PathBuf,
    },
    ConfigImported {
        path: PathBuf,
        config: FiremapConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
