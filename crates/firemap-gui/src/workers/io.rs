use std::path::Path;
use std::sync::mpsc;

use anyhow::Context;
use firemap_core::provider::Fixtures;

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_load_fixtures(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match Fixtures::load(path).with_context(|| format!("Failed to load {}", path.display())) {
        Ok(fixtures) => send(
            tx,
            ctx,
            WorkerResult::FixturesLoaded {
                path: path.to_path_buf(),
                fixtures,
            },
        ),
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}

pub(super) fn handle_save_fixtures(
    path: &Path,
    fixtures: &Fixtures,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match fixtures
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))
    {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::FixturesSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("{e:#}")),
    }
}
