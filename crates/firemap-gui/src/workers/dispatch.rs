use std::sync::mpsc;

use crate::messages::{WorkerCommand, WorkerResult};

use super::fetch::SourceCache;
use super::{fetch, io};

/// Spawn the worker thread. Returns the command sender.
///
/// If the thread cannot be started the error is logged and commands sent
/// on the returned channel are dropped.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    let spawned = std::thread::Builder::new()
        .name("firemap-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        });
    if let Err(e) = spawned {
        tracing::error!(error = %e, "failed to spawn worker thread");
    }

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut sources = SourceCache::default();

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::FetchPoints { ticket, api } => {
                fetch::handle_fetch_points(ticket, &api, &mut sources, &tx, &ctx);
            }
            WorkerCommand::LoadFixtures { path } => {
                io::handle_load_fixtures(&path, &tx, &ctx);
            }
            WorkerCommand::SaveFixtures { path, fixtures } => {
                io::handle_save_fixtures(&path, &fixtures, &tx, &ctx);
            }
        }
    }
}
