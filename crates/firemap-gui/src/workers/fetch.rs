use std::sync::mpsc;
use std::time::Instant;

use firemap_core::config::ApiConfig;
use firemap_core::heatmap::{HttpPointSource, PointSource, ReloadTicket};

use crate::messages::WorkerResult;

use super::{send, send_log};

/// HTTP client reused across fetches until the API settings change.
#[derive(Default)]
pub(super) struct SourceCache {
    current: Option<(ApiConfig, HttpPointSource)>,
}

impl SourceCache {
    fn get(&mut self, api: &ApiConfig) -> firemap_core::error::Result<&HttpPointSource> {
        let entry = match self.current.take() {
            Some((cached, source)) if cached == *api => (cached, source),
            _ => (api.clone(), HttpPointSource::new(api)?),
        };
        let (_, source) = self.current.insert(entry);
        Ok(source)
    }
}

pub(super) fn handle_fetch_points(
    ticket: ReloadTicket,
    api: &ApiConfig,
    sources: &mut SourceCache,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let result = sources
        .get(api)
        .and_then(|source| source.fetch_points(&ticket.date));

    if let Ok(ref points) = result {
        send_log(
            tx,
            ctx,
            format!(
                "Fetched {} points for {} in {:.0}ms",
                points.len(),
                ticket.date,
                start.elapsed().as_secs_f64() * 1000.0
            ),
        );
    }
    send(tx, ctx, WorkerResult::Points { ticket, result });
}
