use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::consts::{WIND_BASE_HEADING_DEG, WIND_SWING_DEG};
use crate::error::Result;

/// A recurring callback on its own thread.
///
/// The thread stops when the handle is dropped: the stop channel is
/// disconnected and the thread is joined, so no tick runs after `drop`
/// returns.
pub struct Ticker {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = std::thread::Builder::new()
            .name("firemap-ticker".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => on_tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    fn shutdown(&mut self) {
        drop(self.stop_tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Fire-spread animation state owned by one map instance.
///
/// While running, a [`Ticker`] drives `on_tick` (typically a repaint request)
/// and each [`advance`](Self::advance) decays the speed towards 1.0 and moves
/// the wind-arrow phase forward.
pub struct SpreadAnimation {
    interval: Duration,
    speed: f32,
    elapsed_secs: f32,
    ticker: Option<Ticker>,
}

impl SpreadAnimation {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            speed: 1.0,
            elapsed_secs: 0.0,
            ticker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    /// Start ticking. Does nothing if already running.
    pub fn start<F>(&mut self, on_tick: F) -> Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        if self.ticker.is_none() {
            self.ticker = Some(Ticker::spawn(self.interval, on_tick)?);
            debug!(interval_ms = self.interval.as_millis() as u64, "animation started");
        }
        Ok(())
    }

    /// Stop ticking; the ticker thread is joined before this returns.
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            debug!("animation stopped");
        }
    }

    /// One animation frame of `dt_secs`. No-op while stopped.
    pub fn advance(&mut self, dt_secs: f32) {
        if !self.is_running() {
            return;
        }
        self.speed = self.speed * 0.99 + 0.01;
        self.elapsed_secs += dt_secs;
    }

    /// Heading in degrees of wind arrow `index`.
    pub fn wind_heading(&self, index: usize) -> f32 {
        if self.is_running() {
            WIND_BASE_HEADING_DEG + (self.elapsed_secs + index as f32).sin() * WIND_SWING_DEG
        } else {
            WIND_BASE_HEADING_DEG
        }
    }
}
