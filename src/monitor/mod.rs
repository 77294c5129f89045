//! # Live Monitor
//!
//! Drives the pipeline and the event clock on two cadences.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐  fetch + run   ┌──────────────┐
//! │ refresh thread   │ ─────────────▶ │ SnapshotCell │ ◀── load ──┐
//! │ (minutes)        │   Arc swap     └──────────────┘            │
//! │                  │                                            │
//! │  cancel + join   │   spawn   ┌────────────────────┐   ┌────────────────────┐
//! │  stale countdown │ ────────▶ │ remaining-time     │   │ next-event ticker  │
//! └──────────────────┘           │ (until terminal)   │   │ (until stop)       │
//!                                └────────────────────┘   └────────────────────┘
//!                                          │                        │
//!                                          └──────▶ ClockSink ◀─────┘
//! ```
//!
//! Only the refresh thread produces snapshots. The remaining-time countdown
//! belongs to one generation: a new publication cancels and joins the old
//! countdown before starting the next, so two loops never race on the sink.
//!
//! A failed fetch is logged and reported to the sink; the previous snapshot
//! stays published until a later refresh succeeds.

mod countdown;
mod sink;
mod snapshot;


use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use log::{debug, info, warn};

use crate::clock::EventClock;
use crate::config::{ConfigError, MonitorConfig};
use crate::events::EventPipeline;
use crate::series::SeriesSource;

pub use countdown::CountdownTask;
pub use sink::{ClockSink, SystemClock, TimeSource};
pub use snapshot::{Published, SnapshotCell};

/// Errors from starting or stopping the monitor workers
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The OS refused to spawn a worker thread
    #[error("failed to spawn worker thread: {0}")]
    Spawn(std::io::Error),

    /// A worker thread panicked
    #[error("worker thread {0} panicked")]
    ThreadPanicked(String),

    /// Monitor intervals are invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

enum Control {
    Refresh,
}

const REFRESH_THREAD: &str = "barotrend-refresh";

/// Running refresh worker plus next-event ticker
pub struct Monitor {
    cell: Arc<SnapshotCell>,
    control: Option<Sender<Control>>,
    refresh: Option<JoinHandle<()>>,
    ticker: Option<CountdownTask>,
}

impl Monitor {
    /// Spawn the workers. The first refresh starts immediately.
    pub fn start<S>(
        source: S,
        pipeline: EventPipeline,
        clock: EventClock,
        config: MonitorConfig,
        time: Arc<dyn TimeSource>,
        sink: Arc<dyn ClockSink>,
    ) -> Result<Self, MonitorError>
    where
        S: SeriesSource + 'static,
    {
        config.validate()?;

        let cell = Arc::new(SnapshotCell::new());
        let (control, control_rx) = unbounded::<Control>();

        let worker = RefreshWorker {
            source,
            pipeline,
            clock,
            config,
            time: Arc::clone(&time),
            sink: Arc::clone(&sink),
            cell: Arc::clone(&cell),
            remaining: None,
        };
        let refresh = thread::Builder::new()
            .name(REFRESH_THREAD.to_string())
            .spawn(move || worker.run(control_rx))
            .map_err(MonitorError::Spawn)?;

        let ticker =
            CountdownTask::next_event(Arc::clone(&cell), clock, time, sink, config.tick_interval)?;

        Ok(Self {
            cell,
            control: Some(control),
            refresh: Some(refresh),
            ticker: Some(ticker),
        })
    }

    /// Latest published snapshot
    pub fn published(&self) -> Published {
        self.cell.load()
    }

    /// Ask the refresh worker to fetch now instead of waiting for the interval.
    /// Returns false if the worker has already exited.
    pub fn request_refresh(&self) -> bool {
        self.control
            .as_ref()
            .map_or(false, |c| c.send(Control::Refresh).is_ok())
    }

    /// Stop every worker and wait for them
    pub fn stop(mut self) -> Result<(), MonitorError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), MonitorError> {
        let mut result = Ok(());

        if let Some(ticker) = self.ticker.take() {
            if let Err(e) = ticker.cancel() {
                result = Err(e);
            }
        }

        self.control.take();
        if let Some(handle) = self.refresh.take() {
            if handle.join().is_err() {
                result = Err(MonitorError::ThreadPanicked(REFRESH_THREAD.to_string()));
            }
        }

        debug!("Monitor stopped at generation {}", self.cell.generation());
        result
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        if self.refresh.is_some() || self.ticker.is_some() {
            if let Err(e) = self.shutdown() {
                warn!("Monitor shutdown on drop failed: {}", e);
            }
        }
    }
}

struct RefreshWorker<S> {
    source: S,
    pipeline: EventPipeline,
    clock: EventClock,
    config: MonitorConfig,
    time: Arc<dyn TimeSource>,
    sink: Arc<dyn ClockSink>,
    cell: Arc<SnapshotCell>,
    remaining: Option<CountdownTask>,
}

impl<S: SeriesSource> RefreshWorker<S> {
    fn run(mut self, control: Receiver<Control>) {
        info!("Monitoring {}", self.source.describe());
        loop {
            self.refresh_once();
            select! {
                recv(control) -> msg => match msg {
                    Ok(Control::Refresh) => debug!("Refresh requested"),
                    Err(_) => break,
                },
                default(self.config.refresh_interval) => {}
            }
        }
        self.cancel_remaining();
    }

    fn refresh_once(&mut self) {
        let series = match self.source.fetch() {
            Ok(series) => series,
            Err(e) => {
                warn!(
                    "Refresh from {} failed, keeping generation {}: {}",
                    self.source.describe(),
                    self.cell.generation(),
                    e
                );
                self.sink.refresh_failed(&e);
                return;
            }
        };

        let snapshot = self.pipeline.run(&series);

        // the stale countdown must be gone before the new generation is visible
        self.cancel_remaining();
        let published = self.cell.publish(snapshot);
        info!(
            "Published generation {}: {}",
            published.generation, published.snapshot.stats
        );

        let state = self
            .clock
            .observe(&published.snapshot.events, self.time.now());
        self.sink.snapshot_published(&published, &state);

        match CountdownTask::remaining(
            published,
            self.clock,
            Arc::clone(&self.time),
            Arc::clone(&self.sink),
            self.config.tick_interval,
        ) {
            Ok(task) => self.remaining = Some(task),
            Err(e) => warn!("Could not start remaining-time countdown: {}", e),
        }
    }

    fn cancel_remaining(&mut self) {
        if let Some(task) = self.remaining.take() {
            let name = task.name().to_string();
            if let Err(e) = task.cancel() {
                warn!("Cancelling {} failed: {}", name, e);
            }
        }
    }
}
