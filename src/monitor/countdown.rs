use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use log::debug;

use crate::clock::EventClock;

use super::sink::{ClockSink, TimeSource};
use super::snapshot::{Published, SnapshotCell};
use super::MonitorError;

/// One countdown loop on its own named thread.
///
/// Dropping the cancel sender disconnects the channel, which the loop
/// observes at its next wait. [`cancel`](Self::cancel) then joins, so once
/// it returns the loop will not write to the sink again.
pub struct CountdownTask {
    name: String,
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownTask {
    /// Count down to the end of the event active when the task starts.
    ///
    /// Stops by itself on a terminal state ("Event ended." or
    /// "No current event.").
    pub fn remaining(
        published: Published,
        clock: EventClock,
        time: Arc<dyn TimeSource>,
        sink: Arc<dyn ClockSink>,
        interval: Duration,
    ) -> Result<Self, MonitorError> {
        let name = format!("barotrend-remaining-{}", published.generation);
        Self::spawn(name, move |cancel| {
            let current = clock
                .current_event(&published.snapshot.events, time.now())
                .cloned();
            loop {
                let remaining = clock.time_remaining(current.as_ref(), time.now());
                sink.remaining(&remaining);
                if remaining.is_terminal() {
                    debug!(
                        "Remaining-time countdown for generation {} finished: {}",
                        published.generation, remaining
                    );
                    break;
                }
                if wait_or_cancel(&cancel, interval) {
                    break;
                }
            }
        })
    }

    /// Count down to the next event start, reading the latest snapshot each tick.
    ///
    /// Runs until cancelled: a later refresh may always add a future event.
    pub fn next_event(
        cell: Arc<SnapshotCell>,
        clock: EventClock,
        time: Arc<dyn TimeSource>,
        sink: Arc<dyn ClockSink>,
        interval: Duration,
    ) -> Result<Self, MonitorError> {
        Self::spawn("barotrend-next-event".to_string(), move |cancel| loop {
            let published = cell.load();
            sink.next_event(&clock.time_to_next(&published.snapshot.events, time.now()));
            if wait_or_cancel(&cancel, interval) {
                break;
            }
        })
    }

    fn spawn<F>(name: String, body: F) -> Result<Self, MonitorError>
    where
        F: FnOnce(Receiver<()>) + Send + 'static,
    {
        let (cancel, cancel_rx) = bounded::<()>(1);
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || body(cancel_rx))
            .map_err(MonitorError::Spawn)?;
        Ok(Self {
            name,
            cancel: Some(cancel),
            handle: Some(handle),
        })
    }

    /// Thread name, for logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the loop has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Stop the loop and wait for the thread
    pub fn cancel(mut self) -> Result<(), MonitorError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), MonitorError> {
        self.cancel.take();
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| MonitorError::ThreadPanicked(self.name.clone()))?;
        }
        Ok(())
    }
}

impl Drop for CountdownTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.shutdown();
        }
    }
}

/// Sleep for `interval` unless cancelled first. Returns true on cancel.
fn wait_or_cancel(cancel: &Receiver<()>, interval: Duration) -> bool {
    select! {
        recv(cancel) -> _ => true,
        default(interval) => false,
    }
}
