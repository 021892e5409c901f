//! Periodic telemetry polling
//!
//! Polls run one at a time: the next tick is not taken until the current
//! poll has finished, and ticks that elapse meanwhile are skipped instead of
//! queued. Stopping the handle (or dropping it) cancels the loop, including a
//! poll that is in flight.

use super::poller::TelemetryPoller;
use parking_lot::Mutex;
use rclink_core::{LinkListenerHandle, Snapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Counters kept by a running scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollStats {
    /// Polls that produced a snapshot
    pub completed: u64,
    /// Polls that ended in an error
    pub failed: u64,
    /// Most recent snapshot
    pub last_snapshot: Option<Snapshot>,
}

/// Starts repeating polls
pub struct PollScheduler;

impl PollScheduler {
    /// Poll `request` every `interval` until the returned handle is stopped
    ///
    /// The first poll starts immediately. A zero interval is raised to 1ms.
    pub fn start(
        poller: TelemetryPoller,
        request: impl Into<String>,
        interval: Duration,
        listener: LinkListenerHandle,
    ) -> PollHandle {
        let request = request.into();
        let interval = interval.max(Duration::from_millis(1));
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let stats = Arc::new(Mutex::new(PollStats::default()));
        let task_stats = Arc::clone(&stats);

        tracing::info!(
            "Polling {} every {}ms",
            poller.target(),
            interval.as_millis()
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                tokio::select! {
                    _ = stop_rx.changed() => break,
                    result = poller.poll(&request) => match result {
                        Ok(snapshot) => {
                            {
                                let mut stats = task_stats.lock();
                                stats.completed += 1;
                                stats.last_snapshot = Some(snapshot.clone());
                            }
                            listener.on_snapshot(&snapshot).await;
                        }
                        Err(e) => {
                            task_stats.lock().failed += 1;
                            listener.on_error(&e).await;
                        }
                    },
                }
            }

            tracing::info!("Telemetry polling stopped");
        });

        PollHandle {
            stop_tx,
            task: Some(task),
            stats,
        }
    }
}

/// Control handle for a running scheduler
pub struct PollHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    stats: Arc<Mutex<PollStats>>,
}

impl PollHandle {
    /// Whether the polling loop is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Copy of the current counters
    pub fn stats(&self) -> PollStats {
        self.stats.lock().clone()
    }

    /// Most recent snapshot, if any poll has succeeded
    pub fn last_snapshot(&self) -> Option<Snapshot> {
        self.stats.lock().last_snapshot.clone()
    }

    /// Cancel the loop and wait for it to wind down
    pub async fn stop(mut self) -> PollStats {
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Polling task ended abnormally: {}", e);
            }
        }
        self.stats()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
    }
}
