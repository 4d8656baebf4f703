//! Refresh Scheduler
//!
//! Runs [`DashboardController::refresh_data`] on a fixed interval and on
//! demand, until stopped.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::controller::DashboardController;

pub struct RefreshScheduler;

impl RefreshScheduler {
    /// Start the background refresh task.
    ///
    /// The first refresh happens one full interval after start; a manual
    /// request runs one immediately without resetting the interval.
    pub fn start(controller: Arc<DashboardController>, interval: Duration) -> RefreshHandle {
        let manual = Arc::new(Notify::new());
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (cycles_tx, cycles_rx) = watch::channel(0u64);

        tracing::info!(interval_secs = interval.as_secs(), "Starting dashboard auto-refresh");

        let trigger = Arc::clone(&manual);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Skip the first immediate tick
            ticker.tick().await;

            let mut completed = 0u64;
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        tracing::debug!("Running scheduled dashboard refresh");
                    }
                    _ = trigger.notified() => {
                        tracing::debug!("Running requested dashboard refresh");
                    }
                }

                controller.refresh_data().await;
                completed += 1;
                cycles_tx.send_replace(completed);
            }

            tracing::info!(cycles = completed, "Dashboard auto-refresh stopped");
        });

        RefreshHandle {
            manual,
            shutdown: shutdown_tx,
            cycles: cycles_rx,
            task,
        }
    }
}

/// Handle to a running [`RefreshScheduler`]
pub struct RefreshHandle {
    manual: Arc<Notify>,
    shutdown: watch::Sender<bool>,
    cycles: watch::Receiver<u64>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Request an out-of-schedule refresh
    pub fn request_refresh(&self) {
        self.manual.notify_one();
    }

    /// Receiver of the completed cycle count
    pub fn cycles(&self) -> watch::Receiver<u64> {
        self.cycles.clone()
    }

    pub fn completed(&self) -> u64 {
        *self.cycles.borrow()
    }

    /// Stop scheduling and wait for an in-progress refresh to finish
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Refresh task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Harness;
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_refreshes_on_interval() {
        let h = Harness::new();
        h.controller.initialize_charts().await;

        let handle = RefreshScheduler::start(Arc::clone(&h.controller), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(125)).await;

        assert_eq!(handle.completed(), 2);
        assert_eq!(h.map.calls(), 2);
        assert_eq!(h.charts.snapshot("categoryChart").unwrap().redraws, 2);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_refresh_before_first_interval() {
        let h = Harness::new();
        let handle = RefreshScheduler::start(Arc::clone(&h.controller), Duration::from_secs(300));

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert_eq!(handle.completed(), 0);
        assert_eq!(h.map.calls(), 0);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh() {
        let h = Harness::new();
        let handle = RefreshScheduler::start(Arc::clone(&h.controller), Duration::from_secs(300));
        let mut cycles = handle.cycles();

        handle.request_refresh();
        cycles.changed().await.unwrap();

        assert_eq!(*cycles.borrow(), 1);
        assert_eq!(h.map.calls(), 1);
        assert_eq!(h.controller.status().refreshes, 1);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_refreshes() {
        let h = Harness::new();
        let handle = RefreshScheduler::start(Arc::clone(&h.controller), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(61)).await;
        handle.stop().await;
        let calls = h.map.calls();
        assert_eq!(calls, 1);

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(h.map.calls(), calls);
    }
}
