//! Periodic evaluation of every patient on a tokio interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use vitals_core::config::MonitorConfig;
use vitals_core::errors::{StoreResult, VitalsErrorCode};
use vitals_observability::tracing_setup::events;
use vitals_storage::RecordStore;

use crate::evaluator::AlertEvaluator;

/// Totals reported when a monitor stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    pub cycles: u64,
    pub alerts_delivered: u64,
}

/// Drives [`AlertEvaluator::evaluate_all`] every `interval_ms`.
///
/// Evaluation runs on the blocking pool so the rayon fan-out never stalls
/// the async runtime. A tick that fires while the previous cycle is still
/// running is delayed, not queued.
pub struct Monitor {
    evaluator: Arc<AlertEvaluator>,
    config: MonitorConfig,
}

impl Monitor {
    pub fn new(evaluator: Arc<AlertEvaluator>, config: MonitorConfig) -> Self {
        Self { evaluator, config }
    }

    /// Start the loop on the current tokio runtime.
    pub fn spawn(self) -> MonitorHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let cycles = Arc::new(AtomicU64::new(0));
        let task = tokio::spawn(self.run(shutdown_rx, Arc::clone(&cycles)));
        MonitorHandle {
            shutdown: Some(shutdown_tx),
            task,
            cycles,
        }
    }

    async fn run(
        self,
        mut shutdown: oneshot::Receiver<()>,
        cycles: Arc<AtomicU64>,
    ) -> MonitorStats {
        let period = Duration::from_millis(self.config.interval_ms.max(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut stats = MonitorStats::default();

        tracing::info!(
            interval_ms = self.config.interval_ms,
            status_every = self.config.status_every,
            "monitor started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }

            let evaluator = Arc::clone(&self.evaluator);
            match tokio::task::spawn_blocking(move || evaluator.evaluate_all()).await {
                Ok(Ok(summary)) => {
                    stats.alerts_delivered += summary.alerts_delivered() as u64;
                }
                Ok(Err(e)) => {
                    tracing::error!(error = %e.coded_string(), "monitor cycle failed");
                }
                Err(e) => {
                    tracing::error!(error = %e, "monitor cycle task failed");
                }
            }

            stats.cycles += 1;
            cycles.store(stats.cycles, Ordering::Relaxed);

            if self.config.status_every > 0 && stats.cycles % self.config.status_every == 0 {
                self.report_status(stats.cycles);
            }
        }

        tracing::info!(cycles = stats.cycles, "monitor stopped");
        stats
    }

    fn report_status(&self, cycle: u64) {
        let now = chrono::Utc::now().timestamp_millis();
        match recent_readings(self.evaluator.store(), now, self.config.status_window_ms) {
            Ok((patients, readings)) => events::monitor_status(cycle, patients, readings),
            Err(e) => tracing::warn!(error = %e.coded_string(), "monitor status unavailable"),
        }
    }
}

/// Patient count and readings with `now - window <= timestamp <= now`.
pub fn recent_readings(
    store: &RecordStore,
    now: i64,
    window_ms: i64,
) -> StoreResult<(usize, usize)> {
    let start = now.saturating_sub(window_ms.max(0));
    let ids = store.patient_ids()?;
    let mut readings = 0;
    for id in &ids {
        readings += store.get_records(*id, start, now)?.len();
    }
    Ok((ids.len(), readings))
}

/// Handle to a running [`Monitor`]. Dropping the handle also stops it.
#[derive(Debug)]
pub struct MonitorHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<MonitorStats>,
    cycles: Arc<AtomicU64>,
}

impl MonitorHandle {
    /// Cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Signal the loop to stop and wait for the in-progress cycle to end.
    pub async fn stop(mut self) -> MonitorStats {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        match (&mut self.task).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(error = %e, "monitor task ended abnormally");
                MonitorStats {
                    cycles: self.cycles(),
                    alerts_delivered: 0,
                }
            }
        }
    }
}
