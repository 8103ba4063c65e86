use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

use pulseboard_core::{JobRunner, JobSpec};
use pulseboard_emitter::Emitter;

use crate::freshness;

/// Drives every scheduled job of one dashboard.
///
/// One Tokio task per widget with a job; tasks are fully independent of
/// each other — a slow or failing job delays and affects only its own
/// widget. The emitter is an injected shared dependency, never a global.
pub struct JobScheduler {
    dashboard_id: String,
    emitter: Arc<dyn Emitter>,
    handles: Vec<JobHandle>,
}

impl JobScheduler {
    pub fn new(dashboard_id: impl Into<String>, emitter: Arc<dyn Emitter>) -> Self {
        Self {
            dashboard_id: dashboard_id.into(),
            emitter,
            handles: Vec::new(),
        }
    }

    /// Start a widget's recurring schedule.
    ///
    /// The first invocation happens immediately — no initial delay — so a
    /// freshly activated dashboard populates as soon as the jobs settle.
    pub fn start(&mut self, widget_id: &str, spec: JobSpec) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run_schedule(
            self.dashboard_id.clone(),
            widget_id.to_string(),
            Arc::clone(&spec.runner),
            Duration::from_secs(spec.interval_secs),
            Arc::clone(&self.emitter),
            shutdown_rx,
        ));

        info!(
            dashboard = %self.dashboard_id,
            widget = %widget_id,
            interval_secs = spec.interval_secs,
            "job schedule started"
        );

        self.handles.push(JobHandle {
            id: Uuid::new_v4(),
            widget_id: widget_id.to_string(),
            interval_secs: spec.interval_secs,
            shutdown: shutdown_tx,
            task,
        });
    }

    /// Active schedules, in start order (one per widget that declared a job).
    pub fn handles(&self) -> &[JobHandle] {
        &self.handles
    }

    /// Signal every schedule to stop.
    ///
    /// Pending ticks are cancelled right away; in-flight invocations finish
    /// on their own and discard their results. No partial teardown — every
    /// handle is signalled even if some tasks already exited.
    pub fn stop_all(&self) {
        for handle in &self.handles {
            handle.stop();
        }
        if !self.handles.is_empty() {
            info!(dashboard = %self.dashboard_id, count = self.handles.len(), "all job schedules stopped");
        }
    }
}

impl Drop for JobScheduler {
    fn drop(&mut self) {
        self.stop_all();
    }
}

/// Control handle for one widget's running schedule.
pub struct JobHandle {
    id: Uuid,
    widget_id: String,
    interval_secs: u64,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl JobHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Request the schedule to stop. Idempotent; never blocks.
    pub fn stop(&self) {
        // send() fails only when the task already exited — nothing to stop.
        let _ = self.shutdown.send(true);
    }

    /// True once the schedule task has fully wound down.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// The per-widget schedule loop.
///
/// Single-flight is structural: the job is awaited before the next tick is
/// armed, and the interval is measured from completion — a run that
/// outlasts the interval delays the next tick instead of overlapping or
/// queueing it.
async fn run_schedule(
    dashboard_id: String,
    widget_id: String,
    runner: Arc<dyn JobRunner>,
    interval: Duration,
    emitter: Arc<dyn Emitter>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let outcome = runner.run().await;

        // Stopped while the run was in flight — discard whatever it produced.
        if *shutdown.borrow() {
            debug!(widget = %widget_id, "schedule stopped mid-run, result discarded");
            break;
        }

        match outcome {
            Ok(value) => {
                let payload = freshness::stamp(value, Utc::now());
                emitter.publish(&dashboard_id, &widget_id, &payload);
            }
            Err(e) => {
                // Recovered locally: no payload this tick, schedule keeps going.
                warn!(widget = %widget_id, error = %e, "job invocation failed");
            }
        }

        tokio::select! {
            _ = sleep(interval) => {}
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    debug!(widget = %widget_id, "job schedule wound down");
}
