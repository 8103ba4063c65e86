use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// A failed job invocation.
///
/// Recovered locally by the scheduler: logged, never propagated, never
/// published. The schedule keeps running.
#[derive(Debug, Error)]
#[error("Job execution failed: {0}")]
pub struct JobError(String);

impl JobError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// The asynchronous operation behind a widget's recurring job.
///
/// `run` may suspend on external I/O (a datasource call, a subprocess) —
/// the scheduler guarantees it is never invoked while a previous invocation
/// of the same widget's job is still in flight.
#[async_trait]
pub trait JobRunner: Send + Sync {
    async fn run(&self) -> Result<serde_json::Value, JobError>;
}

/// A widget's schedule entry: what to run and how often.
///
/// The interval is measured from the *completion* of the previous
/// invocation, so a slow run delays the next tick instead of overlapping it.
#[derive(Clone)]
pub struct JobSpec {
    pub runner: Arc<dyn JobRunner>,
    /// Seconds between the end of one invocation and the start of the next.
    /// Must be at least 1; validated at dashboard construction.
    pub interval_secs: u64,
}

impl JobSpec {
    pub fn new(runner: Arc<dyn JobRunner>, interval_secs: u64) -> Self {
        Self { runner, interval_secs }
    }
}

impl fmt::Debug for JobSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobSpec")
            .field("interval_secs", &self.interval_secs)
            .finish_non_exhaustive()
    }
}
