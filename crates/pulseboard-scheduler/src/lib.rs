//! `pulseboard-scheduler` — per-widget recurring job driver.
//!
//! # Overview
//!
//! Each widget with a job gets one Tokio task that invokes the job,
//! publishes successful results to the emitter with a freshness stamp, and
//! sleeps the configured interval *measured from completion* before the
//! next run. Overlap protection falls out of the loop shape: the task
//! awaits the job before it ever arms the next tick, so a widget can never
//! have two invocations in flight (single-flight).
//!
//! # Per-widget state machine
//!
//! `Stopped → Scheduled → Running → Scheduled → … → Stopped`
//!
//! `Stopped` is both initial (before the dashboard activates) and terminal
//! (after teardown). Stopping cancels a pending tick immediately; an
//! in-flight run is allowed to finish but its result is discarded.

pub mod freshness;
pub mod scheduler;

pub use freshness::{stamp, UPDATED_KEY};
pub use scheduler::{JobHandle, JobScheduler};
