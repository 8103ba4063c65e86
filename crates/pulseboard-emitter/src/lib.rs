//! `pulseboard-emitter` — the publish boundary for widget job results.
//!
//! The scheduler only ever talks to the [`Emitter`] trait: fire-and-forget
//! publication of a payload to a dashboard-scoped topic. The concrete
//! [`BroadcastEmitter`] fans updates out to WebSocket subscribers via
//! per-dashboard `tokio::sync::broadcast` channels; tests substitute their
//! own capturing implementations.

pub mod broadcast;
pub mod emitter;
pub mod types;

pub use broadcast::BroadcastEmitter;
pub use emitter::Emitter;
pub use types::WidgetUpdate;
