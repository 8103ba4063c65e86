//! `pulseboard-plugins` — dashboard-level shared components.
//!
//! Plugins are shared datasources or utilities registered once per
//! dashboard activation. The core's contract with a plugin is minimal and
//! capability-based: an object exposing `register(options)`. Registration
//! is strictly serialized in descriptor order because a later plugin may
//! rely on an earlier one's side effects; the first fault aborts the rest
//! of the phase.

pub mod binder;
pub mod error;
pub mod plugin;
pub mod registry;

pub use binder::bind_all;
pub use error::{PluginError, Result};
pub use plugin::Plugin;
pub use registry::{PluginFactory, PluginRegistry};
