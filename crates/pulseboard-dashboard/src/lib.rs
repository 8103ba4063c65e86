//! `pulseboard-dashboard` — descriptor to live object graph.
//!
//! # Lifecycle
//!
//! 1. [`Dashboard::new`] validates the descriptor and resolves every widget
//!    reference in one synchronous pass — fail-fast, no partial dashboard.
//! 2. [`Dashboard::initialise`] registers plugins in descriptor order, then
//!    starts one job schedule per widget with a job. Schedules run
//!    concurrently with the caller from that point on.
//! 3. [`Dashboard::to_render_model`] projects the current state for the
//!    external templating layer.
//! 4. [`Dashboard::shutdown`] stops every schedule; in-flight jobs finish
//!    and discard their results.

pub mod assets;
pub mod dashboard;
pub mod error;
pub mod render;

pub use assets::AssetBundle;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use render::{RenderModel, WidgetRenderModel};
