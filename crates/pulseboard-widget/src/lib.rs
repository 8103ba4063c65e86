//! `pulseboard-widget` — widget instantiation and module resolution.
//!
//! A descriptor names widgets by reference string; the
//! [`ComponentRegistry`] maps those references to factories producing
//! objects that satisfy the [`WidgetComponent`](pulseboard_core::WidgetComponent)
//! capability contract. Resolution failure is a construction-time fault
//! carrying the attempted reference and the resolution base path — never a
//! deferred runtime surprise.

pub mod error;
pub mod registry;
pub mod widget;

pub use error::{Result, WidgetError};
pub use registry::{ComponentRegistry, WidgetFactory};
pub use widget::Widget;
