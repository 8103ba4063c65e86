//! `pulseboard-core` — shared descriptor types and capability contracts.
//!
//! # Overview
//!
//! A dashboard is described declaratively by a [`DashboardDescriptor`]:
//! a grid layout, an ordered list of widget entries, and an optional list
//! of plugin entries. This crate holds the descriptor model, the capability
//! contracts every resolved component must satisfy ([`WidgetComponent`],
//! [`JobRunner`]), and the process configuration loaded from
//! `pulseboard.toml` with `PULSEBOARD_*` env overrides.
//!
//! The crates that consume these contracts (widget resolution, scheduling,
//! plugin binding, dashboard assembly) live in their own workspace members.

pub mod component;
pub mod config;
pub mod error;
pub mod job;
pub mod types;

pub use component::{WidgetAssets, WidgetComponent};
pub use error::{CoreError, Result};
pub use job::{JobError, JobRunner, JobSpec};
pub use types::{DashboardDescriptor, Layout, PluginEntry, Position, WidgetEntry, WidgetSource};
