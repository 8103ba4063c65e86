use serde::Serialize;

use pulseboard_core::{Layout, Position};

/// Read-only projection of a dashboard for the external templating layer.
///
/// Taken at the moment `to_render_model` is called — never cached, never
/// subscribed to further updates.
#[derive(Debug, Clone, Serialize)]
pub struct RenderModel {
    pub name: String,
    pub layout: Layout,
    pub widgets: Vec<WidgetRenderModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetRenderModel {
    pub id: String,
    pub position: Position,
    /// Non-empty by construction — a widget without markup fails the
    /// projection instead of rendering a hole.
    pub markup: String,
    /// May be empty.
    pub css: String,
}
