use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::component::WidgetComponent;
use crate::error::{CoreError, Result};

/// Grid dimensions of a dashboard. Both sides must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub rows: u32,
    pub columns: u32,
}

/// Grid placement of a single widget. Coordinates are cell-based and
/// zero-origin; `w`/`h` are spans in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Where a widget's implementation comes from.
///
/// A descriptor document can only name a [`Reference`](Self::Reference) —
/// a registry key resolved at dashboard construction. The
/// [`Instance`](Self::Instance) mode exists for programmatic assembly
/// (builders, tests) where the component is already in hand.
#[derive(Clone)]
pub enum WidgetSource {
    /// A registry key to be resolved by the component registry.
    Reference(String),
    /// An already-instantiated component, used as-is.
    Instance(Arc<dyn WidgetComponent>),
}

impl fmt::Debug for WidgetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(r) => f.debug_tuple("Reference").field(r).finish(),
            Self::Instance(_) => f.write_str("Instance(<component>)"),
        }
    }
}

impl<'de> Deserialize<'de> for WidgetSource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Descriptor documents always carry a plain string reference.
        let reference = String::deserialize(deserializer)?;
        Ok(WidgetSource::Reference(reference))
    }
}

impl From<&str> for WidgetSource {
    fn from(reference: &str) -> Self {
        WidgetSource::Reference(reference.to_string())
    }
}

/// One widget slot in a descriptor: a placement plus the component source.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetEntry {
    /// Optional stable name. When absent the widget id is derived from
    /// descriptor order (`widget-0`, `widget-1`, …).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Position,
    pub widget: WidgetSource,
}

/// One plugin slot in a descriptor. `options` is opaque to the core and
/// handed verbatim to the resolved plugin's `register`.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginEntry {
    pub module: String,
    #[serde(default)]
    pub options: serde_json::Value,
}

/// The declarative dashboard document.
///
/// `name` doubles as the publish-subscribe topic for the dashboard's live
/// update channel. Widget and plugin order is significant and preserved.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardDescriptor {
    pub name: String,
    pub layout: Layout,
    /// A dashboard with zero widgets is valid.
    #[serde(default)]
    pub widgets: Vec<WidgetEntry>,
    /// An absent plugins stanza is a no-op, not an error.
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

impl DashboardDescriptor {
    /// Parse a descriptor from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptor: DashboardDescriptor = serde_json::from_str(json)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Check structural invariants the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CoreError::InvalidDescriptor("name must not be empty".into()));
        }
        if self.layout.rows == 0 || self.layout.columns == 0 {
            return Err(CoreError::InvalidDescriptor(format!(
                "layout must be at least 1x1, got {}x{}",
                self.layout.rows, self.layout.columns
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_parses_minimal_document() {
        let descriptor = DashboardDescriptor::from_json(
            r#"{ "name": "ops", "layout": { "rows": 4, "columns": 5 } }"#,
        )
        .unwrap();

        assert_eq!(descriptor.name, "ops");
        assert_eq!(descriptor.layout, Layout { rows: 4, columns: 5 });
        assert!(descriptor.widgets.is_empty());
        assert!(descriptor.plugins.is_empty());
    }

    #[test]
    fn descriptor_parses_widgets_in_order() {
        let descriptor = DashboardDescriptor::from_json(
            r#"{
                "name": "ops",
                "layout": { "rows": 2, "columns": 2 },
                "widgets": [
                    { "position": { "x": 0, "y": 0, "w": 1, "h": 1 }, "widget": "clock" },
                    { "position": { "x": 1, "y": 0, "w": 1, "h": 1 }, "widget": "uptime" }
                ]
            }"#,
        )
        .unwrap();

        let refs: Vec<_> = descriptor
            .widgets
            .iter()
            .map(|w| match &w.widget {
                WidgetSource::Reference(r) => r.clone(),
                WidgetSource::Instance(_) => unreachable!(),
            })
            .collect();
        assert_eq!(refs, vec!["clock", "uptime"]);
    }

    #[test]
    fn descriptor_rejects_zero_layout() {
        let err = DashboardDescriptor::from_json(
            r#"{ "name": "ops", "layout": { "rows": 0, "columns": 5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidDescriptor(_)));
    }

    #[test]
    fn plugin_options_default_to_null() {
        let descriptor = DashboardDescriptor::from_json(
            r#"{
                "name": "ops",
                "layout": { "rows": 1, "columns": 1 },
                "plugins": [{ "module": "random-feed" }]
            }"#,
        )
        .unwrap();
        assert_eq!(descriptor.plugins.len(), 1);
        assert!(descriptor.plugins[0].options.is_null());
    }
}
