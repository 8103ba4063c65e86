use std::fmt;
use std::sync::Arc;

use pulseboard_core::{JobSpec, Position, WidgetAssets, WidgetComponent, WidgetEntry, WidgetSource};

use crate::error::{Result, WidgetError};
use crate::registry::ComponentRegistry;

/// A positioned, resolved widget instance.
///
/// Built once at dashboard construction and never recreated in place — a
/// changed descriptor implies a new dashboard. The component handle is
/// shared with the scheduler task driving this widget's job, if any.
#[derive(Clone)]
pub struct Widget {
    id: String,
    position: Position,
    component: Arc<dyn WidgetComponent>,
}

impl Widget {
    /// Resolve a descriptor entry into a live widget.
    ///
    /// `index` is the entry's position in descriptor order, used to derive
    /// an id when the entry carries no explicit name.
    pub fn from_entry(
        index: usize,
        entry: &WidgetEntry,
        registry: &ComponentRegistry,
    ) -> Result<Self> {
        let component = match &entry.widget {
            WidgetSource::Reference(reference) => registry.resolve(reference)?,
            WidgetSource::Instance(component) => Arc::clone(component),
        };

        let id = entry
            .name
            .clone()
            .unwrap_or_else(|| format!("widget-{index}"));

        let widget = Self { id, position: entry.position, component };
        widget.validate()?;
        Ok(widget)
    }

    /// Wrap an already-instantiated component directly.
    pub fn from_component(
        id: impl Into<String>,
        position: Position,
        component: Arc<dyn WidgetComponent>,
    ) -> Result<Self> {
        let widget = Self { id: id.into(), position, component };
        widget.validate()?;
        Ok(widget)
    }

    fn validate(&self) -> Result<()> {
        if let Some(job) = self.component.job() {
            if job.interval_secs == 0 {
                return Err(WidgetError::InvalidJobInterval { widget_id: self.id.clone() });
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn markup(&self) -> String {
        self.component.markup()
    }

    pub fn style(&self) -> String {
        self.component.style()
    }

    pub fn job(&self) -> Option<JobSpec> {
        self.component.job()
    }

    pub fn assets(&self) -> WidgetAssets {
        self.component.assets()
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.id)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
