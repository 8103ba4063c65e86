use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use pulseboard_core::WidgetComponent;

use crate::error::{Result, WidgetError};

/// Produces a fresh component instance for each widget slot that names it.
///
/// Each slot gets its own instance so per-widget state (counters, cached
/// datasource handles) is never shared between two placements of the same
/// component type.
pub type WidgetFactory = Box<dyn Fn() -> Arc<dyn WidgetComponent> + Send + Sync>;

/// Maps reference strings to component factories.
///
/// This is the capability-based replacement for filesystem module loading:
/// the composition root registers every known component under its name, and
/// an unknown reference fails fast with full diagnostics instead of
/// half-loading.
pub struct ComponentRegistry {
    factories: HashMap<String, WidgetFactory>,
    /// Human-readable description of where references are looked up,
    /// included in resolution errors (e.g. the configured widget root).
    base_path: String,
}

impl ComponentRegistry {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            factories: HashMap::new(),
            base_path: base_path.into(),
        }
    }

    /// Register a factory under `reference`. A later registration with the
    /// same reference replaces the earlier one.
    pub fn register(&mut self, reference: impl Into<String>, factory: WidgetFactory) {
        let reference = reference.into();
        debug!(widget = %reference, "widget component registered");
        self.factories.insert(reference, factory);
    }

    /// Instantiate the component behind `reference`.
    pub fn resolve(&self, reference: &str) -> Result<Arc<dyn WidgetComponent>> {
        match self.factories.get(reference) {
            Some(factory) => Ok(factory()),
            None => Err(WidgetError::ModuleResolution {
                reference: reference.to_string(),
                base_path: self.base_path.clone(),
            }),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Registered reference names, sorted for deterministic output.
    pub fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self.factories.keys().cloned().collect();
        refs.sort();
        refs
    }
}
