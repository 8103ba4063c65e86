use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{PluginError, Result};
use crate::plugin::Plugin;

/// Produces a fresh plugin instance per dashboard that names it.
pub type PluginFactory = Box<dyn Fn() -> Arc<dyn Plugin> + Send + Sync>;

/// Maps plugin names to factories, mirroring the widget component registry.
pub struct PluginRegistry {
    factories: HashMap<String, PluginFactory>,
    /// Included in resolution errors for diagnostics.
    base_path: String,
}

impl PluginRegistry {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            factories: HashMap::new(),
            base_path: base_path.into(),
        }
    }

    /// Register a factory under `name`, replacing any earlier registration.
    pub fn register(&mut self, name: impl Into<String>, factory: PluginFactory) {
        let name = name.into();
        debug!(plugin = %name, "plugin factory registered");
        self.factories.insert(name, factory);
    }

    /// Instantiate the plugin behind `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Plugin>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(PluginError::Resolution {
                name: name.to_string(),
                base_path: self.base_path.clone(),
            }),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}
