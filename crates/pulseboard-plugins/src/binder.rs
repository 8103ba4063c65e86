use pulseboard_core::PluginEntry;
use tracing::info;

use crate::error::{PluginError, Result};
use crate::registry::PluginRegistry;

/// Resolve and register every plugin entry, strictly in descriptor order.
///
/// Ordering matters: a later plugin may rely on an earlier one having
/// registered its side effects, so registrations are never concurrent.
/// The first fault — unresolvable name or failed `register` — aborts the
/// remainder and propagates. An empty entry list is a no-op.
pub async fn bind_all(registry: &PluginRegistry, entries: &[PluginEntry]) -> Result<()> {
    for entry in entries {
        let plugin = registry.resolve(&entry.module)?;
        plugin
            .register(&entry.options)
            .await
            .map_err(|e| PluginError::Registration {
                name: entry.module.clone(),
                reason: e.to_string(),
            })?;
        info!(plugin = %entry.module, "plugin registered");
    }
    Ok(())
}
