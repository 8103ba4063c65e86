use async_trait::async_trait;

use crate::error::Result;

/// Capability contract for a dashboard-level plugin.
///
/// Any object satisfying this trait is acceptable regardless of how it was
/// constructed. `register` is called exactly once per descriptor entry,
/// awaited to completion before the next plugin's registration starts.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Activate the plugin with the descriptor's opaque options document.
    async fn register(&self, options: &serde_json::Value) -> Result<()>;
}
