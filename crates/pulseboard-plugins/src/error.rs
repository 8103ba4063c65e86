use thiserror::Error;

/// Errors raised during the plugin phase of dashboard activation.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin name does not match any registered factory.
    #[error("Cannot resolve plugin '{name}' (searched {base_path})")]
    Resolution { name: String, base_path: String },

    /// The plugin's `register` call failed. Aborts the remainder of the
    /// plugin phase and propagates to the `initialise` caller.
    #[error("Plugin '{name}' failed to register: {reason}")]
    Registration { name: String, reason: String },

    /// The options document does not match what the plugin expects.
    #[error("Invalid plugin options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, PluginError>;
