use thiserror::Error;

/// Errors produced by the core crate itself (configuration and descriptor
/// parsing). Subsystem-specific failures live in their own crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration file or env overrides could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The descriptor document violates a structural invariant.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// The descriptor document is not valid JSON.
    #[error("Descriptor parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
