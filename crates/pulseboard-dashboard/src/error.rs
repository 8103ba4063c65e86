use thiserror::Error;

/// Errors surfaced by dashboard construction, activation, and rendering.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The descriptor document is structurally invalid.
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] pulseboard_core::CoreError),

    /// A widget reference could not be resolved (or declared a bad job).
    #[error("Widget error: {0}")]
    Widget(#[from] pulseboard_widget::WidgetError),

    /// Plugin resolution or registration failed during `initialise`.
    #[error("Plugin error: {0}")]
    Plugin(#[from] pulseboard_plugins::PluginError),

    /// A widget supplied no markup fragment at render time.
    #[error("Widget '{widget_id}' has no markup to render")]
    MissingMarkup { widget_id: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
