use thiserror::Error;

/// Errors raised while turning descriptor entries into live widgets.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The widget reference does not match any registered component.
    /// Fatal at dashboard construction — no partial widget list survives.
    #[error("Cannot resolve module '{reference}' (searched {base_path})")]
    ModuleResolution { reference: String, base_path: String },

    /// The widget declared a job with a zero interval.
    #[error("Widget '{widget_id}' declares a job with interval 0 (must be >= 1s)")]
    InvalidJobInterval { widget_id: String },
}

pub type Result<T> = std::result::Result<T, WidgetError>;
