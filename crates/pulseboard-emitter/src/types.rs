use serde::{Deserialize, Serialize};

/// One published widget update as it travels to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetUpdate {
    /// Which widget on the dashboard this update belongs to.
    pub widget_id: String,

    /// The job's result merged with the freshness envelope (`_updated`).
    pub payload: serde_json::Value,
}
