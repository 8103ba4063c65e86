use serde::{Deserialize, Serialize};

use crate::job::JobSpec;

/// Static asset references declared by a widget.
///
/// Entries are opaque strings — either a local relative path or an absolute
/// URL — kept distinct and untransformed. Turning a local reference into a
/// servable path is the asset-serving layer's job, not the core's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetAssets {
    #[serde(default)]
    pub js: Vec<String>,
    #[serde(default)]
    pub css: Vec<String>,
}

/// Capability contract every resolved widget component must satisfy.
///
/// Implementations must be `Send + Sync` so they can be shared between the
/// dashboard's render path and the job scheduler's background tasks.
pub trait WidgetComponent: Send + Sync {
    /// The widget's render fragment. Must be non-empty for the widget to
    /// appear in a render model.
    fn markup(&self) -> String;

    /// The widget's style fragment. An empty string is valid.
    fn style(&self) -> String {
        String::new()
    }

    /// The recurring data-producing job, if this widget has one.
    fn job(&self) -> Option<JobSpec> {
        None
    }

    /// Script and stylesheet references this widget wants on the page.
    fn assets(&self) -> WidgetAssets {
        WidgetAssets::default()
    }
}

impl std::fmt::Debug for dyn WidgetComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn WidgetComponent")
    }
}
