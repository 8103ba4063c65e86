use serde::Serialize;

use pulseboard_widget::Widget;

/// Every asset reference declared across a dashboard's widgets.
///
/// Pure aggregation: widget order first, per-widget declaration order
/// second, duplicates preserved, strings untouched. Local paths and
/// absolute URLs stay distinct — mapping a local reference to a servable
/// path is the asset-serving layer's job.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetBundle {
    pub js: Vec<String>,
    pub css: Vec<String>,
}

impl AssetBundle {
    pub fn collect(widgets: &[Widget]) -> Self {
        let mut bundle = AssetBundle::default();
        for widget in widgets {
            let assets = widget.assets();
            bundle.js.extend(assets.js);
            bundle.css.extend(assets.css);
        }
        bundle
    }
}
