use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::debug;

use crate::{emitter::Emitter, types::WidgetUpdate};

/// Default per-topic buffer when none is configured.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fanout emitter backed by one broadcast channel per dashboard.
///
/// Topics are created lazily on first subscribe or first publish. A slow
/// subscriber that falls behind the buffer loses the oldest updates — the
/// receiver sees `RecvError::Lagged` and can resync from the next update,
/// which is always a full snapshot of the widget's latest data.
pub struct BroadcastEmitter {
    topics: DashMap<String, broadcast::Sender<WidgetUpdate>>,
    capacity: usize,
}

impl BroadcastEmitter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { topics: DashMap::new(), capacity }
    }

    /// Subscribe to every future update published on `dashboard_id`'s topic.
    pub fn subscribe(&self, dashboard_id: &str) -> broadcast::Receiver<WidgetUpdate> {
        self.topic(dashboard_id).subscribe()
    }

    /// Number of live subscribers on a dashboard topic.
    pub fn subscriber_count(&self, dashboard_id: &str) -> usize {
        self.topics
            .get(dashboard_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    fn topic(&self, dashboard_id: &str) -> broadcast::Sender<WidgetUpdate> {
        self.topics
            .entry(dashboard_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for BroadcastEmitter {
    fn publish(&self, dashboard_id: &str, widget_id: &str, payload: &serde_json::Value) {
        let update = WidgetUpdate {
            widget_id: widget_id.to_string(),
            payload: payload.clone(),
        };
        // send() errors only when there are zero receivers — by contract
        // that is a silent no-op, not a fault.
        if self.topic(dashboard_id).send(update).is_err() {
            debug!(dashboard = %dashboard_id, widget = %widget_id, "publish with no subscribers");
        }
    }
}
