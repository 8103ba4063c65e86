/// The publish boundary between the job scheduler and the outside world.
///
/// Implementations must be `Send + Sync` so a single emitter can be shared
/// across every widget schedule of every dashboard in the process. Publish
/// is fire-and-forget: the scheduler never awaits acknowledgement, and a
/// publish with no current subscribers is a silent no-op — subscriber
/// lifecycle belongs to the transport layer, not the core.
pub trait Emitter: Send + Sync {
    /// Deliver `payload` to every current subscriber of `dashboard_id`'s
    /// topic, addressed by `widget_id`.
    fn publish(&self, dashboard_id: &str, widget_id: &str, payload: &serde_json::Value);
}
