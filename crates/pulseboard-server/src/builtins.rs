use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use pulseboard_core::{JobError, JobRunner, JobSpec, WidgetAssets, WidgetComponent};
use pulseboard_plugins::{Plugin, PluginError, PluginRegistry};
use pulseboard_widget::ComponentRegistry;

/// Register the components every installation gets for free, so a fresh
/// descriptor works without any custom code.
pub fn register_builtin_widgets(registry: &mut ComponentRegistry) {
    registry.register("clock", Box::new(|| Arc::new(ClockWidget)));
    let started = Instant::now();
    registry.register(
        "uptime",
        Box::new(move || Arc::new(UptimeWidget { started })),
    );
    registry.register("message", Box::new(|| Arc::new(MessageWidget)));
}

pub fn register_builtin_plugins(registry: &mut PluginRegistry) {
    registry.register("log-feed", Box::new(|| Arc::new(LogFeedPlugin)));
}

// ── clock ───────────────────────────────────────────────────────────────────

/// Wall-clock widget, refreshed every second.
struct ClockWidget;

impl WidgetComponent for ClockWidget {
    fn markup(&self) -> String {
        r#"<div class="clock"><span data-bind="time"></span><span data-bind="date"></span></div>"#
            .to_string()
    }

    fn style(&self) -> String {
        ".clock { font-variant-numeric: tabular-nums; }".to_string()
    }

    fn job(&self) -> Option<JobSpec> {
        Some(JobSpec::new(Arc::new(ClockJob), 1))
    }

    fn assets(&self) -> WidgetAssets {
        WidgetAssets {
            js: vec!["widgets/clock/clock.js".to_string()],
            css: vec![],
        }
    }
}

struct ClockJob;

#[async_trait]
impl JobRunner for ClockJob {
    async fn run(&self) -> Result<serde_json::Value, JobError> {
        let now = Utc::now();
        Ok(json!({
            "time": now.format("%H:%M:%S").to_string(),
            "date": now.format("%Y-%m-%d").to_string(),
        }))
    }
}

// ── uptime ──────────────────────────────────────────────────────────────────

/// Process uptime, refreshed every five seconds.
struct UptimeWidget {
    started: Instant,
}

impl WidgetComponent for UptimeWidget {
    fn markup(&self) -> String {
        r#"<div class="uptime"><span data-bind="uptime_secs"></span>s</div>"#.to_string()
    }

    fn job(&self) -> Option<JobSpec> {
        Some(JobSpec::new(Arc::new(UptimeJob { started: self.started }), 5))
    }
}

struct UptimeJob {
    started: Instant,
}

#[async_trait]
impl JobRunner for UptimeJob {
    async fn run(&self) -> Result<serde_json::Value, JobError> {
        Ok(json!({ "uptime_secs": self.started.elapsed().as_secs() }))
    }
}

// ── message ─────────────────────────────────────────────────────────────────

/// Static banner with no job — useful as a placeholder slot.
struct MessageWidget;

impl WidgetComponent for MessageWidget {
    fn markup(&self) -> String {
        r#"<div class="message"><span data-bind="text">pulseboard</span></div>"#.to_string()
    }
}

// ── plugins ─────────────────────────────────────────────────────────────────

/// Demonstration plugin: announces its options at registration time.
struct LogFeedPlugin;

#[async_trait]
impl Plugin for LogFeedPlugin {
    async fn register(&self, options: &serde_json::Value) -> Result<(), PluginError> {
        info!(options = %options, "log-feed plugin active");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_widgets_resolve() {
        let mut registry = ComponentRegistry::new("builtin");
        register_builtin_widgets(&mut registry);

        for reference in ["clock", "uptime", "message"] {
            let component = registry.resolve(reference).unwrap();
            assert!(!component.markup().is_empty());
        }
    }

    #[tokio::test]
    async fn clock_job_emits_time_fields() {
        let value = ClockJob.run().await.unwrap();
        assert!(value["time"].is_string());
        assert!(value["date"].is_string());
    }

    #[test]
    fn builtin_plugins_resolve() {
        let mut registry = PluginRegistry::new("builtin");
        register_builtin_plugins(&mut registry);
        assert!(registry.resolve("log-feed").is_ok());
    }
}
