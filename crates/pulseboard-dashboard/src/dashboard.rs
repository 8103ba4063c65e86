use std::sync::Arc;

use tracing::{debug, info};

use pulseboard_core::{DashboardDescriptor, Layout, PluginEntry};
use pulseboard_emitter::Emitter;
use pulseboard_plugins::{bind_all, PluginRegistry};
use pulseboard_scheduler::{JobHandle, JobScheduler};
use pulseboard_widget::{ComponentRegistry, Widget};

use crate::assets::AssetBundle;
use crate::error::Result;
use crate::render::{RenderModel, WidgetRenderModel};
use crate::DashboardError;

/// A fully assembled dashboard: resolved widgets, plugin bindings, and the
/// job scheduler feeding the dashboard's publish topic.
///
/// Construction is a pure synchronous pass — nothing runs until
/// [`initialise`](Self::initialise). The dashboard name doubles as the
/// emitter topic.
pub struct Dashboard {
    name: String,
    layout: Layout,
    widgets: Vec<Widget>,
    plugin_entries: Vec<PluginEntry>,
    plugin_registry: Arc<PluginRegistry>,
    scheduler: JobScheduler,
    initialised: bool,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("name", &self.name)
            .field("initialised", &self.initialised)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Validate the descriptor and resolve every widget reference, in
    /// descriptor order.
    ///
    /// Fail-fast: the first unresolvable reference aborts construction with
    /// the attempted reference and resolution base path in the error. No
    /// partial dashboard is observable and no I/O has happened yet.
    pub fn new(
        descriptor: DashboardDescriptor,
        components: &ComponentRegistry,
        plugins: Arc<PluginRegistry>,
        emitter: Arc<dyn Emitter>,
    ) -> Result<Self> {
        descriptor.validate()?;

        let mut widgets = Vec::with_capacity(descriptor.widgets.len());
        for (index, entry) in descriptor.widgets.iter().enumerate() {
            widgets.push(Widget::from_entry(index, entry, components)?);
        }

        let scheduler = JobScheduler::new(descriptor.name.clone(), emitter);

        debug!(dashboard = %descriptor.name, widgets = widgets.len(), "dashboard constructed");

        Ok(Self {
            name: descriptor.name,
            layout: descriptor.layout,
            widgets,
            plugin_entries: descriptor.plugins,
            plugin_registry: plugins,
            scheduler,
            initialised: false,
        })
    }

    /// Activate the dashboard.
    ///
    /// Order of operations: plugins register first (serialized, in
    /// descriptor order, first fault aborts), then every widget with a job
    /// gets its schedule started. A second call is a no-op — activation is
    /// not meant to stack.
    pub async fn initialise(&mut self) -> Result<()> {
        if self.initialised {
            debug!(dashboard = %self.name, "initialise called twice, ignoring");
            return Ok(());
        }

        bind_all(&self.plugin_registry, &self.plugin_entries).await?;

        for widget in &self.widgets {
            if let Some(spec) = widget.job() {
                self.scheduler.start(widget.id(), spec);
            }
        }

        self.initialised = true;
        info!(
            dashboard = %self.name,
            widgets = self.widgets.len(),
            jobs = self.scheduler.handles().len(),
            plugins = self.plugin_entries.len(),
            "dashboard initialised"
        );
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The resolved widgets, in descriptor order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Active job schedules — one per widget that declared a job. Empty
    /// before `initialise`.
    pub fn jobs(&self) -> &[JobHandle] {
        self.scheduler.handles()
    }

    /// Aggregate asset references across all widgets: widget order, then
    /// per-widget declaration order, no deduplication.
    pub fn assets(&self) -> AssetBundle {
        AssetBundle::collect(&self.widgets)
    }

    /// Project the current state for the templating layer.
    ///
    /// Every widget must supply non-empty markup; style may be empty.
    pub fn to_render_model(&self) -> Result<RenderModel> {
        let mut widgets = Vec::with_capacity(self.widgets.len());
        for widget in &self.widgets {
            let markup = widget.markup();
            if markup.is_empty() {
                return Err(DashboardError::MissingMarkup {
                    widget_id: widget.id().to_string(),
                });
            }
            widgets.push(WidgetRenderModel {
                id: widget.id().to_string(),
                position: widget.position(),
                markup,
                css: widget.style(),
            });
        }

        Ok(RenderModel {
            name: self.name.clone(),
            layout: self.layout,
            widgets,
        })
    }

    /// Stop every job schedule. In-flight invocations finish on their own
    /// and discard their results; no partial teardown is left running.
    pub fn shutdown(&self) {
        self.scheduler.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;
    use pulseboard_core::{
        JobError, JobRunner, JobSpec, Position, WidgetAssets, WidgetComponent, WidgetEntry,
        WidgetSource,
    };
    use pulseboard_plugins::{Plugin, PluginError};
    use serde_json::json;
    use tokio::time::sleep;

    // ── test fixtures ───────────────────────────────────────────────────────

    #[derive(Default)]
    struct CaptureEmitter {
        published: Mutex<Vec<(String, String, serde_json::Value)>>,
    }

    impl CaptureEmitter {
        fn published(&self) -> Vec<(String, String, serde_json::Value)> {
            self.published.lock().unwrap().clone()
        }
    }

    impl Emitter for CaptureEmitter {
        fn publish(&self, dashboard_id: &str, widget_id: &str, payload: &serde_json::Value) {
            self.published.lock().unwrap().push((
                dashboard_id.to_string(),
                widget_id.to_string(),
                payload.clone(),
            ));
        }
    }

    /// Component with configurable markup/assets and an optional job.
    struct StubWidget {
        markup: String,
        style: String,
        assets: WidgetAssets,
        job: Option<JobSpec>,
    }

    impl StubWidget {
        fn plain() -> Self {
            Self {
                markup: "<div>stub</div>".to_string(),
                style: ".stub {}".to_string(),
                assets: WidgetAssets::default(),
                job: None,
            }
        }

        fn with_assets(js: &[&str], css: &[&str]) -> Self {
            let mut stub = Self::plain();
            stub.assets = WidgetAssets {
                js: js.iter().map(|s| s.to_string()).collect(),
                css: css.iter().map(|s| s.to_string()).collect(),
            };
            stub
        }

        fn with_job(runner: Arc<dyn JobRunner>, interval_secs: u64) -> Self {
            let mut stub = Self::plain();
            stub.job = Some(JobSpec::new(runner, interval_secs));
            stub
        }
    }

    impl WidgetComponent for StubWidget {
        fn markup(&self) -> String {
            self.markup.clone()
        }
        fn style(&self) -> String {
            self.style.clone()
        }
        fn job(&self) -> Option<JobSpec> {
            self.job.clone()
        }
        fn assets(&self) -> WidgetAssets {
            self.assets.clone()
        }
    }

    struct FixedRunner {
        value: serde_json::Value,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl JobRunner for FixedRunner {
        async fn run(&self) -> std::result::Result<serde_json::Value, JobError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            sleep(self.delay).await;
            Ok(self.value.clone())
        }
    }

    struct CountingPlugin {
        registrations: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Plugin for CountingPlugin {
        async fn register(
            &self,
            _options: &serde_json::Value,
        ) -> std::result::Result<(), PluginError> {
            self.registrations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct RefusingPlugin;

    #[async_trait::async_trait]
    impl Plugin for RefusingPlugin {
        async fn register(
            &self,
            _options: &serde_json::Value,
        ) -> std::result::Result<(), PluginError> {
            Err(PluginError::InvalidOptions("missing api key".to_string()))
        }
    }

    // ── descriptor builder ──────────────────────────────────────────────────

    struct DescriptorBuilder {
        descriptor: DashboardDescriptor,
    }

    impl DescriptorBuilder {
        fn new(name: &str) -> Self {
            Self {
                descriptor: DashboardDescriptor {
                    name: name.to_string(),
                    layout: Layout { rows: 4, columns: 5 },
                    widgets: Vec::new(),
                    plugins: Vec::new(),
                },
            }
        }

        fn widget(mut self, component: StubWidget) -> Self {
            self.descriptor.widgets.push(WidgetEntry {
                name: None,
                position: Position::default(),
                widget: WidgetSource::Instance(Arc::new(component)),
            });
            self
        }

        fn widget_ref(mut self, reference: &str) -> Self {
            self.descriptor.widgets.push(WidgetEntry {
                name: None,
                position: Position::default(),
                widget: WidgetSource::Reference(reference.to_string()),
            });
            self
        }

        fn plugin(mut self, module: &str, options: serde_json::Value) -> Self {
            self.descriptor
                .plugins
                .push(PluginEntry { module: module.to_string(), options });
            self
        }

        fn build(self) -> DashboardDescriptor {
            self.descriptor
        }
    }

    fn build_dashboard(
        descriptor: DashboardDescriptor,
        plugins: PluginRegistry,
    ) -> (Dashboard, Arc<CaptureEmitter>) {
        let emitter = Arc::new(CaptureEmitter::default());
        let dashboard = Dashboard::new(
            descriptor,
            &ComponentRegistry::new("builtin"),
            Arc::new(plugins),
            Arc::clone(&emitter) as Arc<dyn Emitter>,
        )
        .unwrap();
        (dashboard, emitter)
    }

    // ── construction ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn widgets_preserve_descriptor_count_and_order() {
        let descriptor = DescriptorBuilder::new("ops")
            .widget(StubWidget::plain())
            .widget(StubWidget::plain())
            .widget(StubWidget::plain())
            .build();
        let (dashboard, _) = build_dashboard(descriptor, PluginRegistry::new("builtin"));

        assert_eq!(dashboard.widgets().len(), 3);
        let ids: Vec<_> = dashboard.widgets().iter().map(|w| w.id()).collect();
        assert_eq!(ids, vec!["widget-0", "widget-1", "widget-2"]);
    }

    #[tokio::test]
    async fn zero_widgets_is_a_valid_dashboard() {
        let descriptor = DescriptorBuilder::new("empty").build();
        let (dashboard, _) = build_dashboard(descriptor, PluginRegistry::new("builtin"));
        assert!(dashboard.widgets().is_empty());
    }

    #[tokio::test]
    async fn unresolvable_reference_fails_construction() {
        let descriptor = DescriptorBuilder::new("ops")
            .widget_ref("something:else")
            .build();

        let err = Dashboard::new(
            descriptor,
            &ComponentRegistry::new("/srv/widgets"),
            Arc::new(PluginRegistry::new("builtin")),
            Arc::new(CaptureEmitter::default()) as Arc<dyn Emitter>,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("something:else"));
        assert!(message.contains("/srv/widgets"));
    }

    // ── assets ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn assets_aggregate_in_order_without_dedup() {
        let descriptor = DescriptorBuilder::new("ops")
            .widget(StubWidget::with_assets(
                &["some-asset.js", "https://example.net/some.js"],
                &["some-asset.css"],
            ))
            .widget(StubWidget::with_assets(
                &["some-asset.js"],
                &["https://example.net/some.css"],
            ))
            .build();
        let (dashboard, _) = build_dashboard(descriptor, PluginRegistry::new("builtin"));

        let assets = dashboard.assets();
        assert_eq!(
            assets.js,
            vec!["some-asset.js", "https://example.net/some.js", "some-asset.js"]
        );
        assert_eq!(assets.css, vec!["some-asset.css", "https://example.net/some.css"]);
    }

    // ── plugins ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn absent_plugins_stanza_initialises_cleanly() {
        let descriptor = DescriptorBuilder::new("ops").widget(StubWidget::plain()).build();
        let (mut dashboard, _) = build_dashboard(descriptor, PluginRegistry::new("builtin"));
        dashboard.initialise().await.unwrap();
    }

    #[tokio::test]
    async fn each_plugin_entry_registers_exactly_once() {
        let registrations = Arc::new(AtomicUsize::new(0));
        let mut plugins = PluginRegistry::new("builtin");
        let counter = Arc::clone(&registrations);
        plugins.register(
            "some-modulename",
            Box::new(move || Arc::new(CountingPlugin { registrations: Arc::clone(&counter) })),
        );

        let descriptor = DescriptorBuilder::new("ops")
            .plugin("some-modulename", json!({ "foo": "bar" }))
            .build();
        let (mut dashboard, _) = build_dashboard(descriptor, plugins);
        dashboard.initialise().await.unwrap();

        assert_eq!(registrations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn plugin_registration_fault_aborts_initialise() {
        let mut plugins = PluginRegistry::new("builtin");
        plugins.register("refusing", Box::new(|| Arc::new(RefusingPlugin)));

        let descriptor = DescriptorBuilder::new("ops")
            .plugin("refusing", serde_json::Value::Null)
            .build();
        let (mut dashboard, _) = build_dashboard(descriptor, plugins);

        let err = dashboard.initialise().await.unwrap_err();
        assert!(matches!(err, DashboardError::Plugin(_)));
        // Nothing was activated.
        assert!(dashboard.jobs().is_empty());
    }

    #[tokio::test]
    async fn initialise_twice_does_not_stack() {
        let registrations = Arc::new(AtomicUsize::new(0));
        let mut plugins = PluginRegistry::new("builtin");
        let counter = Arc::clone(&registrations);
        plugins.register(
            "some-modulename",
            Box::new(move || Arc::new(CountingPlugin { registrations: Arc::clone(&counter) })),
        );

        let descriptor = DescriptorBuilder::new("ops")
            .plugin("some-modulename", serde_json::Value::Null)
            .build();
        let (mut dashboard, _) = build_dashboard(descriptor, plugins);

        dashboard.initialise().await.unwrap();
        dashboard.initialise().await.unwrap();

        assert_eq!(registrations.load(Ordering::SeqCst), 1);
    }

    // ── render model ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn render_model_projects_name_markup_and_css() {
        let descriptor = DescriptorBuilder::new("my-dash").widget(StubWidget::plain()).build();
        let (mut dashboard, _) = build_dashboard(descriptor, PluginRegistry::new("builtin"));
        dashboard.initialise().await.unwrap();

        let model = dashboard.to_render_model().unwrap();
        assert_eq!(model.name, "my-dash");
        assert_eq!(model.widgets.len(), 1);
        assert!(!model.widgets[0].markup.is_empty());
        assert_eq!(model.widgets[0].css, ".stub {}");
    }

    #[tokio::test]
    async fn empty_markup_fails_the_projection() {
        let mut stub = StubWidget::plain();
        stub.markup = String::new();
        let descriptor = DescriptorBuilder::new("ops").widget(stub).build();
        let (dashboard, _) = build_dashboard(descriptor, PluginRegistry::new("builtin"));

        let err = dashboard.to_render_model().unwrap_err();
        assert!(matches!(err, DashboardError::MissingMarkup { ref widget_id } if widget_id == "widget-0"));
    }

    // ── jobs & emission ─────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn job_results_reach_the_emitter_with_metadata() {
        let calls = Arc::new(AtomicUsize::new(0));
        let runner = Arc::new(FixedRunner {
            value: json!({ "value": 42 }),
            delay: Duration::from_millis(50),
            calls: Arc::clone(&calls),
        });
        let descriptor = DescriptorBuilder::new("ops")
            .widget(StubWidget::with_job(runner, 1))
            .build();
        let (mut dashboard, emitter) = build_dashboard(descriptor, PluginRegistry::new("builtin"));
        dashboard.initialise().await.unwrap();

        sleep(Duration::from_secs(2)).await;

        assert_eq!(dashboard.jobs().len(), 1);
        assert!(calls.load(Ordering::SeqCst) >= 1);

        let published = emitter.published();
        assert!(!published.is_empty());
        let (dash, widget, payload) = &published[0];
        assert_eq!(dash, "ops");
        assert_eq!(widget, "widget-0");
        assert_eq!(payload["value"], 42);
        let updated = payload["_updated"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(updated).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn widgets_without_jobs_never_publish() {
        let descriptor = DescriptorBuilder::new("ops")
            .widget(StubWidget::plain())
            .widget(StubWidget::plain())
            .widget(StubWidget::plain())
            .build();
        let (mut dashboard, emitter) = build_dashboard(descriptor, PluginRegistry::new("builtin"));
        dashboard.initialise().await.unwrap();

        sleep(Duration::from_secs(10)).await;

        assert!(dashboard.jobs().is_empty());
        assert!(emitter.published().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_every_schedule() {
        let calls = Arc::new(AtomicUsize::new(0));
        let runner = Arc::new(FixedRunner {
            value: json!({}),
            delay: Duration::from_millis(10),
            calls: Arc::clone(&calls),
        });
        let descriptor = DescriptorBuilder::new("ops")
            .widget(StubWidget::with_job(Arc::clone(&runner) as Arc<dyn JobRunner>, 1))
            .widget(StubWidget::with_job(runner, 1))
            .build();
        let (mut dashboard, _) = build_dashboard(descriptor, PluginRegistry::new("builtin"));
        dashboard.initialise().await.unwrap();

        sleep(Duration::from_secs(1)).await;
        dashboard.shutdown();
        sleep(Duration::from_secs(1)).await;

        let after_shutdown = calls.load(Ordering::SeqCst);
        sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_shutdown);
        assert!(dashboard.jobs().iter().all(|j| j.is_finished()));
    }
}
