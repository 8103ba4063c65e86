use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use pulseboard_core::config::PulseboardConfig;
use pulseboard_core::DashboardDescriptor;
use pulseboard_dashboard::Dashboard;
use pulseboard_emitter::{BroadcastEmitter, Emitter};
use pulseboard_plugins::PluginRegistry;
use pulseboard_widget::ComponentRegistry;

mod app;
mod builtins;
mod ws;

#[derive(Debug, Parser)]
#[command(name = "pulseboard-server", about = "Dashboard assembly and live update server")]
struct Args {
    /// Path to pulseboard.toml (default: ./pulseboard.toml).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulseboard_server=info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = PulseboardConfig::load(args.config.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({e}), using defaults");
        PulseboardConfig::default()
    });

    let emitter = Arc::new(BroadcastEmitter::with_capacity(config.server.channel_capacity));

    let mut components = ComponentRegistry::new("builtin");
    builtins::register_builtin_widgets(&mut components);
    let mut plugins = PluginRegistry::new("builtin");
    builtins::register_builtin_plugins(&mut plugins);
    let plugins = Arc::new(plugins);

    info!(widgets = ?components.references(), "component registry ready");

    let dashboards =
        load_dashboards(&config.dashboards.dir, &components, &plugins, &emitter).await;
    if dashboards.is_empty() {
        warn!(dir = %config.dashboards.dir, "no dashboards activated");
    }

    let bind = config.server.bind.clone();
    let port = config.server.port;
    let state = Arc::new(app::AppState { dashboards, emitter });
    let router = app::build_router(Arc::clone(&state));

    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    info!("Pulseboard listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    for dashboard in state.dashboards.values() {
        dashboard.shutdown();
    }
    Ok(())
}

/// Construct and activate one dashboard per descriptor file.
///
/// A descriptor that fails to parse, construct, or initialise is logged and
/// skipped — it never becomes live (no schedules, no channel activity) and
/// does not take the rest of the process down with it.
async fn load_dashboards(
    dir: &str,
    components: &ComponentRegistry,
    plugins: &Arc<PluginRegistry>,
    emitter: &Arc<BroadcastEmitter>,
) -> HashMap<String, Dashboard> {
    let mut dashboards = HashMap::new();

    let dir = Path::new(dir);
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "dashboards directory does not exist");
        return dashboards;
    }

    let mut paths: Vec<_> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect(),
        Err(e) => {
            error!(dir = %dir.display(), error = %e, "cannot read dashboards directory");
            return dashboards;
        }
    };
    paths.sort();

    for path in paths {
        let descriptor = match DashboardDescriptor::load(&path) {
            Ok(d) => d,
            Err(e) => {
                error!(path = %path.display(), error = %e, "descriptor rejected");
                continue;
            }
        };
        let name = descriptor.name.clone();

        let mut dashboard = match Dashboard::new(
            descriptor,
            components,
            Arc::clone(plugins),
            Arc::clone(emitter) as Arc<dyn Emitter>,
        ) {
            Ok(d) => d,
            Err(e) => {
                error!(dashboard = %name, error = %e, "dashboard construction failed");
                continue;
            }
        };

        if let Err(e) = dashboard.initialise().await {
            error!(dashboard = %name, error = %e, "dashboard initialise failed — not activated");
            dashboard.shutdown();
            continue;
        }

        info!(
            dashboard = %name,
            widgets = dashboard.widgets().len(),
            jobs = dashboard.jobs().len(),
            "dashboard live"
        );
        dashboards.insert(name, dashboard);
    }

    dashboards
}
