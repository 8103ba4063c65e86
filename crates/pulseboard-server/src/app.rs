use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use pulseboard_dashboard::Dashboard;
use pulseboard_emitter::BroadcastEmitter;

/// Shared state for every HTTP and WebSocket handler.
///
/// Dashboards are fully constructed and initialised before the state is
/// built, so handlers only ever read.
pub struct AppState {
    pub dashboards: HashMap<String, Dashboard>,
    pub emitter: Arc<BroadcastEmitter>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dashboards", get(list_dashboards))
        .route("/dashboards/{name}", get(render_model))
        .route("/dashboards/{name}/assets", get(assets))
        .route("/dashboards/{name}/ws", get(crate::ws::subscribe))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn list_dashboards(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let mut names: Vec<String> = state.dashboards.keys().cloned().collect();
    names.sort();
    Json(names)
}

async fn render_model(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let Some(dashboard) = state.dashboards.get(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match dashboard.to_render_model() {
        Ok(model) => Json(model).into_response(),
        Err(e) => {
            error!(dashboard = %name, error = %e, "render model failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn assets(State(state): State<Arc<AppState>>, Path(name): Path<String>) -> Response {
    let Some(dashboard) = state.dashboards.get(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    Json(dashboard.assets()).into_response()
}
