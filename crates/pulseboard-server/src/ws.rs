use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use pulseboard_emitter::WidgetUpdate;

use crate::app::AppState;

/// Upgrade a subscriber onto a dashboard's update topic.
pub async fn subscribe(
    ws: WebSocketUpgrade,
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    if !state.dashboards.contains_key(&name) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let rx = state.emitter.subscribe(&name);
    ws.on_upgrade(move |socket| forward_updates(socket, name, rx))
}

/// Push every widget update for `dashboard` to one connected client.
///
/// The channel is push-only — inbound frames other than Close are ignored.
/// A subscriber that lags behind the broadcast buffer loses the oldest
/// updates and resyncs on the next one, which is always a full snapshot of
/// a widget's latest data.
async fn forward_updates(
    socket: WebSocket,
    dashboard: String,
    mut rx: broadcast::Receiver<WidgetUpdate>,
) {
    let connection = Uuid::new_v4();
    info!(%dashboard, %connection, "subscriber connected");

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            update = rx.recv() => match update {
                Ok(update) => {
                    let Ok(text) = serde_json::to_string(&update) else {
                        continue;
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(%dashboard, %connection, skipped, "subscriber lagging, updates dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = stream.next() => match msg {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    info!(%dashboard, %connection, "subscriber disconnected");
}
