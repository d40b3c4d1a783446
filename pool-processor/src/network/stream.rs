use crate::config::Config;
use crate::types::{ClientRequest, ProcessorStats, WsMessage};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use pool_math::payout_preview;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub stats: RwLock<ProcessorStats>,
    pub client_count: RwLock<usize>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            stats: RwLock::new(ProcessorStats::default()),
            client_count: RwLock::new(0),
            started_at: Instant::now(),
        }
    }

    pub async fn increment_clients(&self) {
        let mut count = self.client_count.write().await;
        *count += 1;
        let mut stats = self.stats.write().await;
        stats.ws_clients = *count;
    }

    pub async fn decrement_clients(&self) {
        let mut count = self.client_count.write().await;
        *count = count.saturating_sub(1);
        let mut stats = self.stats.write().await;
        stats.ws_clients = *count;
    }

    pub async fn record_preview(&self, found: bool) {
        let mut stats = self.stats.write().await;
        if found {
            stats.previews_served += 1;
        } else {
            stats.previews_empty += 1;
        }
    }
}

/// Answer a single client message
pub async fn handle_client_message(state: &AppState, text: &str) -> WsMessage {
    match serde_json::from_str::<ClientRequest>(text) {
        Ok(ClientRequest::Preview(req)) => {
            let input = req.into_pool_input(state.config.default_fees.total_bps());
            let preview = payout_preview(&input);
            state.record_preview(preview.is_some()).await;
            WsMessage::preview(preview)
        }
        Err(e) => {
            warn!("Failed to parse client request: {}", e);
            WsMessage::error(format!("invalid request: {}", e))
        }
    }
}

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Live previews: every message from the client is answered with a preview
async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut sender, mut receiver) = socket.split();

    state.increment_clients().await;
    info!("👤 WebSocket client connected");

    let ping_every = tokio::time::Duration::from_secs(state.config.ws_ping_secs.max(1));

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => continue,
                };

                let reply = handle_client_message(&state, &text).await;
                match serde_json::to_string(&reply) {
                    Ok(json) => {
                        if sender.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("Failed to serialize reply: {}", e),
                }
            }
            _ = tokio::time::sleep(ping_every) => {
                // Keep the connection alive while the user is idle
                if sender.send(Message::Ping(vec![])).await.is_err() {
                    break;
                }
            }
        }
    }

    state.decrement_clients().await;
    info!("👤 WebSocket client disconnected");
}
