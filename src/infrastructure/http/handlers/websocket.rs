//! WebSocket Handler - 朗读事件推送

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::domain::narration::NarrationEvent;
use crate::infrastructure::http::state::AppState;

/// 可选的会话过滤
#[derive(Debug, Default, Deserialize)]
pub struct NarrationSocketParams {
    pub session_id: Option<String>,
}

impl NarrationSocketParams {
    fn accepts(&self, event: &NarrationEvent) -> bool {
        self.session_id
            .as_deref()
            .map_or(true, |id| id == event.session_id())
    }
}

/// 朗读事件 WebSocket 连接处理
pub async fn narration_websocket_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<NarrationSocketParams>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_narration_socket(socket, params, state))
}

async fn handle_narration_socket(
    socket: WebSocket,
    params: NarrationSocketParams,
    state: Arc<AppState>,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut event_rx = state.event_publisher.subscribe();

    tracing::info!(session_filter = ?params.session_id, "Narration WebSocket connected");

    // 事件转发任务
    let mut forward_task = tokio::spawn(async move {
        loop {
            let event = match event_rx.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Narration WebSocket lagged behind");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            if !params.accepts(&event) {
                continue;
            }

            let msg = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize event");
                    continue;
                }
            };

            if let Err(e) = sender.send(msg).await {
                tracing::debug!(error = %e, "Failed to send WebSocket message");
                break;
            }
        }
    });

    // 接收客户端消息（仅处理关闭）
    let mut receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => {
                    tracing::info!("Narration WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Narration WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => forward_task.abort(),
    }

    tracing::info!("Narration WebSocket disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_filter() {
        let event = NarrationEvent::LineFinished {
            session_id: "s1".to_string(),
            line_index: 0,
        };

        assert!(NarrationSocketParams::default().accepts(&event));
        assert!(NarrationSocketParams {
            session_id: Some("s1".to_string())
        }
        .accepts(&event));
        assert!(!NarrationSocketParams {
            session_id: Some("s2".to_string())
        }
        .accepts(&event));
    }
}
