//! WebSocket handler carrying menus to clients and selections back.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, warn};

use super::handlers::AppState;
use super::types::{ConnectParams, WsMessage};
use crate::error::MenuError;
use crate::menu::{MenuEvent, UserId};

/// Selection index reported when the client dismisses a menu.
pub const DISMISSED: i32 = -1;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(params): Query<ConnectParams>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, UserId::new(user), params))
}

/// Handle WebSocket connection.
async fn handle_socket(socket: WebSocket, state: AppState, user: UserId, params: ConnectParams) {
    let (mut sink, mut stream) = socket.split();

    let (connection, mut outbound) = match state.hub.connect(&user, params.locale) {
        Ok(registered) => registered,
        Err(e) => {
            let err = WsMessage::error("INTERNAL_ERROR", e.to_string());
            if let Ok(json) = serde_json::to_string(&err) {
                let _ = sink.send(Message::Text(json.into())).await;
            }
            return;
        }
    };

    // Forward queued messages (menus, notices, replies) to the socket
    let forward = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let Ok(json) = serde_json::to_string(&message) else {
                continue;
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    if let Some(menu) = &state.entry_menu {
        if let Err(e) = menu.show(&user) {
            warn!(%user, error = %e, "failed to show entry menu");
        }
    }

    while let Some(msg) = stream.next().await {
        let msg = match msg {
            Ok(Message::Text(text)) => text.to_string(),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(_) => break,
        };

        let ws_msg: WsMessage = match serde_json::from_str(&msg) {
            Ok(m) => m,
            Err(e) => {
                reply(&state, &user, WsMessage::error("PARSE_ERROR", e.to_string()));
                continue;
            }
        };

        let event = match ws_msg {
            WsMessage::Select { menu_id, option } => MenuEvent::Selected {
                menu_id,
                user: user.clone(),
                option,
            },
            WsMessage::Close { menu_id } => MenuEvent::Selected {
                menu_id,
                user: user.clone(),
                option: DISMISSED,
            },
            WsMessage::Ping => {
                reply(&state, &user, WsMessage::Pong);
                continue;
            }
            _ => {
                // Ignore server-side message types sent by the client
                continue;
            }
        };

        if let Err(e) = state.dispatcher.dispatch(event) {
            let code = match e {
                MenuError::MenuNotFound(_) => "MENU_NOT_FOUND",
                _ => "INTERNAL_ERROR",
            };
            reply(&state, &user, WsMessage::error(code, e.to_string()));
        }
    }

    forward.abort();

    match state.hub.disconnect(&user, connection) {
        Ok(true) => {
            let evicted = state
                .dispatcher
                .dispatch(MenuEvent::Disconnected { user: user.clone() });
            if let Err(e) = evicted {
                warn!(%user, error = %e, "failed to evict menus of disconnected user");
            }
        }
        Ok(false) => debug!(%user, "stale connection closed; newer one kept"),
        Err(e) => warn!(%user, error = %e, "failed to unregister connection"),
    }
}

fn reply(state: &AppState, user: &UserId, message: WsMessage) {
    if let Err(e) = state.hub.send(user, message) {
        debug!(%user, error = %e, "dropping reply");
    }
}
