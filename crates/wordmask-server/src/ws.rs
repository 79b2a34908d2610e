use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use wordmask_core::net::messages::{ClientMessage, ServerMessage};
use wordmask_core::net::protocol::{decode_client_message, encode_server_message};
use wordmask_core::player::{PlayerId, normalize_name};
use wordmask_core::room::{is_valid_room_code, normalize_room_code};

use crate::error::RoomError;
use crate::orchestrator::RoomOptions;
use crate::room_loop::{JoinKind, RoomCommand, RoomHandle};
use crate::room_manager::{PlayerSender, create_room};
use crate::state::{AppState, ConnectionGuard};

pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let max_ws = state.config.limits.max_ws_connections;
    let current = state.ws_connection_count.load(Ordering::Relaxed);
    if current >= max_ws {
        tracing::warn!(current, max = max_ws, "WS connection limit reached");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(ws
        .on_upgrade(move |socket| handle_socket(socket, state))
        .into_response())
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let _guard = ConnectionGuard::new(Arc::clone(&state.ws_connection_count));
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::channel::<Bytes>(state.config.limits.player_message_buffer);
    spawn_writer(ws_sender, rx);

    let mut conn = Connection {
        player_id: Uuid::new_v4().to_string(),
        sender: tx,
        room: None,
    };
    tracing::debug!(player_id = %conn.player_id, "Connection opened");

    read_loop(&mut ws_receiver, &state, &mut conn).await;

    if let Some(room) = conn.room.take() {
        room.send(RoomCommand::Disconnected {
            player_id: conn.player_id.clone(),
        });
    }
    tracing::debug!(player_id = %conn.player_id, "Connection closed");
}

fn spawn_writer(
    mut ws_sender: futures::stream::SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<Bytes>,
) {
    tokio::spawn(async move {
        while let Some(data) = rx.recv().await {
            let Ok(text) = std::str::from_utf8(&data) else {
                tracing::error!("Dropping non-UTF-8 outbound frame");
                continue;
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });
}

/// Per-connection rate limiter (token bucket).
struct RateLimiter {
    tokens: f64,
    last_refill: tokio::time::Instant,
    max_tokens: f64,
    refill_rate: f64, // tokens per second
}

impl RateLimiter {
    fn new(max_tokens: f64, refill_rate: f64) -> Self {
        Self {
            tokens: max_tokens,
            last_refill: tokio::time::Instant::now(),
            max_tokens,
            refill_rate,
        }
    }

    /// Returns true if the message is allowed; false if rate-limited.
    fn allow(&mut self) -> bool {
        let now = tokio::time::Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.max_tokens);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

async fn read_loop(
    ws_receiver: &mut futures::stream::SplitStream<WebSocket>,
    state: &AppState,
    conn: &mut Connection,
) {
    let rate = state.config.limits.ws_rate_limit_per_sec;
    let mut rate_limiter = RateLimiter::new(rate, rate);
    let max_bytes = state.config.limits.max_message_bytes;

    while let Some(Ok(msg)) = ws_receiver.next().await {
        let text = match msg {
            Message::Text(t) => t,
            Message::Close(_) => break,
            _ => continue,
        };
        let data = text.as_str().as_bytes();

        if !rate_limiter.allow() {
            tracing::warn!(player_id = %conn.player_id, "Rate limited");
            continue;
        }
        if data.is_empty() || data.len() > max_bytes {
            continue;
        }

        match decode_client_message(data) {
            Ok(msg) => conn.dispatch(msg, state).await,
            Err(e) => {
                tracing::debug!(player_id = %conn.player_id, error = %e, "Dropped client frame");
            },
        }
    }
}

/// One WebSocket connection. It may sit in at most one room at a time; after
/// leaving it can create or join another.
struct Connection {
    player_id: PlayerId,
    sender: PlayerSender,
    room: Option<RoomHandle>,
}

impl Connection {
    async fn dispatch(&mut self, msg: ClientMessage, state: &AppState) {
        match msg {
            ClientMessage::CreateRoom(m) if self.room.is_none() => {
                self.create(&m.name, state).await;
            },
            ClientMessage::JoinRoom(m) if self.room.is_none() => {
                self.enter_existing(&m.code, m.name, JoinKind::Join, state)
                    .await;
            },
            ClientMessage::RejoinRoom(m) if self.room.is_none() => {
                self.enter_existing(&m.code, m.name, JoinKind::Rejoin, state)
                    .await;
            },
            ClientMessage::LeaveRoom => {
                if let Some(room) = self.room.take() {
                    room.send(RoomCommand::Leave {
                        player_id: self.player_id.clone(),
                    });
                }
            },
            msg => {
                let Some(room) = &self.room else {
                    tracing::debug!(
                        player_id = %self.player_id,
                        event = msg.event_name(),
                        "Ignoring action outside a room"
                    );
                    return;
                };
                let delivered = room.send(RoomCommand::Action {
                    player_id: self.player_id.clone(),
                    msg,
                });
                if !delivered {
                    self.room = None;
                }
            },
        }
    }

    async fn create(&mut self, name: &str, state: &AppState) {
        if normalize_name(name).is_none() {
            self.send_error(&RoomError::InvalidName);
            return;
        }
        match create_room(&state.rooms, RoomOptions::from_config(&state.config)).await {
            Ok(room) => self.enter(room, name.to_string(), JoinKind::Create).await,
            Err(e) => self.send_error(&e),
        }
    }

    async fn enter_existing(&mut self, code: &str, name: String, kind: JoinKind, state: &AppState) {
        let code = normalize_room_code(code);
        let room = if is_valid_room_code(&code) {
            state.rooms.read().await.get(&code)
        } else {
            None
        };
        match room {
            Some(room) => self.enter(room, name, kind).await,
            None => self.send_error(&RoomError::NotFound),
        }
    }

    async fn enter(&mut self, room: RoomHandle, name: String, kind: JoinKind) {
        match room
            .join(self.player_id.clone(), name, kind, self.sender.clone())
            .await
        {
            Some(true) => {
                tracing::debug!(player_id = %self.player_id, room = room.code(), ?kind, "Seated");
                self.room = Some(room);
            },
            // The room already reported why.
            Some(false) => {},
            None => self.send_error(&RoomError::NotFound),
        }
    }

    fn send_error(&self, error: &RoomError) {
        if let Ok(data) = encode_server_message(&ServerMessage::error(error.to_string()))
            && let Err(e) = self.sender.try_send(Bytes::from(data))
        {
            tracing::debug!(player_id = %self.player_id, error = %e, "Failed to send room error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rate_limiter_refills_over_time() {
        let mut limiter = RateLimiter::new(2.0, 20.0);
        assert!(limiter.allow());
        assert!(limiter.allow());
        assert!(!limiter.allow());
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(limiter.allow());
    }
}
