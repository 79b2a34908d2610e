use std::net::SocketAddr;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use wordmask_core::net::messages::{
    ClientMessage, CreateRoomMsg, JoinRoomMsg, RoomJoinedMsg, ServerMessage,
};
use wordmask_core::net::protocol::{decode_server_message, encode_client_message};

use wordmask_server::build_app;
use wordmask_server::config::ServerConfig;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestServer {
    pub addr: SocketAddr,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    /// No pause between clue slots, so a whole game runs without waiting.
    pub async fn fast() -> Self {
        let mut config = ServerConfig::default();
        config.rooms.step_reveal_delay_ms = 0;
        Self::from_config(config).await
    }

    pub async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, _state) = build_app(config);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

pub async fn ws_connect(url: &str) -> WsStream {
    let (stream, _) = tokio_tungstenite::connect_async(url).await.unwrap();
    stream
}

pub async fn ws_send_client_msg(stream: &mut WsStream, msg: &ClientMessage) {
    let encoded = encode_client_message(msg).unwrap();
    let text = String::from_utf8(encoded).unwrap();
    stream.send(Message::Text(text.into())).await.unwrap();
}

/// Read the next text frame (5s timeout).
pub async fn ws_read_raw(stream: &mut WsStream) -> Vec<u8> {
    let deadline = Duration::from_secs(5);
    tokio::time::timeout(deadline, async {
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => return text.as_bytes().to_vec(),
                Some(Ok(Message::Close(_))) => panic!("WebSocket closed unexpectedly"),
                Some(Err(e)) => panic!("WebSocket error: {e}"),
                None => panic!("WebSocket stream ended"),
                _ => continue,
            }
        }
    })
    .await
    .expect("Timed out waiting for WebSocket message")
}

/// Try to read a text frame, returning None on timeout.
pub async fn ws_try_read_raw(stream: &mut WsStream, timeout_ms: u64) -> Option<Vec<u8>> {
    let deadline = Duration::from_millis(timeout_ms);
    tokio::time::timeout(deadline, async {
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => return text.as_bytes().to_vec(),
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                    panic!("WebSocket error or closed")
                },
                _ => continue,
            }
        }
    })
    .await
    .ok()
}

pub async fn ws_read_server_msg(stream: &mut WsStream) -> ServerMessage {
    let data = ws_read_raw(stream).await;
    decode_server_message(&data).unwrap()
}

/// Skip frames until one satisfies `pred`.
pub async fn ws_read_until<F>(stream: &mut WsStream, pred: F) -> ServerMessage
where
    F: Fn(&ServerMessage) -> bool,
{
    loop {
        let msg = ws_read_server_msg(stream).await;
        if pred(&msg) {
            return msg;
        }
    }
}

pub async fn ws_create_room(stream: &mut WsStream, name: &str) -> RoomJoinedMsg {
    let msg = ClientMessage::CreateRoom(CreateRoomMsg {
        name: name.to_string(),
    });
    ws_send_client_msg(stream, &msg).await;
    match ws_read_server_msg(stream).await {
        ServerMessage::RoomJoined(joined) => joined,
        other => panic!("Expected room:joined, got: {other:?}"),
    }
}

pub async fn ws_join_room(stream: &mut WsStream, code: &str, name: &str) -> RoomJoinedMsg {
    let msg = ClientMessage::JoinRoom(JoinRoomMsg {
        code: code.to_string(),
        name: name.to_string(),
    });
    ws_send_client_msg(stream, &msg).await;
    match ws_read_server_msg(stream).await {
        ServerMessage::RoomJoined(joined) => joined,
        other => panic!("Expected room:joined, got: {other:?}"),
    }
}

/// Send a join that the server should refuse; returns the error text.
pub async fn ws_join_room_expect_error(stream: &mut WsStream, code: &str, name: &str) -> String {
    let msg = ClientMessage::JoinRoom(JoinRoomMsg {
        code: code.to_string(),
        name: name.to_string(),
    });
    ws_send_client_msg(stream, &msg).await;
    match ws_read_server_msg(stream).await {
        ServerMessage::RoomError(err) => err.message,
        other => panic!("Expected room:error, got: {other:?}"),
    }
}

/// A room with a host and `n - 1` guests, every join announcement drained.
pub async fn ws_room_with_players(server: &TestServer, n: usize) -> (String, Vec<WsStream>) {
    let mut host = ws_connect(&server.ws_url()).await;
    let code = ws_create_room(&mut host, "Player1").await.room_code;
    let mut streams = vec![host];
    for i in 2..=n {
        let mut guest = ws_connect(&server.ws_url()).await;
        ws_join_room(&mut guest, &code, &format!("Player{i}")).await;
        for existing in &mut streams {
            ws_read_until(existing, |m| matches!(m, ServerMessage::PlayerJoined(_))).await;
        }
        streams.push(guest);
    }
    (code, streams)
}
