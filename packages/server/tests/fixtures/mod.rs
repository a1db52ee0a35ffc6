//! Shared fixtures for integration tests.
//!
//! Starts the real server in-process on an ephemeral port and provides a few
//! WebSocket helpers.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    ServerConfig,
    ui::{build_app, build_state, serve},
};
use tokio::{net::TcpListener, net::TcpStream, task::JoinHandle, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Room name used only to confirm a client is registered
const PROBE_ROOM: &str = "__probe__";

pub struct TestServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let app = build_app(build_state(&config));

        let task = tokio::spawn(async move {
            let _ = serve(listener, app).await;
        });

        Self { addr, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Connect a client and wait until the server has registered it
    pub async fn connect(&self) -> Ws {
        let (mut ws, _response) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        probe(&mut ws).await;
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn send_text(ws: &mut Ws, text: &str) {
    ws.send(Message::text(text.to_owned()))
        .await
        .expect("Failed to send message");
}

/// Next text frame, failing the test after a timeout
pub async fn recv_text(ws: &mut Ws) -> String {
    loop {
        let next = timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for message")
            .expect("Stream ended")
            .expect("WebSocket error");
        match next {
            Message::Text(text) => return text.to_string(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected frame: {other:?}"),
        }
    }
}

pub async fn recv_json(ws: &mut Ws) -> serde_json::Value {
    let text = recv_text(ws).await;
    serde_json::from_str(&text).expect("Received text is not JSON")
}

/// Round-trip a `REQUEST_USERS` for an unused room.
///
/// Messages from one client are handled in order, so once the reply arrives
/// every earlier message from this client has been routed.
pub async fn probe(ws: &mut Ws) {
    send_text(
        ws,
        &format!(r#"{{"action":"REQUEST_USERS","room":"{PROBE_ROOM}"}}"#),
    )
    .await;
    let reply = recv_json(ws).await;
    assert_eq!(reply["action"], "ALL_USERS");
}

/// Whether the socket stays quiet for a short while
pub async fn is_silent(ws: &mut Ws) -> bool {
    timeout(Duration::from_millis(200), ws.next()).await.is_err()
}
