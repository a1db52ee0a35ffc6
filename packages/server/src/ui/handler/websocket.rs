//! WebSocket transport.
//!
//! Accepts sockets, turns frames into text for the session lifecycle and
//! drains each connection's outbound channel back into its socket.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionHandleFactory, PeerAddress},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, PeerAddress::from(addr)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, address: PeerAddress) {
    let handle = ConnectionHandleFactory::generate();

    // The registry owns the only sender; once the record is gone the
    // channel closes and the writer task below ends the session.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let id = state.lifecycle.on_connect(handle, address, tx).await;

    let (mut sender, mut receiver) = socket.split();

    let lifecycle = state.lifecycle.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(id = %id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => lifecycle.on_message(&handle, text.as_str()).await,
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => lifecycle.on_message(&handle, text).await,
                    Err(e) => {
                        tracing::warn!(id = %id, "Dropping binary frame that is not UTF-8: {}", e);
                    }
                },
                Message::Ping(_) => {
                    tracing::trace!(id = %id, "Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(id = %id, "Client requested close");
                    break;
                }
                Message::Pong(_) => {}
            }
        }
    });

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(msg.into())).await {
                tracing::debug!(id = %id, "Socket write failed: {}", e);
                return;
            }
        }
        // Record dropped (e.g. removed on sign-out): close our side
        let _ = sender.close().await;
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.lifecycle.on_disconnect(&handle).await;
}
