//! Server bootstrap: router construction, binding and serving.

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ServerError,
    infrastructure::repository::InMemoryConnectionRepository,
    ui::{
        handler::{get_connections, get_rooms, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build fresh shared state backed by an empty in-memory registry
pub fn build_state(config: &ServerConfig) -> Arc<AppState> {
    let repository = Arc::new(InMemoryConnectionRepository::new());
    Arc::new(AppState::new(repository, config.sign_out_policy))
}

/// Build the application router
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/connections", get(get_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `app` on an already bound listener until a shutdown signal arrives
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(ServerError::Serve)
}

/// Run the relay server with the given configuration
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(
        sign_out_policy = %config.sign_out_policy,
        "Listening on ws://{}/ws for clients..",
        addr
    );

    let app = build_app(build_state(&config));
    serve(listener, app).await?;

    tracing::info!("Server terminated.");
    Ok(())
}
