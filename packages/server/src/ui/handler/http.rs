//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hiroba_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    infrastructure::dto::http::{ConnectionDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List populated rooms with their signed-in users
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state
        .repository
        .rooms()
        .await
        .into_iter()
        .map(|summary| RoomSummaryDto {
            member_count: summary.member_count(),
            room: summary.room.into_string(),
            users: summary
                .users
                .into_iter()
                .map(|user| user.into_string())
                .collect(),
        })
        .collect();

    Json(rooms)
}

/// Debug endpoint listing every live connection
pub async fn get_connections(State(state): State<Arc<AppState>>) -> Json<Vec<ConnectionDto>> {
    let connections = state
        .repository
        .all()
        .await
        .iter()
        .map(|record| ConnectionDto {
            id: record.id().value(),
            address: record.address().to_string(),
            room: record.room().map(|room| room.as_str().to_string()),
            user: record.display_name().map(|user| user.as_str().to_string()),
            connected_at: timestamp_to_jst_rfc3339(record.connected_at().value()),
        })
        .collect();

    Json(connections)
}
