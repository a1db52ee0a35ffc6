//! HTTP API response DTOs for the relay.

use serde::{Deserialize, Serialize};

/// Room summary for the room list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room: String,
    pub users: Vec<String>,
    pub member_count: usize,
}

/// One live connection for the connection list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionDto {
    pub id: u64,
    pub address: String,
    pub room: Option<String>,
    pub user: Option<String>,
    pub connected_at: String, // ISO 8601
}
