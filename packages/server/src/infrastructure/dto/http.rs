//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room entry of `GET /api/rooms` and body of `GET /api/rooms/{room_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub owner: Option<String>,
    /// Number of currently connected members
    pub members: usize,
    /// RFC 3339, UTC
    pub created_at: String,
}
