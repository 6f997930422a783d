//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Connection summary for the connections endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSummaryDto {
    pub id: String,
    pub remote_addr: String,
    pub connected_at: String, // ISO 8601
}

/// Registered connections per relay endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionsDto {
    pub chat: Vec<ConnectionSummaryDto>,
    pub raw: Vec<ConnectionSummaryDto>,
    pub feed_subscribers: usize,
}
