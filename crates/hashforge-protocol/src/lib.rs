//! JSON bodies exchanged between the master and the minion HTTP surface.
//!
//! Kept deliberately flat and serde-derived, the way `orbit-server`'s
//! API DTOs (`CreateJobRequest`, `JobInfo`) are — one struct per
//! endpoint body, no shared envelope beyond the error shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChunkStatus {
    Found,
    NotFound,
    Cancelled,
    Error,
    InvalidInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrackRequest {
    pub job_id: Uuid,
    pub hash: String,
    pub scheme_name: String,
    pub lo: u64,
    pub hi: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrackResponse {
    pub status: ChunkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub job_id: Uuid,
    pub scheme_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelRequest {
    pub job_id: Uuid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CancelResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub job_id: Uuid,
    pub cancelled: bool,
}

/// Error envelope for non-2xx minion responses, matching the
/// `{"error": ..., "status": ...}` shape the control-plane API uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}
