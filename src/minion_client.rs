//! HTTP client for the three minion endpoints. Every transport failure,
//! timeout, non-2xx, or malformed body becomes `ChunkOutcome::Error`; a
//! well-formed 2xx body reporting a worker-internal fault becomes the
//! distinct `ChunkOutcome::WorkerError` instead, so the two can be
//! charged against the breaker differently. Breaker bookkeeping itself
//! is the caller's responsibility (the scheduler decides which calls
//! are breaker-observed).

use std::time::Duration;

use hashforge_protocol::{CancelRequest, CancelResponse, ChunkStatus, CrackRequest, CrackResponse, HealthResponse};
use uuid::Uuid;

use crate::jobs::ChunkOutcome;

pub struct MinionClient {
    http: reqwest::Client,
}

impl MinionClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub async fn crack(
        &self,
        base_url: &str,
        job_id: Uuid,
        hash: &str,
        scheme_name: &str,
        lo: u64,
        hi: u64,
        timeout: Duration,
    ) -> ChunkOutcome {
        let body = CrackRequest {
            job_id,
            hash: hash.to_string(),
            scheme_name: scheme_name.to_string(),
            lo,
            hi,
        };
        let response = self
            .http
            .post(format!("{base_url}/crack"))
            .json(&body)
            .timeout(timeout)
            .send()
            .await;

        let response = match response {
            Ok(r) if r.status().is_success() => r,
            _ => return ChunkOutcome::Error,
        };

        match response.json::<CrackResponse>().await {
            Ok(parsed) => match parsed.status {
                ChunkStatus::Found => {
                    ChunkOutcome::Found(parsed.password.unwrap_or_default())
                }
                ChunkStatus::NotFound => ChunkOutcome::NotFound,
                ChunkStatus::Cancelled => ChunkOutcome::Cancelled,
                ChunkStatus::Error => ChunkOutcome::WorkerError,
                ChunkStatus::InvalidInput => ChunkOutcome::InvalidInput,
            },
            Err(_) => ChunkOutcome::Error,
        }
    }

    pub async fn cancel(&self, base_url: &str, job_id: Uuid, timeout: Duration) -> bool {
        let body = CancelRequest { job_id };
        let response = self
            .http
            .post(format!("{base_url}/cancel"))
            .json(&body)
            .timeout(timeout)
            .send()
            .await;
        match response {
            Ok(r) if r.status().is_success() => r
                .json::<CancelResponse>()
                .await
                .map(|c| c.ok)
                .unwrap_or(false),
            _ => false,
        }
    }

    pub async fn health(&self, base_url: &str, timeout: Duration) -> bool {
        let response = self
            .http
            .get(format!("{base_url}/health"))
            .timeout(timeout)
            .send()
            .await;
        match response {
            Ok(r) if r.status().is_success() => r
                .json::<HealthResponse>()
                .await
                .map(|h| h.status == "ok")
                .unwrap_or(false),
            _ => false,
        }
    }
}

impl Default for MinionClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a completed `crack` call should be charged to the breaker as
/// a success. Only a response that never arrived, or arrived malformed,
/// counts as a breaker failure — `WorkerError`/`InvalidInput` inside a
/// well-formed 2xx body reflect a worker-internal fault or a bad
/// request, not a transport fault.
pub fn is_breaker_success(outcome: &ChunkOutcome) -> bool {
    !matches!(outcome, ChunkOutcome::Error)
}
