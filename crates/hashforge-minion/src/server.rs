//! The minion's HTTP surface: a thin adapter over the worker and the
//! cancellation registry. Composition follows the control-plane
//! binary's `Router::new().route(...).with_state(state)` style, reduced
//! to the four endpoints this system needs.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use hashforge_protocol::{
    CancelRequest, CancelResponse, ChunkStatus, CrackRequest, CrackResponse, HealthResponse,
    StatusResponse,
};
use hashforge_scheme::SchemeRegistry;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::cancellation::CancellationRegistry;
use crate::config::MinionConfig;
use crate::error::MinionError;
use crate::worker::{self, CrackParams, WorkerOutcome};

#[derive(Clone)]
pub struct AppState {
    pub schemes: Arc<SchemeRegistry>,
    pub cancellation: Arc<CancellationRegistry>,
    pub config: Arc<MinionConfig>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/crack", post(crack))
        .route("/cancel", post(cancel))
        .route("/status/:job_id", get(status))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

async fn crack(
    State(state): State<AppState>,
    Json(req): Json<CrackRequest>,
) -> Result<Json<CrackResponse>, MinionError> {
    let scheme = match state.schemes.get(&req.scheme_name) {
        Ok(scheme) => scheme,
        Err(_) => {
            return Ok(Json(CrackResponse {
                status: ChunkStatus::InvalidInput,
                password: None,
                job_id: req.job_id,
                scheme_name: req.scheme_name,
            }))
        }
    };

    let cancel_flag = state.cancellation.flag_for(req.job_id);
    let cancellation_check_every = state.config.cancellation_check_every;
    let worker_threads = state.config.worker_threads;
    let subrange_min_size = state.config.subrange_min_size;
    let hash = req.hash.clone();
    let lo = req.lo;
    let hi = req.hi;

    let outcome = tokio::task::spawn_blocking(move || {
        worker::crack(CrackParams {
            scheme: scheme.as_ref(),
            hash: &hash,
            lo,
            hi,
            worker_threads,
            subrange_min_size,
            cancel_every: cancellation_check_every,
            cancel_flag: &cancel_flag,
        })
    })
    .await
    .map_err(|_| MinionError::WorkerPanicked)?;

    info!(job_id = %req.job_id, lo, hi, ?outcome, "crack completed");

    let (status, password) = match outcome {
        WorkerOutcome::Found(p) => (ChunkStatus::Found, Some(p)),
        WorkerOutcome::NotFound => (ChunkStatus::NotFound, None),
        WorkerOutcome::Cancelled => (ChunkStatus::Cancelled, None),
        WorkerOutcome::Error => (ChunkStatus::Error, None),
        WorkerOutcome::InvalidInput => (ChunkStatus::InvalidInput, None),
    };

    Ok(Json(CrackResponse {
        status,
        password,
        job_id: req.job_id,
        scheme_name: req.scheme_name,
    }))
}

async fn cancel(State(state): State<AppState>, Json(req): Json<CancelRequest>) -> Json<CancelResponse> {
    warn!(job_id = %req.job_id, "cancel received");
    state.cancellation.cancel(req.job_id);
    Json(CancelResponse { ok: true })
}

async fn status(State(state): State<AppState>, Path(job_id): Path<Uuid>) -> Json<StatusResponse> {
    Json(StatusResponse {
        job_id,
        cancelled: state.cancellation.is_cancelled(job_id),
    })
}
