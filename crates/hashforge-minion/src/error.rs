use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hashforge_protocol::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MinionError {
    #[error("worker task panicked")]
    WorkerPanicked,
}

impl IntoResponse for MinionError {
    fn into_response(self) -> Response {
        let status = match &self {
            MinionError::WorkerPanicked => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
