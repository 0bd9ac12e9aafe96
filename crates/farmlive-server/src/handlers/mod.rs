//! HTTP route handlers for the status server.

use axum::http::{Method, Uri};
use axum::Json;
use tracing::{debug, warn};

use crate::dto::StatusResponse;
use crate::error::AppError;

/// Status endpoint. Ignores method, headers and body.
pub async fn health() -> Json<StatusResponse> {
    debug!("Health check");
    Json(StatusResponse::current())
}

/// Fallback for unrouted paths, `/api/predict` included.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    warn!(%method, %uri, "No route matched");
    AppError::NotFound("not found".into())
}
