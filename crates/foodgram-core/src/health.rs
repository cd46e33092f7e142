//! Liveness and readiness checks.

use std::fmt::Display;

use axum::http::StatusCode;

/// Handler for `GET /healthz`. Answers as long as the process serves requests.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map the outcome of a dependency check to a readiness status.
pub fn readiness<E: Display>(check: Result<(), E>) -> StatusCode {
    match check {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
