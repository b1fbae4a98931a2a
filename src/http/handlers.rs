//! Request handlers.

use std::time::Instant;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::classifier::classify_groups;
use crate::http::request::request_id;
use crate::http::response::ErrorResponse;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET` on the query path: names of groups with at most T live endpoints.
pub async fn inefficient_groups(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let threshold = match state.threshold.resolve() {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(request_id = %request_id, kind = ?e.kind(), error = %e, "Threshold resolution failed");
            metrics::record_request(metrics::OUTCOME_ERROR, start);
            return ErrorResponse::new(&e, state.error_status).into_response();
        }
    };

    let names = classify_groups(&state.dataset, threshold);
    tracing::debug!(
        request_id = %request_id,
        threshold,
        inefficient = names.len(),
        groups = state.dataset.len(),
        "Classified host groups"
    );

    metrics::record_inefficient_groups(names.len());
    metrics::record_request(metrics::OUTCOME_SUCCESS, start);
    Json(names).into_response()
}

/// Any other method on the query path. Never touches the inventory.
pub async fn method_not_allowed() -> Response {
    metrics::record_rejected();
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET,HEAD")]).into_response()
}

/// `GET /healthz`: liveness of the service itself.
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
