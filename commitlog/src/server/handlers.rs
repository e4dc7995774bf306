//! HTTP route handlers for the commit log server.
//!
//! Handlers accept JSON bodies by default and binary protobuf when the
//! request carries `Content-Type: application/protobuf`. Responses use
//! protobuf only when the `Accept` header asks for it.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::error::ApiError;
use super::metrics::Metrics;
use super::proto::{ConsumeResponse, ProduceResponse};
use super::request::{ConsumeRequest, ProduceRequest};
use super::response::{ResponseFormat, to_api_response};
use crate::{AppendLog, LogRead};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub log: Arc<AppendLog>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(log: Arc<AppendLog>, metrics: Arc<Metrics>) -> Self {
        Self { log, metrics }
    }
}

/// Handle POST /
///
/// Appends the request's record to the log and returns the assigned offset.
pub async fn handle_produce(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let format = ResponseFormat::from_headers(&headers);
    let request = ProduceRequest::from_body(&headers, &body)?;

    let size = request.value.len();
    let offset = state.log.append(request.value)?;

    state.metrics.log_append_records_total.inc();
    state.metrics.log_append_bytes_total.inc_by(size as u64);
    state.metrics.log_records.set(state.log.len() as i64);
    tracing::debug!(offset, size, "appended record");

    Ok(to_api_response(ProduceResponse { offset }, format))
}

/// Handle GET /
///
/// Reads the record at the offset named in the request body. A body that
/// fails to decode ends the request with 400; the log is not consulted.
pub async fn handle_consume(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let format = ResponseFormat::from_headers(&headers);
    let request = ConsumeRequest::from_body(&headers, &body)?;

    let record = state.log.read(request.offset)?;

    state.metrics.log_read_records_total.inc();
    state.metrics.log_read_bytes_total.inc_by(record.len() as u64);

    Ok(to_api_response(ConsumeResponse::new(record), format))
}

/// Handle GET /metrics
pub async fn handle_metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => body.into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Handle GET /-/healthy
pub async fn handle_healthy() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Handle GET /-/ready
///
/// The log lives in memory and is usable as soon as the server starts.
pub async fn handle_ready() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
