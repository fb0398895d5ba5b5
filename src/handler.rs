//! ==============================================================================
//! handler.rs - POST /system-reports
//! ==============================================================================
//!
//! purpose:
//!     the whole request path of the host:
//!
//! ```text
//!         content-type check ──✗──> 400 {"message"}          (nothing logged)
//!                │
//!         decode → annotate → console block → serialize → append
//!                │                                          │
//!                ✗ any step                                 ✓
//!                ▼                                          ▼
//!         500 {"status":"error"} + error record      201 {"status":"success"}
//! ```
//!
//! ```text
//!     every failure after the content-type check is a ReportError and is
//!     turned into a response here; nothing propagates past the handler.
//! ```
//!
//! relationships:
//!     - uses: domain.rs (annotate, wire bodies), console.rs (operator block)
//!     - uses: log_sink.rs through server::AppState
//!     - routed by: server.rs
//!
//! ==============================================================================

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::console;
use crate::domain::{self, ContentTypeRejection, IngestAccepted, IngestFailed};
use crate::error::ReportError;
use crate::server::AppState;

/// true for `application/json` and `application/*+json`, parameters ignored
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// ingest one report
///
/// the body is only read once the content type passed, and without a size
/// cap: every well-formed json object is accepted whatever its length.
#[instrument(
    name = "receive_report",
    skip(state, request),
    fields(
        content_length = request.headers().get(header::CONTENT_LENGTH).and_then(|v| v.to_str().ok()).unwrap_or("unknown"),
        content_type = request.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or("none"),
    )
)]
pub async fn receive_report(State(state): State<AppState>, request: Request) -> Response {
    if !is_json_content_type(request.headers()) {
        warn!("rejecting report without a json content type");
        return (StatusCode::BAD_REQUEST, Json(ContentTypeRejection::default())).into_response();
    }

    let body = match to_bytes(request.into_body(), usize::MAX).await {
        Ok(body) => body,
        Err(e) => return failure_response(&state, ReportError::BodyRead(e)),
    };

    match process_report(&state, &body) {
        Ok(received_at) => {
            debug!(received_at = %received_at, "report accepted");
            (StatusCode::CREATED, Json(IngestAccepted::new(received_at))).into_response()
        }
        Err(e) => failure_response(&state, e),
    }
}

/// 500 plus one error record; no fallback if that record cannot be written
fn failure_response(state: &AppState, e: ReportError) -> Response {
    let description = e.describe();
    if let Err(log_err) = state.sink.error(&description) {
        warn!(error = %log_err, "failed to append error record");
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(IngestFailed::new(description))).into_response()
}

/// decode, annotate, print and append; returns the injected timestamp
pub fn process_report(state: &AppState, body: &[u8]) -> Result<String, ReportError> {
    let value: Value = serde_json::from_slice(body).map_err(ReportError::Decode)?;

    let received_at = domain::format_received_at(&Local::now());
    let report = domain::annotate(value, &received_at)?;

    if state.console.enabled {
        let block = console::render_report_block(&report, &received_at, state.console.raw_dump)
            .map_err(ReportError::Serialize)?;
        println!("{}", block);
    }

    let line = serde_json::to_string(&report).map_err(ReportError::Serialize)?;
    state.sink.info(&line).map_err(ReportError::LogWrite)?;

    Ok(received_at)
}
