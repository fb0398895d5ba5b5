//! ==============================================================================
//! error.rs - failure taxonomy for report processing
//! ==============================================================================
//!
//! purpose:
//!     every way a report can fail after the content-type check passed.
//!     all variants surface as http 500 and are written to the report log
//!     as an error record. a wrong content type is rejected before any of
//!     this runs and is not represented here.
//!
//! relationships:
//!     - produced by: domain.rs (annotate), handler.rs (process_report)
//!     - consumed by: handler.rs (maps to the 500 response)
//!
//! ==============================================================================

use thiserror::Error;

/// prefix of every failure description sent to the client and logged
pub const FAILURE_PREFIX: &str = "Помилка обробки даних";

#[derive(Debug, Error)]
pub enum ReportError {
    /// connection failed while the body was streaming in
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// body is not well-formed json
    #[error("malformed JSON body: {0}")]
    Decode(#[source] serde_json::Error),

    /// body is json, but not an object we can annotate
    #[error("report must be a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("failed to serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to append report to log: {0}")]
    LogWrite(#[source] std::io::Error),
}

impl ReportError {
    /// full description, `Помилка обробки даних: <detail>`
    pub fn describe(&self) -> String {
        format!("{}: {}", FAILURE_PREFIX, self)
    }
}
