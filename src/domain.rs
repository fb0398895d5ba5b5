use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ReportError;

/// a telemetry report as sent by a remote node
/// no fixed schema: network info, os info, whatever the agent collected
pub type Report = Map<String, Value>;

/// key the host adds to every accepted report
pub const RECEIVED_AT_KEY: &str = "server_received_at";

/// placeholder for fields a report does not carry
pub const NOT_AVAILABLE: &str = "N/A";

/// receipt timestamp, iso-8601 local time with microseconds
pub const RECEIVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// prefix timestamp of every line in the report log
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const CONTENT_TYPE_MESSAGE: &str = "Помилка: очікується Content-Type: application/json";
pub const ACCEPTED_MESSAGE: &str = "Дані успішно отримані та залоговані";

/// format a wall-clock instant as a receipt timestamp
pub fn format_received_at(at: &DateTime<Local>) -> String {
    at.format(RECEIVED_AT_FORMAT).to_string()
}

/// turn a decoded body into an annotated report
///
/// anything but an object is rejected. an existing `server_received_at`
/// is overwritten in place, otherwise the key is appended last.
pub fn annotate(value: Value, received_at: &str) -> Result<Report, ReportError> {
    let mut report = match value {
        Value::Object(map) => map,
        other => return Err(ReportError::NotAnObject { kind: json_kind(&other) }),
    };
    report.insert(RECEIVED_AT_KEY.to_string(), Value::String(received_at.to_string()));
    Ok(report)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// best-effort nested lookup, `N/A` on a missing key or a non-object hop
///
/// string leaves come back as-is; any other leaf is rendered as compact json.
pub fn lookup(report: &Report, path: &[&str]) -> String {
    let Some((first, rest)) = path.split_first() else {
        return NOT_AVAILABLE.to_string();
    };
    let mut current = match report.get(*first) {
        Some(value) => value,
        None => return NOT_AVAILABLE.to_string(),
    };
    for key in rest {
        match current.as_object().and_then(|obj| obj.get(*key)) {
            Some(value) => current = value,
            None => return NOT_AVAILABLE.to_string(),
        }
    }
    match current {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `network.hostname`
pub fn hostname(report: &Report) -> String {
    lookup(report, &["network", "hostname"])
}

/// `system_os.platform`
pub fn platform(report: &Report) -> String {
    lookup(report, &["system_os", "platform"])
}

// ==============================================================================
// response bodies
// ==============================================================================

/// 400 body, the request did not declare json
#[derive(Debug, Clone, Serialize)]
pub struct ContentTypeRejection {
    pub message: String,
}

/// 201 body
#[derive(Debug, Clone, Serialize)]
pub struct IngestAccepted {
    pub status: &'static str,
    pub message: String,
    /// the injected `server_received_at`
    pub timestamp: String,
}

/// 500 body
#[derive(Debug, Clone, Serialize)]
pub struct IngestFailed {
    pub status: &'static str,
    pub message: String,
}

impl Default for ContentTypeRejection {
    fn default() -> Self {
        Self { message: CONTENT_TYPE_MESSAGE.to_string() }
    }
}

impl IngestAccepted {
    pub fn new(timestamp: String) -> Self {
        Self { status: "success", message: ACCEPTED_MESSAGE.to_string(), timestamp }
    }
}

impl IngestFailed {
    pub fn new(message: String) -> Self {
        Self { status: "error", message }
    }
}
