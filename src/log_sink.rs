//! ==============================================================================
//! log_sink.rs - durable append-only report log
//! ==============================================================================
//!
//! purpose:
//!     the one shared resource of the host. every accepted report and every
//!     processing failure becomes exactly one line in this sink:
//!
//! ```text
//!         2026-10-19 14:03:22 - {"network":{"hostname":"h1"},...}
//!         2026-10-19 14:03:25 - Помилка обробки даних: ...
//! ```
//!
//! design:
//!     - LogSink trait: the seam the handler talks to (tests swap in doubles)
//!     - FileLogSink: the real file, opened once in append mode and guarded by
//!       a single mutex so concurrent requests never interleave partial lines
//!
//! relationships:
//!     - used by: handler.rs (info for reports, error for failures)
//!     - created by: main.rs at startup, shared through server::AppState
//!
//! ==============================================================================

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

use crate::domain::LOG_TIMESTAMP_FORMAT;

/// `<YYYY-MM-DD HH:MM:SS> - <message>`, newlines folded so a record stays one line
pub fn format_record(message: &str) -> String {
    let stamp = Local::now().format(LOG_TIMESTAMP_FORMAT);
    format!("{} - {}", stamp, message.replace(['\r', '\n'], " "))
}

pub trait LogSink: Send + Sync {
    /// append one complete line; implementations must not interleave callers
    fn append_line(&self, line: &str) -> io::Result<()>;

    /// info record (accepted report)
    fn info(&self, message: &str) -> io::Result<()> {
        tracing::info!(target: "report_log", bytes = message.len(), "report record appended");
        self.append_line(&format_record(message))
    }

    /// error record (processing failure)
    fn error(&self, message: &str) -> io::Result<()> {
        tracing::error!(target: "report_log", "{}", message);
        self.append_line(&format_record(message))
    }
}

// ==============================================================================
// file-backed sink
// ==============================================================================

pub struct FileLogSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLogSink {
    /// create the log if missing and open it for appending; never truncates
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::info!(path = %path.display(), "report log opened");
        Ok(Self { path, file: Mutex::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLogSink {
    fn append_line(&self, line: &str) -> io::Result<()> {
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        // a panic mid-write leaves at most one torn line, keep logging after it
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.write_all(record.as_bytes())?;
        file.flush()
    }
}

impl std::fmt::Debug for FileLogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLogSink").field("path", &self.path).finish()
    }
}
