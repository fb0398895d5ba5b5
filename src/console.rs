//! ==============================================================================
//! console.rs - human-readable report block
//! ==============================================================================
//!
//! purpose:
//!     renders what an operator watching the terminal sees for every accepted
//!     report. only the report log is a contract; this output is for eyes.
//!
//! ```text
//!         --- Отримано новий звіт ---
//!         Час отримання: 2026-10-19T14:03:22.123456
//!         Хост: h1
//!         Платформа: linux
//!         Повні дані:
//!         { ...pretty json... }
//!         ----------------------------
//!         {...compact json...}            (raw_dump only)
//! ```
//!
//! ==============================================================================

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::{self, Report};

const BLOCK_HEADER: &str = "--- Отримано новий звіт ---";
const BLOCK_FOOTER: &str = "----------------------------";

/// pretty json with 4-space indentation, non-ascii kept as-is
pub fn pretty_json(report: &Report) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    report.serialize(&mut ser)?;
    // serde_json only ever writes valid utf-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// build the full console block for one annotated report
pub fn render_report_block(report: &Report, received_at: &str, raw_dump: bool) -> serde_json::Result<String> {
    let mut lines = vec![
        String::new(),
        BLOCK_HEADER.to_string(),
        format!("Час отримання: {}", received_at),
        format!("Хост: {}", domain::hostname(report)),
        format!("Платформа: {}", domain::platform(report)),
        "Повні дані:".to_string(),
        pretty_json(report)?,
        BLOCK_FOOTER.to_string(),
    ];
    if raw_dump {
        lines.push(serde_json::to_string(report)?);
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Report {
        json!({
            "network": {"hostname": "h1"},
            "system_os": {"platform": "linux"},
            "user": "Олена",
            "server_received_at": "2026-10-19T14:03:22.123456"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn block_lists_summary_fields_then_pretty_json() {
        let block = render_report_block(&sample(), "2026-10-19T14:03:22.123456", false).unwrap();
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], BLOCK_HEADER);
        assert_eq!(lines[2], "Час отримання: 2026-10-19T14:03:22.123456");
        assert_eq!(lines[3], "Хост: h1");
        assert_eq!(lines[4], "Платформа: linux");
        assert_eq!(lines[5], "Повні дані:");
        assert_eq!(lines[6], "{");
        assert_eq!(lines[7], "    \"network\": {");
        assert_eq!(*lines.last().unwrap(), BLOCK_FOOTER);
        assert!(block.contains("\"user\": \"Олена\""));
    }

    #[test]
    fn raw_dump_appends_compact_line() {
        let report = sample();
        let block = render_report_block(&report, "ts", true).unwrap();

        assert_eq!(block.lines().last().unwrap(), serde_json::to_string(&report).unwrap());
    }

    #[test]
    fn missing_fields_render_as_not_available() {
        let block = render_report_block(&Report::new(), "ts", false).unwrap();

        assert!(block.contains("Хост: N/A"));
        assert!(block.contains("Платформа: N/A"));
    }
}
