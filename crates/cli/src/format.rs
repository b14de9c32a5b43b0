//! Output → JSON line formatting.
//!
//! Two modes:
//! - **Compact** (default): one JSON document per line
//! - **Pretty** (`--pretty`): `serde_json::to_string_pretty`

use kiosklog_executor::{Error, Output};
use serde_json::json;

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Compact,
    Pretty,
}

fn render(value: &serde_json::Value, mode: OutputMode) -> String {
    let rendered = match mode {
        OutputMode::Compact => serde_json::to_string(value),
        OutputMode::Pretty => serde_json::to_string_pretty(value),
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"unprintable output: {}\"}}", e))
}

/// Format a successful output.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match serde_json::to_value(output) {
        Ok(value) => render(&value, mode),
        Err(e) => format_error(
            &Error::Serialization {
                reason: e.to_string(),
            },
            mode,
        ),
    }
}

/// Format an error as `{"error": <structured error>, "message": <text>}`.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    let structured = serde_json::to_value(err).unwrap_or(serde_json::Value::Null);
    render(
        &json!({
            "error": structured,
            "message": err.to_string(),
        }),
        mode,
    )
}

/// Format a line that never became a command.
pub fn format_parse_error(reason: &str, mode: OutputMode) -> String {
    format_error(
        &Error::InvalidInput {
            reason: reason.to_string(),
        },
        mode,
    )
}
