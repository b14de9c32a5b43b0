//! Pipe mode: one JSON command per input line.
//!
//! Blank lines and lines starting with `#` are skipped. Every other line
//! produces exactly one line of output: the `Output` on `out`, or an error
//! object on `err`.

use std::io::{BufRead, Write};

use kiosklog_executor::{Command, Executor};
use tracing::debug;

use crate::format::{format_error, format_output, format_parse_error, OutputMode};

/// Run every command read from `input`. Returns the process exit code:
/// 0 if every line succeeded, 1 otherwise.
pub fn run_pipe<R, W, E>(
    executor: &Executor,
    input: R,
    out: &mut W,
    err: &mut E,
    mode: OutputMode,
) -> i32
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut exit_code = 0;

    for (lineno, line) in input.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                let _ = writeln!(err, "{}", format_parse_error(&e.to_string(), mode));
                exit_code = 1;
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let cmd: Command = match serde_json::from_str(trimmed) {
            Ok(cmd) => cmd,
            Err(e) => {
                let reason = format!("line {}: {}", lineno + 1, e);
                let _ = writeln!(err, "{}", format_parse_error(&reason, mode));
                exit_code = 1;
                continue;
            }
        };

        debug!(target: "kiosklog::cli", line = lineno + 1, command = cmd.name(), "Read command");
        match executor.execute(cmd) {
            Ok(output) => {
                let _ = writeln!(out, "{}", format_output(&output, mode));
            }
            Err(e) => {
                let _ = writeln!(err, "{}", format_error(&e, mode));
                exit_code = 1;
            }
        }
    }

    let _ = out.flush();
    exit_code
}
