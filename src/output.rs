//! CLI output formatting and exit outcome mapping.

use anyhow::Result;
use linkprobe_core::{BatchReport, BatchSummary};

use crate::ProcessExit;

/// Message when no input was provided at all.
pub const NO_INPUT_GUIDANCE: &str = "No input provided. Pipe links via stdin or pass as arguments.";

/// Example for piping input.
pub const INPUT_PIPE_EXAMPLE: &str = "Example: echo 'https://mega.nz/file/AbCd1234#key' | linkprobe";

/// Width of the status column in table output.
const STATUS_COLUMN_WIDTH: usize = 8;

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Renders one line per link plus a summary line.
///
/// Failed probes show `error` in the status column and the error's first
/// line after the link.
pub fn render_table(report: &BatchReport, width: usize) -> Vec<String> {
    let status_width = STATUS_COLUMN_WIDTH;
    let link_width = width.saturating_sub(status_width + 1).max(1);
    let mut lines = Vec::with_capacity(report.len() + 1);

    for entry in report {
        let (label, detail) = match &entry.outcome {
            Ok(status) => (status.as_str(), None),
            Err(error) => ("error", Some(error.to_string())),
        };
        let link = truncate_to_width(&entry.link, link_width);
        lines.push(format!("{label:<status_width$} {link}"));
        if let Some(detail) = detail {
            let first_line = detail.lines().next().unwrap_or_default();
            lines.push(format!(
                "{:status_width$} {}",
                "",
                truncate_to_width(first_line, link_width)
            ));
        }
    }

    lines.push(summary_line(&report.summary()));
    lines
}

fn summary_line(summary: &BatchSummary) -> String {
    format!(
        "{} checked: {} online, {} offline, {} invalid, {} errors",
        summary.total(),
        summary.online,
        summary.offline,
        summary.invalid,
        summary.errors
    )
}

/// Serializes the report and its summary as pretty JSON.
pub fn render_json(report: &BatchReport) -> Result<String> {
    let value = serde_json::json!({
        "links": report.iter().collect::<Vec<_>>(),
        "summary": report.summary(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Prints quick-start guidance to stderr.
pub fn print_quick_start_guidance() {
    let width = terminal_width().min(80);
    eprintln!("{}", truncate_to_width(NO_INPUT_GUIDANCE, width));
    eprintln!("{}", truncate_to_width(INPUT_PIPE_EXAMPLE, width));
}

/// Determines the process exit outcome from batch counts.
pub(crate) fn determine_exit_outcome(summary: &BatchSummary) -> ProcessExit {
    if summary.errors > 0 {
        ProcessExit::Failure
    } else if summary.offline > 0 || summary.invalid > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Success
    }
}
