//! Output formatting: tables, JSON, plain ids.
//!
//! Table output uses `tabled`; JSON serializes the full run report via
//! serde; plain emits one network id per line for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

/// Whether styled output should be emitted.
fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err()
}

/// Render a set of rows as a rounded table, or an empty string for no
/// rows (callers skip the section entirely).
pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render a full report as pretty JSON.
pub fn render_json<T: serde::Serialize>(report: &T) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Print a titled section, skipping empty bodies.
pub fn print_section(title: &str, body: &str, quiet: bool) {
    if quiet || body.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    if should_color() {
        let _ = writeln!(stdout, "{}", title.bold());
    } else {
        let _ = writeln!(stdout, "{title}");
    }
    let _ = writeln!(stdout, "{body}");
}

/// Print pre-rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print the one-line run summary.
pub fn print_summary(text: &str, quiet: bool) {
    if quiet {
        return;
    }
    let mut stdout = io::stdout().lock();
    if should_color() {
        let _ = writeln!(stdout, "{}", text.green());
    } else {
        let _ = writeln!(stdout, "{text}");
    }
}
