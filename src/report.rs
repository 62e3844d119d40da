//! Console reporting for a migration run.
//!
//! Formatting is kept separate from printing so the text can be tested:
//! `format_*` functions build strings, `print_*` functions send them to the
//! console through `ui`.

use crate::columns::{Role, RoleMap};
use crate::runner::RunEvent;
use crate::types::{ColumnInfo, ContentFormat, EmitOutcome, RowReport, Summary};
use crate::ui;
use unicode_width::UnicodeWidthStr;

/// Column names are padded to this display width in the schema listing
const COLUMN_NAME_WIDTH: usize = 25;

/// Pad to a display width, accounting for wide characters
fn pad_to_width(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width { s.to_string() } else { format!("{}{}", s, " ".repeat(width - w)) }
}

pub fn format_connected(target: &str) -> String {
    format!("connected: {}", target)
}

/// Schema listing: one `name  type` line per column
pub fn format_columns(table: &str, columns: &[ColumnInfo]) -> String {
    let mut out = format!("columns of `{}`:\n", table);
    for column in columns {
        out.push_str(&format!("  {} {}\n", pad_to_width(&column.name, COLUMN_NAME_WIDTH), column.data_type));
    }
    out
}

/// Role mapping, `(none)` for unresolved roles
pub fn format_roles(roles: &RoleMap) -> String {
    let mut out = String::from("column mapping:\n");
    for role in Role::ALL {
        let column = roles.column(role).unwrap_or("(none)");
        out.push_str(&format!("  {:<11} -> {}\n", role.as_str(), column));
    }
    out
}

pub fn format_content_format(format: ContentFormat) -> String {
    match format {
        ContentFormat::Html => "content format: HTML (converting to Markdown)".to_string(),
        ContentFormat::Markdown => "content format: Markdown (used as-is)".to_string(),
    }
}

pub fn format_targets(count: usize) -> String {
    format!("posts to migrate: {}", count)
}

/// Status label and trailing text of a row line, e.g. `("SKIP", "2024-01-02-a.md")`
pub fn row_parts(report: &RowReport) -> (&'static str, String) {
    match &report.outcome {
        EmitOutcome::Created => ("CREATE", report.filename.clone()),
        EmitOutcome::Skipped => ("SKIP", report.filename.clone()),
        EmitOutcome::Errored(reason) => ("ERROR", format!("{}: {}", report.filename, reason)),
    }
}

/// Plain row line, e.g. `  CREATE 2024-01-02-hello-world.md`
pub fn format_row(report: &RowReport) -> String {
    let (label, rest) = row_parts(report);
    format!("  {} {}", label, rest)
}

/// Final one-line summary
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "migration complete: {} created, {} skipped, {} errored",
        summary.created, summary.skipped, summary.errored
    )
}

/// Print a run event as it happens
pub fn print_event(table: &str, event: &RunEvent<'_>) {
    match event {
        RunEvent::Connected { target } => ui::status(&format_connected(target)),
        RunEvent::Columns(columns) => ui::status(&format_columns(table, columns)),
        RunEvent::Roles(roles) => ui::status(&format_roles(roles)),
        RunEvent::Format(format) => ui::status(&format!("{}\n", format_content_format(*format))),
        RunEvent::Targets(count) => ui::status(&format!("{}\n", format_targets(*count))),
        RunEvent::Row(report) => print_row(report),
    }
}

pub fn print_row(report: &RowReport) {
    let (label, rest) = row_parts(report);
    let color = match report.outcome {
        EmitOutcome::Created => term::color::BRIGHT_GREEN,
        EmitOutcome::Skipped => term::color::BRIGHT_YELLOW,
        EmitOutcome::Errored(_) => term::color::BRIGHT_RED,
    };
    ui::labeled(label, color, &rest);
}

pub fn print_summary(summary: &Summary) {
    ui::status("");
    ui::status(&format_summary(summary));
}
