//! Error types for the migration run.
//!
//! - [`MigrateError`] - fatal conditions that abort the whole run
//! - [`ConversionError`] - per-row content conversion failures, counted and skipped

use crate::columns::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop the run before (or while) rows are processed.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// Could not open the source connection. Not retried.
    #[error("failed to connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: postgres::Error,
    },

    /// A query against the source failed.
    #[error("{context} query failed: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: postgres::Error,
    },

    /// One or more required roles have no matching column.
    #[error(
        "could not detect a column for {}; available columns: [{}]",
        format_roles(.missing),
        .available.join(", ")
    )]
    MissingRoles { missing: Vec<Role>, available: Vec<String> },

    /// The destination directory could not be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure converting one row's content to Markdown.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("markup is nested deeper than {limit} elements")]
    TooDeep { limit: usize },
}

fn format_roles(roles: &[Role]) -> String {
    roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(" / ")
}
