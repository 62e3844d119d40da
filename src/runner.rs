use crate::classify::{self, SAMPLE_SIZE};
use crate::columns::{Role, RoleMap};
use crate::config::MigrationConfig;
use crate::emit;
use crate::error::MigrateError;
use crate::source::{PgSource, PostSource, ScanQuery};
use crate::transform;
use crate::types::*;
use log::{debug, warn};
use std::fs;

/// Progress notifications emitted while a run proceeds
#[derive(Debug)]
pub enum RunEvent<'a> {
    Connected { target: &'a str },
    Columns(&'a [ColumnInfo]),
    Roles(&'a RoleMap),
    Format(ContentFormat),
    Targets(usize),
    Row(&'a RowReport),
}

/// Run a full migration against PostgreSQL
///
/// This is the main entry point. The callback is invoked for each stage and
/// for every row as soon as it has been handled.
pub fn run<F>(config: &MigrationConfig, on_event: F) -> Result<Summary, MigrateError>
where
    F: FnMut(RunEvent<'_>),
{
    let source = PgSource::connect(&config.connection, &config.table)?;
    run_with_source(config, source, on_event)
}

/// Run a migration against an already-open source
///
/// The source is closed before returning, whether the run succeeded or not.
pub fn run_with_source<S, F>(config: &MigrationConfig, mut source: S, mut on_event: F) -> Result<Summary, MigrateError>
where
    S: PostSource,
    F: FnMut(RunEvent<'_>),
{
    let target = source.describe();
    on_event(RunEvent::Connected { target: &target });

    let result = migrate(config, &mut source, &mut on_event);

    if let Err(e) = source.close() {
        warn!("failed to close source connection: {}", e);
    }
    result
}

fn migrate<S, F>(config: &MigrationConfig, source: &mut S, on_event: &mut F) -> Result<Summary, MigrateError>
where
    S: PostSource,
    F: FnMut(RunEvent<'_>),
{
    // Step 1: Introspect and resolve roles (fatal if title/content/date are missing)
    let columns = source.columns()?;
    on_event(RunEvent::Columns(&columns));

    let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    let roles = RoleMap::resolve(&names);
    on_event(RunEvent::Roles(&roles));
    let missing = roles.missing_required();
    let (true, Some(content_column), Some(date_column)) =
        (missing.is_empty(), roles.column(Role::Content), roles.column(Role::Date))
    else {
        return Err(MigrateError::MissingRoles { missing, available: names });
    };

    // A table without the soft-delete column has nothing to exclude
    let soft_delete = names.iter().find(|n| **n == config.soft_delete_column).map(|n| n.as_str());
    if soft_delete.is_none() {
        debug!("no {} column on {}, including every row", config.soft_delete_column, config.table);
    }

    // Step 2: Decide the content format from the earliest posts
    let sample = source.fetch(&ScanQuery {
        columns: vec![content_column],
        order_by: date_column,
        soft_delete,
        limit: Some(SAMPLE_SIZE),
    })?;
    let sample_content: Vec<String> = sample.iter().map(|row| roles.raw_text(row, Role::Content)).collect();
    let format = classify::classify(&sample_content);
    on_event(RunEvent::Format(format));

    fs::create_dir_all(&config.output_dir)
        .map_err(|source| MigrateError::OutputDir { path: config.output_dir.clone(), source })?;

    // Step 3: Load every post, oldest first
    let rows = source.fetch(&ScanQuery {
        columns: roles.selected_columns(),
        order_by: date_column,
        soft_delete,
        limit: None,
    })?;
    on_event(RunEvent::Targets(rows.len()));

    // Step 4: Rows are handled strictly in order so that the first of two
    // colliding file names wins and later ones are skipped.
    let mut summary = Summary::default();
    for row in &rows {
        let report = migrate_row(row, &roles, format, config);
        summary.record(&report.outcome);
        on_event(RunEvent::Row(&report));
    }

    debug!("run finished: {} row(s), {:?}", summary.total(), summary);
    Ok(summary)
}

/// Transform and write a single row. Per-row failures end up in the report.
fn migrate_row(row: &SourceRow, roles: &RoleMap, format: ContentFormat, config: &MigrationConfig) -> RowReport {
    let draft = transform::draft(row, roles);
    let filename = draft.filename();

    if config.output_dir.join(&filename).exists() && !config.force_overwrite {
        return RowReport { filename, outcome: EmitOutcome::Skipped };
    }

    let outcome = match draft.into_document(format) {
        Ok(document) => match emit::emit(&document, &config.output_dir, config.force_overwrite) {
            EmitOutcome::Errored(reason) => EmitOutcome::Errored(format!("write failed: {}", reason)),
            other => other,
        },
        Err(e) => EmitOutcome::Errored(format!("conversion failed: {}", e)),
    };
    RowReport { filename, outcome }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
