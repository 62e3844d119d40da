/// Core data structures for the migration pipeline
///
/// This module defines the values that flow between the resolver,
/// classifier, transformer, and emitter: source rows, the per-run content
/// format, materialized documents, and per-row outcomes.
use chrono::NaiveDateTime;

/// A single value read from the source table; every column arrives as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Null,
}

impl Value {
    /// Text of the value, or None for SQL NULL
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            Value::Null => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        s.map(Value::Text).unwrap_or(Value::Null)
    }
}

/// One row of the source table, in column order
///
/// Values are looked up through a `RoleMap`, never by arbitrary column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRow {
    fields: Vec<(String, Value)>,
}

impl SourceRow {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a column value (builder style)
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((column.into(), value.into()));
    }

    pub(crate) fn get(&self, column: &str) -> Option<&Value> {
        self.fields.iter().find(|(name, _)| name == column).map(|(_, value)| value)
    }
}

/// Column name and SQL data type as reported by schema introspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self { name: name.into(), data_type: data_type.into() }
    }
}

/// Content format decided once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Html,
    Markdown,
}

impl ContentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Html => "html",
            ContentFormat::Markdown => "markdown",
        }
    }
}

/// Publication timestamp of a post
///
/// Holds the wall-clock time as written in the source. It is always rendered
/// with the fixed `+0900` offset the site uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostDate {
    pub timestamp: NaiveDateTime,
    /// True when the source value could not be parsed and "now" was used
    pub fallback: bool,
}

impl PostDate {
    /// Calendar day used in file names: `YYYY-MM-DD`
    pub fn day(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    /// Full timestamp for front matter: `YYYY-MM-DD HH:MM:SS +0900`
    pub fn full(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S +0900").to_string()
    }
}

/// A post ready to be written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub slug: String,
    pub date: PostDate,
    pub description: String,
    pub categories: String,
    pub body: String,
}

/// Result of writing (or not writing) one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    Created,
    Skipped,
    Errored(String),
}

/// Outcome of a single source row, reported as it completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub filename: String,
    pub outcome: EmitOutcome,
}

/// Aggregate counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &EmitOutcome) {
        match outcome {
            EmitOutcome::Created => self.created += 1,
            EmitOutcome::Skipped => self.skipped += 1,
            EmitOutcome::Errored(_) => self.errored += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.skipped + self.errored
    }
}
