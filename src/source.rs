/// Source database access
///
/// The pipeline talks to the source through the `PostSource` trait: schema
/// introspection plus ordered scans. `PgSource` is the PostgreSQL
/// implementation. Every selected column is cast to text on the server so
/// rows arrive as text or NULL regardless of the column's SQL type.
use crate::config::ConnectionConfig;
use crate::error::MigrateError;
use crate::types::{ColumnInfo, SourceRow, Value};
use log::debug;
use postgres::{Client, NoTls};

/// An ordered scan over the post table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanQuery<'a> {
    pub columns: Vec<&'a str>,
    pub order_by: &'a str,
    /// Rows with a non-NULL value in this column are excluded
    pub soft_delete: Option<&'a str>,
    pub limit: Option<usize>,
}

impl ScanQuery<'_> {
    pub fn to_sql(&self, table: &str) -> String {
        let select = self.columns.iter().map(|c| format!("{}::text", quote_ident(c))).collect::<Vec<_>>().join(", ");
        let mut sql = format!("SELECT {} FROM {}", select, quote_ident(table));
        if let Some(column) = self.soft_delete {
            sql.push_str(&format!(" WHERE {} IS NULL", quote_ident(column)));
        }
        sql.push_str(&format!(" ORDER BY {} ASC", quote_ident(self.order_by)));
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        sql
    }
}

/// Read access to the post table
pub trait PostSource {
    /// Human-readable connection target, e.g. `railway@localhost`
    fn describe(&self) -> String;

    /// Columns of the post table in ordinal order
    fn columns(&mut self) -> Result<Vec<ColumnInfo>, MigrateError>;

    /// Run an ordered scan; each row holds exactly the requested columns
    fn fetch(&mut self, query: &ScanQuery<'_>) -> Result<Vec<SourceRow>, MigrateError>;

    /// Release the connection
    fn close(self) -> Result<(), MigrateError>
    where
        Self: Sized;
}

pub struct PgSource {
    client: Client,
    table: String,
    target: String,
}

impl PgSource {
    /// Open a connection. Failure is fatal for the run and not retried.
    pub fn connect(config: &ConnectionConfig, table: &str) -> Result<Self, MigrateError> {
        let target = config.target();
        debug!("connecting to {} (port {}, user {})", target, config.port, config.user);
        let client = config
            .to_pg_config()
            .connect(NoTls)
            .map_err(|source| MigrateError::Connect { target: target.clone(), source })?;
        Ok(PgSource { client, table: table.to_string(), target })
    }
}

impl PostSource for PgSource {
    fn describe(&self) -> String {
        self.target.clone()
    }

    fn columns(&mut self) -> Result<Vec<ColumnInfo>, MigrateError> {
        let rows = self
            .client
            .query(
                "SELECT column_name::text, data_type::text \
                 FROM information_schema.columns \
                 WHERE table_name = $1::text \
                 ORDER BY ordinal_position",
                &[&self.table],
            )
            .map_err(|source| MigrateError::Query { context: "column introspection", source })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String =
                row.try_get(0).map_err(|source| MigrateError::Query { context: "column introspection", source })?;
            let data_type: String =
                row.try_get(1).map_err(|source| MigrateError::Query { context: "column introspection", source })?;
            columns.push(ColumnInfo::new(name, data_type));
        }
        Ok(columns)
    }

    fn fetch(&mut self, query: &ScanQuery<'_>) -> Result<Vec<SourceRow>, MigrateError> {
        let sql = query.to_sql(&self.table);
        debug!("{}", sql);
        let rows = self.client.query(sql.as_str(), &[]).map_err(|source| MigrateError::Query { context: "post scan", source })?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let mut source_row = SourceRow::new();
            for (idx, column) in query.columns.iter().enumerate() {
                let value: Option<String> =
                    row.try_get(idx).map_err(|source| MigrateError::Query { context: "post scan", source })?;
                source_row.push(*column, Value::from(value));
            }
            out.push(source_row);
        }
        Ok(out)
    }

    fn close(self) -> Result<(), MigrateError> {
        debug!("closing connection to {}", self.target);
        self.client.close().map_err(|source| MigrateError::Query { context: "connection close", source })
    }
}

/// Double-quote an SQL identifier
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
