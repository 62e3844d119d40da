/// Configuration resolution module
///
/// This module handles:
/// - Reading connection parameters from the environment, with defaults
/// - Combining the `--force` flag with the `FORCE` environment variable
/// - Fixing the source table and destination directory
///
/// Everything is resolved once in `main` into a `MigrationConfig` that is
/// passed by reference to the runner.
use crate::cli::CliArgs;
use log::debug;
use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_DBNAME: &str = "railway";
pub const DEFAULT_USER: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "postgres";

/// Table the posts are read from
pub const SOURCE_TABLE: &str = "post";
/// Nullable timestamp column marking soft-deleted rows
pub const SOFT_DELETE_COLUMN: &str = "deleted_at";
/// Destination for generated posts, relative to the working directory
pub const OUTPUT_DIR: &str = "ko/_posts";

/// PostgreSQL connection parameters
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            dbname: DEFAULT_DBNAME.to_string(),
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Build from `PG_HOST`, `PG_PORT`, `PG_DBNAME`, `PG_USER`, `PG_PASSWORD`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ConnectionConfig::default();
        let port = match lookup("PG_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| format!("Invalid PG_PORT '{}': {}", raw, e))?,
            None => defaults.port,
        };
        Ok(ConnectionConfig {
            host: lookup("PG_HOST").unwrap_or(defaults.host),
            port,
            dbname: lookup("PG_DBNAME").unwrap_or(defaults.dbname),
            user: lookup("PG_USER").unwrap_or(defaults.user),
            password: lookup("PG_PASSWORD").unwrap_or(defaults.password),
        })
    }

    /// `dbname@host`, used in banners and error messages
    pub fn target(&self) -> String {
        format!("{}@{}", self.dbname, self.host)
    }

    pub fn to_pg_config(&self) -> postgres::Config {
        let mut config = postgres::Config::new();
        config.host(&self.host).port(self.port).dbname(&self.dbname).user(&self.user).password(&self.password);
        config
    }
}

/// Everything a migration run needs, resolved up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    pub connection: ConnectionConfig,
    pub table: String,
    pub soft_delete_column: String,
    pub output_dir: PathBuf,
    pub force_overwrite: bool,
}

impl MigrationConfig {
    /// Defaults for everything but the connection
    pub fn new(connection: ConnectionConfig, output_dir: impl Into<PathBuf>, force_overwrite: bool) -> Self {
        MigrationConfig {
            connection,
            table: SOURCE_TABLE.to_string(),
            soft_delete_column: SOFT_DELETE_COLUMN.to_string(),
            output_dir: output_dir.into(),
            force_overwrite,
        }
    }
}

/// Build the run configuration from CLI arguments and the process environment
pub fn build_config(args: &CliArgs) -> Result<MigrationConfig, String> {
    build_config_with(args, |key| env::var(key).ok())
}

/// Build the run configuration with an explicit environment lookup
pub fn build_config_with<F>(args: &CliArgs, lookup: F) -> Result<MigrationConfig, String>
where
    F: Fn(&str) -> Option<String>,
{
    let connection = ConnectionConfig::from_lookup(&lookup)?;
    let force_env = lookup("FORCE").as_deref() == Some("1");
    let force_overwrite = args.force || force_env;

    debug!("Connection: {:?}", connection);
    debug!("Force overwrite: {} (flag: {}, FORCE=1: {})", force_overwrite, args.force, force_env);

    Ok(MigrationConfig::new(connection, OUTPUT_DIR, force_overwrite))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
