//! Applies or reverts the taskmate `PostgreSQL` schema.
//!
//! Usage:
//!
//! ```text
//! taskmate-schema <up|down> [config-path]
//! ```
//!
//! The database URL is read from the optional JSON configuration file and
//! may be overridden with `TASKMATE_DATABASE_URL`. Log verbosity follows
//! `RUST_LOG` and defaults to `info`.

use camino::Utf8PathBuf;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::{Connection, ConnectionError};
use std::env;
use taskmate::config::{ConfigError, TaskmateConfig};
use taskmate::migrations::{CREATE_TABLES_SQL, DROP_TABLES_SQL};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while managing the schema.
#[derive(Debug, Error)]
enum SchemaError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no database URL configured; set TASKMATE_DATABASE_URL or database_url")]
    MissingDatabaseUrl,
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] ConnectionError),
    #[error("failed to execute schema SQL: {0}")]
    Execute(#[source] diesel::result::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Up,
    Down,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, SchemaError> {
        match arg {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(SchemaError::InvalidArgs(format!(
                "unknown operation '{other}'; expected up or down"
            ))),
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::Up => CREATE_TABLES_SQL,
            Self::Down => DROP_TABLES_SQL,
        }
    }
}

fn main() -> Result<(), BoxError> {
    init_tracing();
    let args = collect_args()?;
    let (operation, config_path) = parse_args(args.into_iter())?;
    let config = load_config(config_path)?;
    run(operation, &config).map_err(Into::into)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn collect_args() -> Result<Vec<String>, SchemaError> {
    env::args_os()
        .skip(1)
        .map(|arg| {
            arg.into_string()
                .map_err(|_| SchemaError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<(Operation, Option<Utf8PathBuf>), SchemaError> {
    let operation = args
        .next()
        .ok_or_else(|| SchemaError::InvalidArgs("missing operation (up or down)".into()))
        .and_then(|arg| Operation::parse(&arg))?;
    let config_path = args.next().map(Utf8PathBuf::from);
    if let Some(extra) = args.next() {
        return Err(SchemaError::InvalidArgs(format!(
            "unexpected argument '{extra}'"
        )));
    }
    Ok((operation, config_path))
}

fn load_config(path: Option<Utf8PathBuf>) -> Result<TaskmateConfig, SchemaError> {
    let base = match path {
        Some(config_path) => TaskmateConfig::load(&config_path)?,
        None => TaskmateConfig::default(),
    };
    Ok(base.with_env_overrides(|key| env::var(key).ok()))
}

fn run(operation: Operation, config: &TaskmateConfig) -> Result<(), SchemaError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or(SchemaError::MissingDatabaseUrl)?;
    let mut connection = PgConnection::establish(url).map_err(SchemaError::Connect)?;
    connection
        .batch_execute(operation.sql())
        .map_err(SchemaError::Execute)?;
    tracing::info!(?operation, "schema operation applied");
    Ok(())
}
