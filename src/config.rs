//! Process configuration read from command line flags and environment variables.

use std::fmt::Display;

use clap::{Parser, ValueEnum};

/// The mode the server is running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RuntimeMode {
    /// Local development, verbose logging.
    #[default]
    Dev,
    /// Automated tests, quiet logging and `.env.test` for environment variables.
    Test,
    /// A deployed server.
    Production,
}

impl RuntimeMode {
    /// The default `tracing` filter directive for this mode.
    ///
    /// `RUST_LOG` takes precedence over this when it is set.
    pub fn default_log_directive(self) -> &'static str {
        match self {
            RuntimeMode::Dev => "debug",
            RuntimeMode::Test => "warn",
            RuntimeMode::Production => "info",
        }
    }

    /// The dotenv file holding environment variables for this mode.
    pub fn dotenv_file(self) -> &'static str {
        match self {
            RuntimeMode::Test => ".env.test",
            RuntimeMode::Dev | RuntimeMode::Production => ".env",
        }
    }
}

impl Display for RuntimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuntimeMode::Dev => "dev",
            RuntimeMode::Test => "test",
            RuntimeMode::Production => "production",
        };

        write!(f, "{name}")
    }
}

/// The storage backend for transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatabaseClient {
    /// A SQLite database file, or `:memory:` for a throwaway database.
    Sqlite,
}

/// The REST API server for the session ledger.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The mode to run the server in.
    ///
    /// The dotenv file (`.env`, or `.env.test` in test mode) is chosen from
    /// `APP_ENV` before the command line is parsed, so `--mode` does not
    /// change which file is loaded.
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = RuntimeMode::Dev)]
    pub mode: RuntimeMode,

    /// The database backend to store transactions in.
    #[arg(long, env = "DATABASE_CLIENT", value_enum)]
    pub database_client: DatabaseClient,

    /// Where to find the database, e.g. a file path for SQLite.
    #[arg(long, env = "DATABASE_URL", value_parser = parse_database_url)]
    pub database_url: String,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3333)]
    pub port: u16,
}

fn parse_database_url(url: &str) -> Result<String, String> {
    let url = url.trim();

    if url.is_empty() {
        return Err("the database URL cannot be empty".to_owned());
    }

    Ok(url.to_owned())
}

/// Read the runtime mode from `APP_ENV` before the full configuration is parsed.
///
/// The mode decides which dotenv file to load, so it has to be known before
/// the remaining variables are read. Unknown values fall back to the default
/// here and are reported properly when [Config] is parsed.
pub fn mode_from_env() -> RuntimeMode {
    std::env::var("APP_ENV")
        .ok()
        .and_then(|mode| RuntimeMode::from_str(&mode, true).ok())
        .unwrap_or_default()
}
