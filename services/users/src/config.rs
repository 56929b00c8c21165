//! Service configuration
//!
//! Values are layered, highest precedence first:
//! 1. command line flags (`--db` also reads `POSTGRES_DSN`)
//! 2. `APP_`-prefixed environment variables, `__` separating nested keys
//!    (`APP_SERVER__PORT`, `APP_DATABASE__MAX_CONNECTIONS`, `APP_MIGRATE`)
//! 3. built-in defaults

use clap::Parser;
use common::database::DatabaseConfig;
use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

/// Command line flags
#[derive(Debug, Default, Parser)]
#[command(name = "users", about = "HTTP CRUD service for the users table")]
pub struct Cli {
    /// PostgreSQL connection string
    #[arg(long = "db", env = "POSTGRES_DSN")]
    pub db: Option<String>,

    /// Create the users table and its trigger before serving
    #[arg(long)]
    pub migrate: bool,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds to wait for in-flight requests after a shutdown signal
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_shutdown_timeout() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Run the schema migration at startup
    #[serde(default)]
    pub migrate: bool,
}

impl AppConfig {
    /// Merge flags, environment and defaults
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", cli.db.clone())?
            .set_override_option("server.host", cli.host.clone())?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("migrate", cli.migrate.then_some(true))?
            .build()?
            .try_deserialize()
    }
}
