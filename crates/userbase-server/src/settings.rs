//! Server settings, read from environment variables.

use config::{Config, ConfigError, Environment};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use userbase_core::{Result, UserbaseError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_MAX_CONNECTIONS: i64 = 5;
const DATABASE_FILE: &str = "userbase.db";

/// Which repository backs the user resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Sqlite,
}

impl std::str::FromStr for StorageKind {
    type Err = UserbaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageKind::Memory),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(UserbaseError::Config(format!(
                "unknown storage backend '{}', expected 'memory' or 'sqlite'",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub storage: StorageKind,
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub log_level: String,
}

impl ServerConfig {
    /// Load from the process environment.
    ///
    /// Recognised variables: `BIND_ADDRESS`, `STORAGE`, `DATA_DIR`,
    /// `DATABASE_PATH`, `DB_MAX_CONNECTIONS`, `LOG_LEVEL`.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)
            .and_then(|b| b.set_default("storage", "memory"))
            .and_then(|b| b.set_default("data_dir", DEFAULT_DATA_DIR))
            .and_then(|b| b.set_default("db_max_connections", DEFAULT_MAX_CONNECTIONS))
            .and_then(|b| b.set_default("log_level", "info"))
            .map_err(config_error)?
            .add_source(env)
            .build()
            .map_err(config_error)?;

        let bind_address = settings
            .get_string("bind_address")
            .map_err(config_error)?
            .parse::<SocketAddr>()
            .map_err(|e| UserbaseError::Config(format!("invalid BIND_ADDRESS: {}", e)))?;

        let storage = settings
            .get_string("storage")
            .map_err(config_error)?
            .parse::<StorageKind>()?;

        let database_path = match settings.get_string("database_path") {
            Ok(path) => PathBuf::from(path),
            Err(ConfigError::NotFound(_)) => {
                let data_dir = settings.get_string("data_dir").map_err(config_error)?;
                PathBuf::from(data_dir).join(DATABASE_FILE)
            }
            Err(e) => return Err(config_error(e)),
        };

        let max_connections = settings
            .get_int("db_max_connections")
            .map_err(config_error)?;
        let max_connections = u32::try_from(max_connections)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                UserbaseError::Config(format!(
                    "DB_MAX_CONNECTIONS must be a positive integer, got {}",
                    max_connections
                ))
            })?;

        let log_level = settings.get_string("log_level").map_err(config_error)?;

        Ok(Self {
            bind_address,
            storage,
            database_path,
            max_connections,
            log_level,
        })
    }
}

fn config_error(e: ConfigError) -> UserbaseError {
    UserbaseError::Config(e.to_string())
}
