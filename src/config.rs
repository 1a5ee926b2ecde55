//! Server configuration read from the environment.
//!
//! | Variable        | Default          |
//! |-----------------|------------------|
//! | `HOST`          | `127.0.0.1`      |
//! | `PORT`          | `3000`           |
//! | `DATABASE_PATH` | `todo_lists.db`  |
//! | `LOG_DIR`       | `logs`           |
//!
//! Empty or whitespace-only values fall back to the default. `RUST_LOG` is
//! read by the logger, not here.

use std::env;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
    #[error("{0} is not valid UTF-8")]
    NotUnicode(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_path: PathBuf::from("todo_lists.db"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Build the config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, env::VarError>,
    {
        let read = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Ok(value) => {
                    let trimmed = value.trim();
                    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
                }
                Err(env::VarError::NotPresent) => Ok(None),
                Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
            }
        };

        let defaults = Self::default();

        let port = match read("PORT")? {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort(value))?,
            None => defaults.port,
        };

        Ok(Self {
            host: read("HOST")?.unwrap_or(defaults.host),
            port,
            database_path: read("DATABASE_PATH")?.map(PathBuf::from).unwrap_or(defaults.database_path),
            log_dir: read("LOG_DIR")?.map(PathBuf::from).unwrap_or(defaults.log_dir),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
