//! Process settings from environment variables (optionally seeded by a `.env` file).

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FILE_PATH: &str = "file.json";
pub const DEFAULT_DB_SCHEMA: &str = "hbnb";
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub enum StorageBackend {
    Memory,
    File {
        path: PathBuf,
    },
    Database {
        url: String,
        schema: String,
        max_connections: u32,
    },
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HBNB_API_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port = parse_or(get("HBNB_API_PORT"), "HBNB_API_PORT", DEFAULT_PORT)?;
        let body_limit = parse_or(get("HBNB_BODY_LIMIT"), "HBNB_BODY_LIMIT", DEFAULT_BODY_LIMIT)?;

        let storage = match get("HBNB_TYPE_STORAGE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("file") => StorageBackend::File {
                path: get("HBNB_FILE_PATH").unwrap_or_else(|| DEFAULT_FILE_PATH.into()).into(),
            },
            Some("memory") => StorageBackend::Memory,
            Some("db") => StorageBackend::Database {
                url: get("DATABASE_URL").ok_or(ConfigError::InvalidSetting {
                    key: "DATABASE_URL",
                    value: String::new(),
                })?,
                schema: get("HBNB_DB_SCHEMA").unwrap_or_else(|| DEFAULT_DB_SCHEMA.into()),
                max_connections: parse_or(get("HBNB_DB_MAX_CONNECTIONS"), "HBNB_DB_MAX_CONNECTIONS", 5)?,
            },
            Some(other) => {
                return Err(ConfigError::InvalidSetting {
                    key: "HBNB_TYPE_STORAGE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Settings {
            host,
            port,
            storage,
            body_limit,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidSetting { key, value: v }),
    }
}
