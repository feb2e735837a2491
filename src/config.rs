use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Mongo { uri: String, db_name: String, collection: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeedLocation {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub bind_addr: SocketAddr,
    pub seed: SeedLocation,
    pub seed_timeout: Duration,
    pub seed_max_retries: u32,
    pub seed_retry_delay: Duration,
    pub query_timeout: Duration,
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { name, value })
        }
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = match lookup("STORAGE_BACKEND").as_deref().unwrap_or("mongo") {
            "mongo" => StorageBackend::Mongo {
                uri: lookup("MONGO_URI").ok_or(ConfigError::Missing("MONGO_URI"))?,
                db_name: lookup("DB_NAME").unwrap_or_else(|| "transactions".to_string()),
                collection: lookup("COLLECTION_NAME")
                    .unwrap_or_else(|| "transactions".to_string()),
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let seed = match lookup("SEED_FILE") {
            Some(path) => SeedLocation::File(PathBuf::from(path)),
            None => SeedLocation::Url(
                lookup("SEED_URL").unwrap_or_else(|| DEFAULT_SEED_URL.to_string()),
            ),
        };

        Ok(Self {
            storage,
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            seed,
            seed_timeout: Duration::from_secs(parse_or(&lookup, "SEED_TIMEOUT_SECS", 30)?),
            seed_max_retries: parse_or(&lookup, "SEED_MAX_RETRIES", 3)?,
            seed_retry_delay: Duration::from_secs(parse_or(&lookup, "SEED_RETRY_DELAY_SECS", 2)?),
            query_timeout: Duration::from_secs(parse_or(&lookup, "QUERY_TIMEOUT_SECS", 10)?),
        })
    }
}
