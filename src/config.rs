use std::{env, path::PathBuf, str::FromStr};

use derive_more::Display;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display(fmt = "env {} must be set", _0)]
    Missing(&'static str),
    #[display(fmt = "env {} has an invalid value: {:?}", _0, _1)]
    Invalid(&'static str, String),
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub pool_size: u32,
    /// `None` keeps `limit` unbounded.
    pub max_page_size: Option<i64>,
    /// `None` accepts uploads of any size.
    pub max_upload_bytes: Option<usize>,
}

fn optional<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key, raw)),
        Err(_) => Ok(None),
    }
}

impl AppConfig {
    /// Reads the process environment; call `dotenv::dotenv()` first to pick
    /// up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let max_page_size = optional::<i64>("MAX_PAGE_SIZE")?;
        if let Some(max) = max_page_size {
            if max < 1 {
                return Err(ConfigError::Invalid("MAX_PAGE_SIZE", max.to_string()));
            }
        }

        Ok(AppConfig {
            database_url,
            port: optional("PORT")?.unwrap_or(DEFAULT_PORT),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            pool_size: optional("DATABASE_POOL_SIZE")?.unwrap_or(DEFAULT_POOL_SIZE),
            max_page_size,
            max_upload_bytes: optional("MAX_UPLOAD_BYTES")?,
        })
    }
}
