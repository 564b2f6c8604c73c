use std::{fs, net::SocketAddr};

use tardi_core::errors::{Error, Result};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:7071";
const DEFAULT_DB_POOL_SIZE: u32 = 4;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub db_pool_size: u32,
}

impl Config {
    /// Builds a config from explicit values, with defaults for the rest.
    pub fn new(listen_addr: SocketAddr, database_url: impl Into<String>) -> Self {
        Self {
            listen_addr,
            database_url: database_url.into(),
            db_pool_size: DEFAULT_DB_POOL_SIZE,
        }
    }

    /// Reads the config from the process environment (and `.env`, if present).
    ///
    /// The database location is a secret and has no default: it comes from
    /// `TARDI_DATABASE_URL`, or from the file named by `TARDI_DATABASE_URL_FILE`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("TARDI_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|e| Error::Configuration(format!("invalid TARDI_LISTEN_ADDR: {}", e)))?;
        let database_url = database_url_from_env()?;
        let db_pool_size: u32 = std::env::var("TARDI_DB_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_DB_POOL_SIZE);

        Ok(Self {
            listen_addr,
            database_url,
            db_pool_size,
        })
    }
}

fn database_url_from_env() -> Result<String> {
    if let Some(url) = std::env::var("TARDI_DATABASE_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    {
        return Ok(url);
    }

    let path = std::env::var("TARDI_DATABASE_URL_FILE").map_err(|_| {
        Error::Configuration(
            "set TARDI_DATABASE_URL or TARDI_DATABASE_URL_FILE to locate the database".to_string(),
        )
    })?;
    let url = fs::read_to_string(&path)
        .map_err(|e| Error::Configuration(format!("cannot read {}: {}", path, e)))?;
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::Configuration(format!("{} is empty", path)));
    }
    Ok(url.to_string())
}
