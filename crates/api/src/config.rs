use std::str::FromStr;

use crate::auth::credentials::AdminCredentials;
use crate::auth::jwt::JwtConfig;

/// Which backend holds entity data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown storage backend '{other}' (expected 'postgres' or 'memory')"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// database URL, the signing secret and the admin credentials, which must be
/// supplied out-of-band.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Storage backend (default: `postgres`).
    pub storage: StorageBackend,
    /// PostgreSQL connection string. Required when `storage` is `Postgres`.
    pub database_url: Option<String>,
    /// Token signing and validation settings.
    pub jwt: JwtConfig,
    /// The single admin username/password pair.
    pub admin: AdminCredentials,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `STORAGE_BACKEND`      | `postgres`                 |
    /// | `DATABASE_URL`         | --                         |
    ///
    /// See [`JwtConfig::from_env`] and [`AdminCredentials::from_env`] for the
    /// auth settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let storage: StorageBackend = std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .parse()
            .unwrap_or_else(|e| panic!("STORAGE_BACKEND: {e}"));

        let database_url = std::env::var("DATABASE_URL").ok();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            storage,
            database_url,
            jwt: JwtConfig::from_env(),
            admin: AdminCredentials::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
