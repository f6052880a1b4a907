use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on a single search, store read included
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub api_default_limit: usize,
    pub api_max_limit: usize,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

/// Read an environment variable, falling back to `default`, and parse it
fn env_or<T: FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/cookwizard.db".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let external_url = std::env::var("EXTERNAL_URL").ok();

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", "10")?,
                min_connections: env_or("DATABASE_MIN_CONNECTIONS", "1")?,
                connection_timeout_seconds: env_or("DATABASE_CONNECTION_TIMEOUT", "30")?,
                idle_timeout_seconds: env_or("DATABASE_IDLE_TIMEOUT", "600")?,
            },
            server: ServerConfig {
                host,
                port: env_or("PORT", "8000")?,
                external_url,
                api_rate_limit: env_or("API_RATE_LIMIT", "100")?,
            },
            search: SearchConfig {
                timeout_seconds: env_or("SEARCH_TIMEOUT_SECONDS", "10")?,
            },
            pagination: PaginationConfig {
                api_default_limit: env_or("API_DEFAULT_LIMIT", "100")?,
                api_max_limit: env_or("API_MAX_LIMIT", "100")?,
                max_request_body_size: env_or("MAX_REQUEST_BODY_SIZE", "1048576")?,
            },
            session: SessionConfig {
                ttl_seconds: env_or("SESSION_TTL_SECONDS", "1800")?,
                sweep_interval_seconds: env_or("SESSION_SWEEP_INTERVAL", "300")?,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.search.timeout_seconds == 0 {
            return Err(Error::Config(
                "Search timeout must be non-zero".to_string(),
            ));
        }

        if self.pagination.api_max_limit == 0 {
            return Err(Error::Config("API max limit must be non-zero".to_string()));
        }

        if self.session.ttl_seconds == 0 || self.session.sweep_interval_seconds == 0 {
            return Err(Error::Config(
                "Session TTL and sweep interval must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL the CLI uses to reach a running server
    pub fn server_url(&self) -> String {
        self.server
            .external_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.server.host, self.server.port))
    }

    /// Settings suitable for tests: in-memory database, generous limits
    pub fn for_tests() -> Self {
        Settings {
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                external_url: None,
                api_rate_limit: 100,
            },
            search: SearchConfig { timeout_seconds: 5 },
            pagination: PaginationConfig {
                api_default_limit: 100,
                api_max_limit: 100,
                max_request_body_size: 1048576,
            },
            session: SessionConfig {
                ttl_seconds: 1800,
                sweep_interval_seconds: 300,
            },
        }
    }
}
