/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 20)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `ENVIRONMENT`: `development` or `production` (default: development)
/// - `LOG_LEVEL`: Log level used when `RUST_LOG` is unset (default: info)
///
/// # Example
///
/// ```no_run
/// use taskboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Production mode enables HSTS
    pub production: bool,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Flat view of the environment as the `config` crate sees it
#[derive(Debug, Deserialize)]
struct EnvSettings {
    database_url: Option<String>,
    database_max_connections: u32,
    api_host: String,
    api_port: u16,
    cors_origins: String,
    environment: String,
    log_level: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing
    /// - Environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default())
    }

    /// Builds the configuration from an explicit environment source
    pub fn from_source(environment: config::Environment) -> anyhow::Result<Self> {
        let settings: EnvSettings = config::Config::builder()
            .set_default("database_max_connections", 20)?
            .set_default("api_host", "0.0.0.0")?
            .set_default("api_port", 8000)?
            .set_default("cors_origins", "*")?
            .set_default("environment", "development")?
            .set_default("log_level", "info")?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration value")?;

        let database_url = settings
            .database_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let cors_origins = settings
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            api: ApiConfig {
                host: settings.api_host,
                port: settings.api_port,
                cors_origins,
                production: settings.environment.eq_ignore_ascii_case("production"),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: settings.database_max_connections,
            },
            log_level: settings.log_level,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
