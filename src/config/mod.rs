//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    10
}

/// Application configuration.
///
/// Loaded from an optional YAML file, with environment variables taking
/// precedence (`DATABASE_URL`, `INKPOST_HOST`, `INKPOST_PORT`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interface the HTTP listener binds to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP listener binds to
    #[serde(default = "default_port")]
    pub port: u16,

    /// PostgreSQL connection string; usually supplied via `DATABASE_URL`
    #[serde(default)]
    pub database_url: Option<String>,

    /// Upper bound on the shared connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("failed to parse config")?;
        Ok(config)
    }

    /// Load configuration: the YAML file when given, defaults otherwise,
    /// then environment overrides on top.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = Some(url);
        }
        if let Ok(host) = std::env::var("INKPOST_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("INKPOST_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid INKPOST_PORT '{}'", port))?;
        }

        Ok(config)
    }

    /// The socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The database connection string, required at startup
    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set (environment or config file)")
    }
}
