//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, CORS and static
//! file settings.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::observability::LogFormat;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Log format matching the environment
    pub fn log_format(&self) -> LogFormat {
        match self {
            Environment::Development => LogFormat::Pretty,
            Environment::Production => LogFormat::Json,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Development or production
    #[serde(default)]
    pub environment: Environment,

    /// Allowed origins in production; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Built browser app served in production
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// Request body limit for dataset uploads
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            cors_origins: Vec::new(),
            static_dir: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether CORS is limited to `cors_origins`
    pub fn strict_cors(&self) -> bool {
        self.environment.is_production() && !self.cors_origins.is_empty()
    }

    /// Static directory, only honoured in production
    pub fn served_static_dir(&self) -> Option<&PathBuf> {
        self.static_dir
            .as_ref()
            .filter(|_| self.environment.is_production())
    }
}
