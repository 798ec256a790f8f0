//! Server configuration for the listing REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `REST_SERVER_PORT` | 8080 | Server port |
//! | `REST_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `REST_LOG_LEVEL` | info | Log level |
//! | `REST_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `REST_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `REST_ENABLE_CORS` | true | Enable CORS |
//! | `REST_CORS_ORIGINS` | * | Allowed origins |
//! | `REST_CORS_METHODS` | GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `REST_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `REST_BASE_URL` | http://localhost:8080 | Base URL used in links |
//! | `REST_STORAGE_BACKEND` | memory | `memory` or `sqlite` |
//! | `REST_DATABASE_URL` | - | SQLite database path |
//! | `REST_DEFAULT_PAGE_SIZE` | 10 | Page size when none is requested |
//! | `REST_MAX_PAGE_SIZE` | 10 | Largest page size a client may request |
//! | `REST_DEFAULT_ORDER_BY` | Name | Company ordering when none is requested |
//! | `REST_ENABLE_UPSERT` | false | Create products on PUT to an unknown id |
//!
//! # Example
//!
//! ```rust
//! use hsl_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_upsert: true,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use clap::Parser;
use hsl_persistence::types::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_ORDER_BY};

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendMode {
    /// Records held in process memory.
    Memory,
    /// Records held in a SQLite database.
    Sqlite,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::Memory => write!(f, "memory"),
            StorageBackendMode::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for StorageBackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackendMode::Memory),
            "sqlite" => Ok(StorageBackendMode::Sqlite),
            other => Err(format!(
                "unknown storage backend '{}' (expected 'memory' or 'sqlite')",
                other
            )),
        }
    }
}

/// Server configuration for the listing REST API.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "hsl")]
#[command(about = "Healthcare Software Listing API Server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "REST_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "REST_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "REST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "REST_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "REST_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "REST_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "REST_CORS_METHODS",
        default_value = "GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "REST_CORS_HEADERS", default_value = "Content-Type,Accept")]
    pub cors_headers: String,

    /// Base URL for the server (used in Location headers and links).
    #[arg(long, env = "REST_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Storage backend (memory or sqlite).
    #[arg(long, env = "REST_STORAGE_BACKEND", default_value = "memory")]
    pub storage_backend: String,

    /// Database path for the SQLite backend.
    #[arg(long, env = "REST_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Page size used when a request names none.
    #[arg(long, env = "REST_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: usize,

    /// Largest page size a request may ask for.
    #[arg(long, env = "REST_MAX_PAGE_SIZE", default_value = "10")]
    pub max_page_size: usize,

    /// Company ordering used when a request names none.
    #[arg(long, env = "REST_DEFAULT_ORDER_BY", default_value = "Name")]
    pub default_order_by: String,

    /// Create a product when PUT targets an id that does not exist.
    #[arg(long, env = "REST_ENABLE_UPSERT", default_value = "false")]
    pub enable_upsert: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,HEAD,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            storage_backend: "memory".to_string(),
            database_url: None,
            default_page_size: DEFAULT_MAX_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            default_order_by: DEFAULT_ORDER_BY.to_string(),
            enable_upsert: false,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Parses the configured storage backend.
    pub fn storage_backend_mode(&self) -> Result<StorageBackendMode, String> {
        self.storage_backend.parse()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.max_page_size == 0 {
            errors.push("Max page size cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if let Err(e) = url::Url::parse(&self.base_url) {
            errors.push(format!("Base URL '{}' is invalid: {}", self.base_url, e));
        }

        if let Err(e) = self.storage_backend_mode() {
            errors.push(format!("Storage backend: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost".to_string(),
            ..Self::default()
        }
    }
}
