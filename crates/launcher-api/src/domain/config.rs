//! Server configuration with validation.
//!
//! One immutable [`ServerConfig`] is built at startup (CLI flags / environment)
//! and shared by every handler behind an `Arc`. Nothing mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Secret used when `SECRET_KEY` is not set. Never acceptable in production.
pub const DEFAULT_SECRET_KEY: &str = "your-secret-key-here";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 5000;

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP listener configuration
    pub http: HttpConfig,
    /// On-disk layout
    pub storage: StorageConfig,
    /// Envelope signing configuration
    pub security: SecurityConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.secret_key.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        if self.storage.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("base_dir cannot be empty".into()));
        }

        if self.security.require_secret {
            self.validate_for_production()?;
        }

        Ok(())
    }

    /// Reject the built-in default secret.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.security.uses_default_secret() {
            return Err(ConfigError::InsecureSecret);
        }
        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 5000)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: DEFAULT_PORT,
        }
    }
}

/// On-disk layout rooted at `base_dir`.
///
/// ```text
/// base_dir/
/// ├── config.json  news.json  versions.json  mods.json  builds.json  updates.json
/// ├── downloads/{mods,builds,updates}/
/// └── logs/{stats,feedback}.json   (created on demand)
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root of the served tree
    pub base_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }
}

impl StorageConfig {
    /// Path of a top-level JSON source file.
    pub fn source_file(&self, file_name: &str) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// `downloads/<subdir>` directory.
    pub fn downloads_dir(&self, subdir: &str) -> PathBuf {
        self.base_dir.join("downloads").join(subdir)
    }

    /// `logs/` directory.
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Path of a telemetry log file.
    pub fn log_file(&self, file_name: &str) -> PathBuf {
        self.logs_dir().join(file_name)
    }
}

/// Envelope signing configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared HMAC secret (never serialized back out)
    #[serde(skip_serializing)]
    pub secret_key: String,
    /// Refuse to start with the default secret
    pub require_secret: bool,
}

impl SecurityConfig {
    /// True if the secret is the built-in placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(), // MUST be overridden in production
            require_secret: false,
        }
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret_key", &"[REDACTED]")
            .field("require_secret", &self.require_secret)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            max_age: 86400, // 24 hours
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Secret key is empty
    #[error("secret key cannot be empty")]
    EmptySecret,
    /// Secret key is the built-in default
    #[error(
        "SECURITY VIOLATION: secret key is the built-in default. \
         Set the SECRET_KEY environment variable."
    )]
    InsecureSecret,
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
