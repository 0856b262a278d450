//! Configuration schema types
//!
//! This module defines the configuration structure for Caravel. The TOML file
//! maps onto [`CaravelConfig`]; both sink configurations may be present in the
//! file, but only the one selected by `sink.target` is validated and used.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Sink target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    /// PostgreSQL database
    PostgreSQL,
    /// Local JSON export files
    Json,
}

impl std::fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkTarget::PostgreSQL => write!(f, "postgresql"),
            SinkTarget::Json => write!(f, "json"),
        }
    }
}

/// Main Caravel configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaravelConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Wix orders search API configuration
    pub wix: WixConfig,

    /// Sink selection (postgresql or json)
    pub sink: SinkConfig,

    /// PostgreSQL configuration (required if sink.target = postgresql)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postgresql: Option<PostgresConfig>,

    /// JSON export configuration (required if sink.target = json)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<JsonExportConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CaravelConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.wix.validate()?;

        // Only the active sink configuration is validated so the inactive
        // section may stay in the file with placeholder values.
        match self.sink.target {
            SinkTarget::PostgreSQL => {
                if let Some(ref config) = self.postgresql {
                    config.validate()?;
                } else {
                    return Err(
                        "postgresql configuration is required when sink.target = 'postgresql'"
                            .to_string(),
                    );
                }
            }
            SinkTarget::Json => {
                if let Some(ref config) = self.export {
                    config.validate()?;
                } else {
                    return Err(
                        "export configuration is required when sink.target = 'json'".to_string()
                    );
                }
            }
        }

        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Wix orders search API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WixConfig {
    /// Base URL of the Wix API
    #[serde(default = "default_wix_base_url")]
    pub base_url: String,

    /// API credential, forwarded verbatim in the Authorization header.
    /// Stored securely in memory and automatically zeroized on drop.
    pub auth_token: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl WixConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("wix.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("wix.base_url must start with http:// or https://".to_string());
        }

        if self.auth_token.expose_secret().is_empty() {
            return Err("wix.auth_token cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("wix.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Sink selection and write behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Destination for flattened rows
    pub target: SinkTarget,

    /// Wrap the whole session write in a single transaction.
    ///
    /// The default (`false`) keeps inserts row-by-row with no rollback, so
    /// a mid-write failure can leave a partial table behind. Enabling this
    /// makes the session write all-or-nothing across both tables.
    #[serde(default)]
    pub transactional: bool,
}

/// PostgreSQL sink configuration
///
/// TLS certificate verification is mandatory; there is no insecure fallback.
/// For servers with a private CA, point `ca_cert` at the CA bundle (PEM).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,

    #[serde(default = "default_pg_port")]
    pub port: u16,

    pub user: String,

    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    pub dbname: String,

    /// Path to a PEM CA certificate for TLS verification (optional; system
    /// roots are used when absent)
    #[serde(default)]
    pub ca_cert: Option<String>,

    /// Maximum number of connections in the pool
    #[serde(default = "default_pg_max_connections")]
    pub max_connections: usize,

    /// Connection timeout in seconds
    #[serde(default = "default_pg_connection_timeout_seconds")]
    pub connection_timeout_seconds: u64,
}

impl PostgresConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("postgresql.host cannot be empty".to_string());
        }

        if self.user.is_empty() {
            return Err("postgresql.user cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("postgresql.password cannot be empty".to_string());
        }

        if self.dbname.is_empty() {
            return Err("postgresql.dbname cannot be empty".to_string());
        }

        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(format!(
                "postgresql.max_connections must be between 1 and 100, got {}",
                self.max_connections
            ));
        }

        Ok(())
    }
}

/// JSON export sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonExportConfig {
    /// Directory the export files are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for JsonExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl JsonExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_wix_base_url() -> String {
    "https://www.wixapis.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pg_max_connections() -> usize {
    10
}

fn default_pg_connection_timeout_seconds() -> u64 {
    30
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
