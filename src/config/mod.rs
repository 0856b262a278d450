//! Configuration management for Caravel.
//!
//! Caravel uses a TOML configuration file (`caravel.toml`) with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CARAVEL_*` environment variable overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [wix]
//! auth_token = "${WIX_AUTH_TOKEN}"
//!
//! [sink]
//! target = "postgresql"
//!
//! [postgresql]
//! host = "db.example.com"
//! user = "caravel"
//! password = "${DB_PASSWORD}"
//! dbname = "shop"
//! ca_cert = "/etc/caravel/db-ca.pem"
//! ```
//!
//! Credentials are held as [`SecretString`] values: zeroized on drop and
//! redacted from Debug output.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CaravelConfig, JsonExportConfig, LoggingConfig, PostgresConfig, SinkConfig,
    SinkTarget, WixConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
