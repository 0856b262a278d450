//! PostgreSQL client implementation
//!
//! This module provides the pooled, TLS-only client used by the PostgreSQL
//! sink. Server certificates are always verified; an additional root CA can
//! be supplied through `postgresql.ca_cert` for privately-signed servers.

use crate::config::schema::PostgresConfig;
use crate::domain::errors::SinkError;
use crate::domain::{CaravelError, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use native_tls::{Certificate, TlsConnector};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;

/// Pooled PostgreSQL client
pub struct PostgresClient {
    /// Connection pool
    pool: Pool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client
    ///
    /// # Arguments
    ///
    /// * `config` - PostgreSQL configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS connector or the connection pool cannot
    /// be built.
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .user(&config.user)
            .password(config.password.expose_secret().as_ref())
            .dbname(&config.dbname)
            .connect_timeout(Duration::from_secs(config.connection_timeout_seconds));

        let tls = build_tls_connector(config.ca_cert.as_deref())?;

        let manager = Manager::from_config(
            pg_config,
            tls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .runtime(Runtime::Tokio1)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .build()
            .map_err(|e| {
                CaravelError::Sink(SinkError::ConnectionFailed(format!(
                    "Failed to create connection pool: {e}"
                )))
            })?;

        Ok(Self { pool })
    }

    /// Test the connection to PostgreSQL
    ///
    /// Attempts to get a connection from the pool and execute a simple query.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.get_connection().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| {
                CaravelError::Sink(SinkError::ConnectionFailed(format!(
                    "Connection test failed: {e}"
                )))
            })?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Ensure the database schema exists
    ///
    /// Runs the migration SQL to create the orders tables and indexes if
    /// they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.get_connection().await?;

        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");

        client.batch_execute(migration_sql).await.map_err(|e| {
            CaravelError::Sink(SinkError::ConnectionFailed(format!(
                "Failed to execute migration: {e}"
            )))
        })?;

        tracing::info!("PostgreSQL schema initialized successfully");
        Ok(())
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    ///
    /// Returns an error if a connection cannot be obtained.
    pub async fn get_connection(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            CaravelError::Sink(SinkError::ConnectionFailed(format!(
                "Failed to get connection from pool: {e}"
            )))
        })
    }
}

/// Build the TLS connector used for every connection
///
/// Certificate verification is always on; there is no plaintext or
/// skip-verification mode.
fn build_tls_connector(ca_cert: Option<&str>) -> Result<MakeTlsConnector> {
    let mut builder = TlsConnector::builder();

    if let Some(path) = ca_cert {
        let pem = std::fs::read(path).map_err(|e| {
            CaravelError::Configuration(format!("Failed to read CA certificate {path}: {e}"))
        })?;
        let cert = Certificate::from_pem(&pem).map_err(|e| {
            CaravelError::Configuration(format!("Invalid CA certificate {path}: {e}"))
        })?;
        builder.add_root_certificate(cert);
    }

    let connector = builder
        .build()
        .map_err(|e| CaravelError::Configuration(format!("Failed to build TLS connector: {e}")))?;

    Ok(MakeTlsConnector::new(connector))
}
