//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Caravel configuration file.

use crate::config::{load_config, SinkTarget};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Wix API: {}", config.wix.base_url);
        println!("  Request Timeout: {}s", config.wix.timeout_seconds);
        println!("  Sink: {}", config.sink.target);
        println!("  Transactional: {}", config.sink.transactional);

        match config.sink.target {
            SinkTarget::PostgreSQL => {
                if let Some(ref pg_config) = config.postgresql {
                    println!(
                        "  PostgreSQL: {}@{}:{}/{}",
                        pg_config.user, pg_config.host, pg_config.port, pg_config.dbname
                    );
                    println!("  Max Connections: {}", pg_config.max_connections);
                }
            }
            SinkTarget::Json => {
                if let Some(ref export_config) = config.export {
                    println!("  Output Directory: {}", export_config.output_dir);
                }
            }
        }

        println!();
        Ok(0)
    }
}
