//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "caravel.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Caravel configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set sink.target to 'postgresql' or 'json'");
                println!("  3. Create a .env file with your credentials:");
                println!("     - Set CARAVEL_WIX_TOKEN");
                println!("     - Set CARAVEL_PG_PASSWORD (if using PostgreSQL)");
                println!("  4. Validate configuration: caravel validate-config");
                println!("  5. Run a fetch: caravel fetch");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Caravel Configuration File
# Wix Orders ETL Tool

[application]
log_level = "info"

[wix]
base_url = "https://www.wixapis.com"
auth_token = "${CARAVEL_WIX_TOKEN}"
timeout_seconds = 30

[sink]
# Sink target (postgresql or json)
target = "json"
# Wrap the whole PostgreSQL write in one transaction
transactional = false

[postgresql]
host = "localhost"
port = 5432
user = "caravel_user"
password = "${CARAVEL_PG_PASSWORD}"
dbname = "wix_orders"
# Optional: CA certificate for privately-signed servers
# ca_cert = "/path/to/ca.pem"
max_connections = 10
connection_timeout_seconds = 30

[export]
output_dir = "exports"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "caravel.toml".to_string(),
            force: false,
        };

        assert_eq!(args.output, "caravel.toml");
        assert!(!args.force);
    }

    #[test]
    fn test_generate_config_sections() {
        let config = InitArgs::generate_config();
        assert!(config.contains("[wix]"));
        assert!(config.contains("[sink]"));
        assert!(config.contains("[postgresql]"));
        assert!(config.contains("[export]"));
        assert!(config.contains("${CARAVEL_WIX_TOKEN}"));
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caravel.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            force: false,
        };

        let code = args.execute().await.unwrap();
        assert_eq!(code, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_init_writes_parseable_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caravel.toml");

        let args = InitArgs {
            output: path.to_str().unwrap().to_string(),
            force: false,
        };

        let code = args.execute().await.unwrap();
        assert_eq!(code, 0);

        let content = fs::read_to_string(&path).unwrap();
        let parsed: toml::Value = toml::from_str(&content).unwrap();
        assert!(parsed.get("wix").is_some());
    }
}
