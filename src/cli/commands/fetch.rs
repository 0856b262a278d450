//! Fetch command implementation
//!
//! This module implements the `fetch` command: run one session against the
//! Wix Orders API and hand the flattened rows to the configured sink.

use crate::adapters::sink::create_order_sink;
use crate::adapters::wix::WixClient;
use crate::config::{load_config, SinkTarget};
use crate::core::FetchSession;
use crate::domain::CaravelError;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use std::io::Write;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Start of the created-date window (RFC 3339 or YYYY-MM-DD)
    #[arg(long, requires = "end", value_parser = parse_timestamp)]
    pub start: Option<DateTime<Utc>>,

    /// End of the created-date window (RFC 3339 or YYYY-MM-DD)
    #[arg(long, requires = "start", value_parser = parse_timestamp)]
    pub end: Option<DateTime<Utc>>,

    /// Override the configured sink (postgresql or json)
    #[arg(long, value_name = "TARGET")]
    pub sink: Option<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl FetchArgs {
    /// Execute the fetch command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting fetch command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        // Apply CLI sink override
        if let Some(sink) = &self.sink {
            let target = match sink.to_lowercase().as_str() {
                "postgresql" | "postgres" => SinkTarget::PostgreSQL,
                "json" => SinkTarget::Json,
                _ => {
                    eprintln!("Invalid sink '{sink}'. Use 'postgresql' or 'json'");
                    return Ok(2);
                }
            };
            tracing::info!(sink = %target, "Overriding sink target from CLI");
            config.sink.target = target;

            if let Err(e) = config.validate() {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        }

        // Resolve the created-date window; clap guarantees both-or-neither
        let window = match (self.start, self.end) {
            (Some(start), Some(end)) => {
                if start > end {
                    eprintln!("Invalid window: --start must not be after --end");
                    return Ok(2);
                }
                Some((start, end))
            }
            _ => None,
        };

        if !self.yes && !confirm(config.sink.target)? {
            println!("Aborted");
            return Ok(0);
        }

        let client = match WixClient::new(&config.wix) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build Wix client");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let sink = match create_order_sink(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create sink");
                eprintln!("Sink error: {e}");
                return Ok(4);
            }
        };

        let session = FetchSession::new(client, sink);
        match session.run(window).await {
            Ok(summary) => {
                println!("✅ Fetch session completed");
                println!("   Pages fetched:      {}", summary.pages_fetched);
                println!("   Orders:             {}", summary.orders);
                println!("   Line items:         {}", summary.line_items);
                println!("   Orders written:     {}", summary.orders_written);
                println!("   Line items written: {}", summary.line_items_written);
                println!("   Sink:               {}", summary.sink_target);
                println!("   Duration:           {}s", summary.duration.as_secs());
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Fetch session failed");
                eprintln!("Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

/// Map an error to the process exit code
fn exit_code_for(error: &CaravelError) -> i32 {
    match error {
        CaravelError::Configuration(_) => 2,
        CaravelError::Sink(_) | CaravelError::Io(_) => 4,
        _ => 5,
    }
}

fn confirm(target: SinkTarget) -> anyhow::Result<bool> {
    print!("Write fetched orders to {target}? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Parse an RFC 3339 timestamp or a bare date (midnight UTC)
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
        .map_err(|_| format!("'{value}' is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}
