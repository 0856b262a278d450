//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Caravel using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Caravel - Wix Orders ETL Tool
#[derive(Parser, Debug)]
#[command(name = "caravel")]
#[command(version, about, long_about = None)]
#[command(author = "Caravel Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "caravel.toml", env = "CARAVEL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CARAVEL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch orders from Wix and write them to the configured sink
    Fetch(commands::fetch::FetchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
