// Caravel - Wix Orders ETL Tool
// Copyright (c) 2026 Caravel Contributors
// Licensed under the MIT License

//! # Caravel - Wix Orders ETL
//!
//! Caravel is an ETL tool built in Rust that fetches e-commerce orders from
//! the Wix Orders API and persists them in a relational shape, either into
//! PostgreSQL or as JSON export files.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** orders through the paginated cursor search endpoint
//! - **Transforming** nested orders into flat order and line-item rows
//! - **Loading** the rows into PostgreSQL or pretty-printed JSON files
//!
//! ## Architecture
//!
//! Caravel follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (session, flatten, summary)
//! - [`adapters`] - External integrations (Wix, PostgreSQL, JSON export)
//! - [`domain`] - Core domain types and row models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use caravel::adapters::sink::create_order_sink;
//! use caravel::adapters::wix::WixClient;
//! use caravel::config::load_config;
//! use caravel::core::FetchSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("caravel.toml")?;
//!
//!     let client = WixClient::new(&config.wix)?;
//!     let sink = create_order_sink(&config).await?;
//!
//!     let summary = FetchSession::new(client, sink).run(None).await?;
//!     println!("Fetched {} orders", summary.orders);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Caravel uses the [`domain::CaravelError`] type for all errors:
//!
//! ```rust,no_run
//! use caravel::domain::CaravelError;
//!
//! fn example() -> Result<(), CaravelError> {
//!     let config = caravel::config::load_config("caravel.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Caravel uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting fetch session");
//! warn!(page = 3, "Empty page returned");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
