//! Wix eCommerce integration
//!
//! Search API client and wire models for the orders search endpoint.

pub mod client;
pub mod models;

pub use client::WixClient;
