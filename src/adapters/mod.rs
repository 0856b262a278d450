//! External system adapters
//!
//! This module contains the adapters for the systems the pipeline touches:
//! the Wix Orders API, PostgreSQL, and JSON file export.

pub mod jsonexport;
pub mod postgresql;
pub mod sink;
pub mod wix;
