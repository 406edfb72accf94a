//! # Coffee Shop Common
//!
//! Shared building blocks for the Coffee Shop frontend environment crates:
//! - `ConfigurationError`, the loader error taxonomy
//! - the `ConfigLoader` trait and field validation helpers
//! - identity provider constants
//! - unified logging initialization

pub mod auth_constants;
pub mod config;
pub mod error;
pub mod logging;

pub use error::ConfigurationError;
