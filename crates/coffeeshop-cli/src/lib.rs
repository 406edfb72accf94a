//! # Coffee Shop Environment CLI
//!
//! Command-line access to the frontend environment record:
//! - show and look up the active values
//! - validate a deployment's config file and environment overrides
//! - print an example config file
//! - show the API and Auth0 URLs derived from the record

pub mod cli;
pub mod error;
pub mod output;

pub use cli::*;
pub use error::*;
