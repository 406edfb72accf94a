//! Command-line interface definition and handlers

pub mod args;
pub mod commands;
pub mod handlers;

pub use args::Args;
pub use commands::Commands;
