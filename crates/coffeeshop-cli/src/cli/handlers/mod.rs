//! Command handlers for the environment CLI

pub mod config;
pub mod endpoints;
