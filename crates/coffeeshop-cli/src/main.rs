//! Main entry point for the environment CLI

use clap::Parser;
use coffeeshop_cli::cli::Args;
use coffeeshop_cli::CliError;
use coffeeshop_common::logging::{self, LogFormat};
use color_eyre::eyre::{eyre, Result};

fn main() -> Result<()> {
    let args = Args::parse();

    // Disable location display (file paths and line numbers)
    color_eyre::config::HookBuilder::default()
        .display_location_section(false)
        .display_env_section(false)
        .install()?;

    // Quiet unless -v or RUST_LOG asks for output
    let binary_name = env!("CARGO_BIN_NAME").replace('-', "_");
    let default_filter = format!("{binary_name}=info,coffeeshop_env=info");
    logging::init_cli_logging(
        &args.verbosity,
        &default_filter,
        LogFormat::for_production(args.deployment().is_production()),
    )
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

    match args.run() {
        // The JSON report on stdout already carries the diagnostic
        Err(CliError::Reported(_)) => std::process::exit(1),
        result => Ok(result?),
    }
}
