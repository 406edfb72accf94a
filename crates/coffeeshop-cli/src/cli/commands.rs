use clap::Subcommand;

/// Main CLI commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show every configuration value
    Show,

    /// Get a single configuration value
    Get {
        /// Configuration key (e.g. api_server_url, auth.client_id)
        key: String,
    },

    /// Load and validate the configuration
    Validate,

    /// Print the compiled-in record as a TOML config file
    Example,

    /// Show the API and Auth0 URLs derived from the configuration
    Endpoints {
        /// Path on the callback host to return to after login
        #[arg(long)]
        return_path: Option<String>,
    },
}
