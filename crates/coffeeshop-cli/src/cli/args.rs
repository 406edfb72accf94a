use crate::cli::{commands::Commands, handlers};
use crate::error::Result;
use clap::Parser;
use clap_verbosity_flag::{OffLevel, Verbosity};
use coffeeshop_env::{Deployment, EnvironmentLoader, DEFAULT_ENV_PREFIX};
use std::io::{self, Write};
use std::path::PathBuf;

/// Coffee Shop environment CLI
#[derive(Parser, Debug)]
#[command(
    name = "coffeeshop-env",
    author = "Coffee Shop Team",
    version,
    about = "Inspect and validate the Coffee Shop frontend environment",
    long_about = "Inspect and validate the runtime environment of the Coffee Shop frontend.

EXAMPLES:
  coffeeshop-env show                      # All values of the active record
  coffeeshop-env get auth.client_id        # A single value
  coffeeshop-env --production validate     # Check the production record
  coffeeshop-env -c deploy.toml validate   # Check a config file
  coffeeshop-env example > coffeeshop.toml # Start a config file
  coffeeshop-env endpoints                 # Derived API and Auth0 URLs

OVERRIDES:
  COFFEESHOP_API_SERVER_URL, COFFEESHOP_AUTH__CLIENT_ID, ..."
)]
pub struct Args {
    /// Configuration file path (TOML, or JSON with a .json extension)
    #[arg(short, long, global = true, env = "COFFEESHOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start from the production record instead of the build default
    #[arg(long, global = true)]
    pub production: bool,

    /// Prefix of environment variable overrides
    #[arg(long, global = true, default_value = DEFAULT_ENV_PREFIX)]
    pub env_prefix: String,

    /// Ignore environment variable overrides
    #[arg(long, global = true)]
    pub no_env: bool,

    /// Require every value to come from the file or the environment
    #[arg(long, global = true)]
    pub no_defaults: bool,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<OffLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    pub fn deployment(&self) -> Deployment {
        if self.production {
            Deployment::Production
        } else {
            Deployment::active()
        }
    }

    /// Build the loader described by the global options
    pub fn loader(&self) -> EnvironmentLoader {
        let mut loader = EnvironmentLoader::new(self.deployment());

        if let Some(path) = &self.config {
            loader = loader.with_file(path);
        }
        loader = if self.no_env {
            loader.without_env()
        } else {
            loader.with_env_prefix(&self.env_prefix)
        };
        if self.no_defaults {
            loader = loader.without_compiled_defaults();
        }

        loader
    }

    /// Execute the CLI command, writing to stdout
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out)
    }

    /// Execute the CLI command, writing to `out`
    pub fn run_with<W: Write>(self, out: &mut W) -> Result<()> {
        let loader = self.loader();

        match self.command {
            Commands::Show => handlers::config::handle_show(out, &loader, self.json),
            Commands::Get { key } => handlers::config::handle_get(out, &loader, &key, self.json),
            Commands::Validate => handlers::config::handle_validate(out, &loader, self.json),
            Commands::Example => handlers::config::handle_example(out, &loader),
            Commands::Endpoints { return_path } => handlers::endpoints::handle_endpoints(
                out,
                &loader,
                return_path.as_deref(),
                self.json,
            ),
        }
    }
}
