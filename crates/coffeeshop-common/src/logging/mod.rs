//! Unified logging initialization for Coffee Shop binaries
//!
//! The filter is chosen in this priority order:
//! 1. CLI flags (`-v/-q`) - highest priority
//! 2. RUST_LOG environment variable
//! 3. Binary-specific defaults - lowest priority
//!
//! Production deployments log JSON lines, development deployments log the
//! compact human-readable format.

use anyhow::Result;
use clap_verbosity_flag::{LogLevel, Verbosity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line output with target, file and line
    #[default]
    Compact,
    /// Structured JSON, one object per event
    Json,
}

impl LogFormat {
    /// Pick the format for a deployment's `production` flag
    pub fn for_production(production: bool) -> Self {
        if production {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

/// Build the filter from verbosity flags, RUST_LOG and the default.
fn build_filter<L: LogLevel>(verbosity: &Verbosity<L>, default_filter: &str) -> Result<EnvFilter> {
    let filter = if let Some(log_level) = verbosity.log_level() {
        // CLI flags take priority
        EnvFilter::try_new(log_level.to_string().to_lowercase())?
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };
    Ok(filter)
}

/// Initialize logging with the specified verbosity level, default filter and
/// output format.
///
/// # Example
///
/// ```no_run
/// use clap::Parser;
/// use clap_verbosity_flag::{InfoLevel, Verbosity};
/// use coffeeshop_common::logging::{self, LogFormat};
///
/// #[derive(Parser)]
/// struct Args {
///     #[command(flatten)]
///     verbosity: Verbosity<InfoLevel>,
/// }
///
/// let args = Args::parse();
/// logging::init_logging(&args.verbosity, "coffeeshop_env=info", LogFormat::Compact).unwrap();
/// ```
pub fn init_logging<L: LogLevel>(
    verbosity: &Verbosity<L>,
    default_filter: &str,
    format: LogFormat,
) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(verbosity, default_filter)?);

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init()?,
    }

    Ok(())
}

/// Initialize logging for CLI tools that stay quiet by default
///
/// Returns `true` if a subscriber was installed, `false` when neither
/// verbosity flags nor RUST_LOG asked for output.
pub fn init_cli_logging<L: LogLevel>(
    verbosity: &Verbosity<L>,
    default_filter: &str,
    format: LogFormat,
) -> Result<bool> {
    if verbosity.log_level().is_some() || std::env::var("RUST_LOG").is_ok() {
        init_logging(verbosity, default_filter, format)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use clap_verbosity_flag::{ErrorLevel, OffLevel};

    #[derive(Parser)]
    struct TestArgs {
        #[command(flatten)]
        verbosity: Verbosity<ErrorLevel>,
    }

    #[test]
    fn test_format_follows_production_flag() {
        assert_eq!(LogFormat::for_production(true), LogFormat::Json);
        assert_eq!(LogFormat::for_production(false), LogFormat::Compact);
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn test_cli_flags_build_filter() {
        let args = TestArgs::try_parse_from(["test", "-vv"]).unwrap();
        let filter = build_filter(&args.verbosity, "coffeeshop_env=error").unwrap();
        assert_eq!(filter.to_string().to_lowercase(), "info");
    }

    #[test]
    fn test_quiet_off_level_has_no_cli_level() {
        let verbosity = Verbosity::<OffLevel>::default();
        assert!(verbosity.log_level().is_none());
    }
}
