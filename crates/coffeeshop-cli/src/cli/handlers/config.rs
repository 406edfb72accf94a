//! Configuration inspection handlers

use crate::error::{CliError, Result};
use crate::output::{json_output, print_key_values, print_success};
use coffeeshop_env::{profile, EnvironmentConfig, EnvironmentLoader};
use color_eyre::eyre::WrapErr;
use serde_json::json;
use std::io::Write;
use tracing::debug;

/// Look up a key, rejecting unknown ones
pub fn lookup(config: &EnvironmentConfig, key: &str) -> Result<String> {
    config
        .get(key)
        .ok_or_else(|| CliError::invalid_argument(format!("Unknown configuration key: {key}")))
}

/// Handle `show`
pub fn handle_show<W: Write>(out: &mut W, loader: &EnvironmentLoader, json: bool) -> Result<()> {
    let config = loader.load()?;
    let values = config.to_map();

    if json {
        return json_output(out, &values);
    }

    print_key_values(out, values.iter().map(|(k, v)| (*k, v.as_str())))
}

/// Handle `get <key>`
pub fn handle_get<W: Write>(
    out: &mut W,
    loader: &EnvironmentLoader,
    key: &str,
    json: bool,
) -> Result<()> {
    let config = loader.load()?;
    let value = lookup(&config, key)?;

    if json {
        json_output(out, &json!({ key: value }))
    } else {
        writeln!(out, "{value}")?;
        Ok(())
    }
}

/// Handle `validate`
///
/// A failure is returned, not printed, so it reaches the terminal once. In
/// JSON mode the report is the output and the error comes back as
/// [`CliError::Reported`].
pub fn handle_validate<W: Write>(
    out: &mut W,
    loader: &EnvironmentLoader,
    json: bool,
) -> Result<()> {
    debug!("Validating {} configuration", loader.deployment());

    match loader.load() {
        Ok(config) if json => json_output(
            out,
            &json!({
                "valid": true,
                "deployment": config.deployment(),
            }),
        ),
        Ok(config) => print_success(
            out,
            &format!("Configuration is valid ({})", config.deployment()),
        ),
        Err(err) if json => {
            json_output(
                out,
                &json!({
                    "valid": false,
                    "key": err.key(),
                    "error": err.to_string(),
                }),
            )?;
            Err(CliError::Reported(err))
        }
        Err(err) => Err(err.into()),
    }
}

/// Handle `example`
pub fn handle_example<W: Write>(out: &mut W, loader: &EnvironmentLoader) -> Result<()> {
    let rendered = profile(loader.deployment())
        .to_toml()
        .wrap_err("Failed to render example configuration")?;
    write!(out, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffeeshop_env::{Deployment, DEVELOPMENT};

    #[test]
    fn test_lookup_known_and_unknown() {
        assert_eq!(
            lookup(&DEVELOPMENT, "api-url").unwrap(),
            "http://127.0.0.1:5000"
        );
        assert!(matches!(
            lookup(&DEVELOPMENT, "auth.secret"),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_failure_writes_nothing_in_text_mode() {
        let loader = EnvironmentLoader::new(Deployment::Development)
            .without_file()
            .without_env()
            .without_compiled_defaults();
        let mut out = Vec::new();

        let err = handle_validate(&mut out, &loader, false).unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_failure_in_json_mode_is_reported_once() {
        let loader = EnvironmentLoader::new(Deployment::Development)
            .without_file()
            .without_env()
            .without_compiled_defaults();
        let mut out = Vec::new();

        let err = handle_validate(&mut out, &loader, true).unwrap_err();
        assert!(matches!(err, CliError::Reported(_)));

        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["valid"], false);
        assert_eq!(report["key"], "api_server_url");
    }
}
