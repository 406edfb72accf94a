//! Field-level validation used when building configuration records

use crate::ConfigurationError;
use url::Url;

/// Require a value to be present and not blank.
pub fn require_present<'a>(
    key: &str,
    value: Option<&'a str>,
) -> Result<&'a str, ConfigurationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigurationError::missing(key)),
    }
}

/// Require an absolute `http`/`https` URL with a host.
pub fn require_absolute_url(key: &str, value: &str) -> Result<Url, ConfigurationError> {
    let malformed = |details: String| ConfigurationError::MalformedUrl {
        key: key.to_string(),
        value: value.to_string(),
        details,
    };

    let url = Url::parse(value.trim()).map_err(|e| malformed(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(malformed("missing host".to_string()));
    }

    Ok(url)
}

/// Require a bare host name or host prefix, e.g. `dev-68yxhfrv` or
/// `dev-68yxhfrv.us`. Schemes, paths and ports are rejected.
pub fn require_host_label(key: &str, value: &str) -> Result<(), ConfigurationError> {
    if value.contains("://") {
        return Err(ConfigurationError::invalid(
            key,
            "expected a host name without a scheme",
        ));
    }

    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
    {
        return Err(ConfigurationError::invalid(
            key,
            format!("unexpected character '{bad}'"),
        ));
    }

    let edges = [value.chars().next(), value.chars().last()];
    if edges.iter().flatten().any(|c| *c == '.' || *c == '-') {
        return Err(ConfigurationError::invalid(
            key,
            "must not start or end with '.' or '-'",
        ));
    }

    Ok(())
}
