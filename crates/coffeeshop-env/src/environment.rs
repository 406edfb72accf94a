//! The environment record and its deployment selector

use coffeeshop_common::config::{require_absolute_url, require_host_label, require_present};
use coffeeshop_common::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const KEY_PRODUCTION: &str = "production";
pub const KEY_API_SERVER_URL: &str = "api_server_url";
pub const KEY_AUTH_DOMAIN_PREFIX: &str = "auth.domain_prefix";
pub const KEY_AUTH_AUDIENCE: &str = "auth.audience";
pub const KEY_AUTH_CLIENT_ID: &str = "auth.client_id";
pub const KEY_AUTH_CALLBACK_URL: &str = "auth.callback_url";

/// Every key of the record, in declaration order
pub const KEYS: &[&str] = &[
    KEY_PRODUCTION,
    KEY_API_SERVER_URL,
    KEY_AUTH_DOMAIN_PREFIX,
    KEY_AUTH_AUDIENCE,
    KEY_AUTH_CLIENT_ID,
    KEY_AUTH_CALLBACK_URL,
];

/// Which compiled-in record a build or a loader starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    #[default]
    Development,
    Production,
}

impl Deployment {
    /// The deployment this crate was built for (`production` feature)
    pub const fn active() -> Self {
        if cfg!(feature = "production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Deployment {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigurationError::invalid(
                "deployment",
                format!("unknown deployment '{other}' (expected 'development' or 'production')"),
            )),
        }
    }
}

/// Identity provider settings used by the browser login flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthSettings {
    pub(crate) domain_prefix: Cow<'static, str>,
    pub(crate) audience: Cow<'static, str>,
    pub(crate) client_id: Cow<'static, str>,
    pub(crate) callback_url: Cow<'static, str>,
}

impl AuthSettings {
    /// Assemble settings. They are validated when placed in an
    /// [`EnvironmentConfig`].
    pub fn new(
        domain_prefix: impl Into<Cow<'static, str>>,
        audience: impl Into<Cow<'static, str>>,
        client_id: impl Into<Cow<'static, str>>,
        callback_url: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            domain_prefix: domain_prefix.into(),
            audience: audience.into(),
            client_id: client_id.into(),
            callback_url: callback_url.into(),
        }
    }

    /// Tenant part of the identity provider host
    pub fn domain_prefix(&self) -> &str {
        &self.domain_prefix
    }

    /// Protected API the issued tokens are meant for
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Public id of the registered frontend application
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Where the identity provider sends the browser back to
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let prefix = require_present(KEY_AUTH_DOMAIN_PREFIX, Some(self.domain_prefix()))?;
        require_host_label(KEY_AUTH_DOMAIN_PREFIX, prefix)?;
        require_present(KEY_AUTH_AUDIENCE, Some(self.audience()))?;
        require_present(KEY_AUTH_CLIENT_ID, Some(self.client_id()))?;
        let callback = require_present(KEY_AUTH_CALLBACK_URL, Some(self.callback_url()))?;
        require_absolute_url(KEY_AUTH_CALLBACK_URL, callback)?;
        Ok(())
    }
}

/// Runtime environment of the frontend.
///
/// Immutable once built: fields are private and there are no setters. The
/// compiled-in records live in [`crate::profiles`]; externally sourced ones
/// come from [`crate::EnvironmentLoader`] or [`EnvironmentConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentConfig {
    pub(crate) production: bool,
    pub(crate) api_server_url: Cow<'static, str>,
    pub(crate) auth: AuthSettings,
}

impl EnvironmentConfig {
    /// Build and validate a record.
    pub fn new(
        production: bool,
        api_server_url: impl Into<Cow<'static, str>>,
        auth: AuthSettings,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            production,
            api_server_url: api_server_url.into(),
            auth,
        };
        config.validate()?;
        Ok(config)
    }

    /// Compile-time constructor for the built-in records.
    pub(crate) const fn compiled(
        production: bool,
        api_server_url: &'static str,
        domain_prefix: &'static str,
        audience: &'static str,
        client_id: &'static str,
        callback_url: &'static str,
    ) -> Self {
        Self {
            production,
            api_server_url: Cow::Borrowed(api_server_url),
            auth: AuthSettings {
                domain_prefix: Cow::Borrowed(domain_prefix),
                audience: Cow::Borrowed(audience),
                client_id: Cow::Borrowed(client_id),
                callback_url: Cow::Borrowed(callback_url),
            },
        }
    }

    pub fn production(&self) -> bool {
        self.production
    }

    pub fn deployment(&self) -> Deployment {
        if self.production {
            Deployment::Production
        } else {
            Deployment::Development
        }
    }

    /// Base URL of the backend API
    pub fn api_server_url(&self) -> &str {
        &self.api_server_url
    }

    pub fn auth(&self) -> &AuthSettings {
        &self.auth
    }

    /// Check every field: present, non-blank, URLs absolute.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let api = require_present(KEY_API_SERVER_URL, Some(self.api_server_url()))?;
        require_absolute_url(KEY_API_SERVER_URL, api)?;
        self.auth.validate()
    }

    /// Look up a value by dotted key or its short alias
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "production" => return Some(self.production.to_string()),
            "api_server_url" | "api-url" => self.api_server_url(),
            "auth.domain_prefix" | "auth-domain" => self.auth.domain_prefix(),
            "auth.audience" | "auth-audience" => self.auth.audience(),
            "auth.client_id" | "auth-client-id" => self.auth.client_id(),
            "auth.callback_url" | "auth-callback-url" => self.auth.callback_url(),
            _ => return None,
        };
        Some(value.to_string())
    }

    /// All values keyed by dotted key
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    /// Render the persisted TOML form
    pub fn to_toml(&self) -> Result<String, ConfigurationError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigurationError::parse(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> EnvironmentConfig {
        EnvironmentConfig::new(
            false,
            "http://127.0.0.1:5000",
            AuthSettings::new(
                "dev-68yxhfrv",
                "coffee_shop_full_stack",
                "pZjWJLd7oCeeyfESLBTkd3iWlr30eA3u",
                "http://localhost:8100",
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_deployment_parsing() {
        assert_eq!("prod".parse::<Deployment>().unwrap(), Deployment::Production);
        assert_eq!(
            " Development ".parse::<Deployment>().unwrap(),
            Deployment::Development
        );
        assert!(matches!(
            "staging".parse::<Deployment>(),
            Err(ConfigurationError::InvalidValue { .. })
        ));
        assert_eq!(Deployment::Production.to_string(), "production");
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        let err = EnvironmentConfig::new(
            false,
            "http://127.0.0.1:5000",
            AuthSettings::new("dev-68yxhfrv", "coffee_shop_full_stack", "", "http://localhost:8100"),
        )
        .unwrap_err();
        assert_eq!(err, ConfigurationError::missing(KEY_AUTH_CLIENT_ID));
    }

    #[test]
    fn test_new_rejects_relative_api_url() {
        let err = EnvironmentConfig::new(
            false,
            "127.0.0.1:5000",
            AuthSettings::new(
                "dev-68yxhfrv",
                "coffee_shop_full_stack",
                "client",
                "http://localhost:8100",
            ),
        )
        .unwrap_err();
        assert_eq!(err.key(), Some(KEY_API_SERVER_URL));
        assert!(matches!(err, ConfigurationError::MalformedUrl { .. }));
    }

    #[test]
    fn test_get_and_aliases() {
        let config = sample();
        assert_eq!(config.get("api-url").as_deref(), Some("http://127.0.0.1:5000"));
        assert_eq!(config.get("production").as_deref(), Some("false"));
        assert_eq!(
            config.get("auth.client_id"),
            config.get("auth-client-id")
        );
        assert_eq!(config.get("auth.secret"), None);
    }

    #[test]
    fn test_to_map_covers_every_key() {
        let map = sample().to_map();
        assert_eq!(map.len(), KEYS.len());
        assert_eq!(map["auth.callback_url"], "http://localhost:8100");
        assert_eq!(map["auth.domain_prefix"], "dev-68yxhfrv");
    }

    #[test]
    fn test_to_toml_layout() {
        let rendered = sample().to_toml().unwrap();
        let value: toml::Value = toml::from_str(&rendered).unwrap();

        assert_eq!(value["production"].as_bool(), Some(false));
        assert_eq!(value["api_server_url"].as_str(), Some("http://127.0.0.1:5000"));
        assert_eq!(value["auth"]["audience"].as_str(), Some("coffee_shop_full_stack"));
        assert_eq!(
            value["auth"]["callback_url"].as_str(),
            Some("http://localhost:8100")
        );
    }

    #[test]
    fn test_deployment_follows_flag() {
        assert_eq!(sample().deployment(), Deployment::Development);
    }
}
