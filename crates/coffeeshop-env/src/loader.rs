//! Layered loading of the environment record
//!
//! Layers, lowest priority first:
//! 1. compiled-in record of the selected deployment
//! 2. TOML file (JSON when the path ends in `.json`)
//! 3. environment variables, e.g. `COFFEESHOP_API_SERVER_URL` or
//!    `COFFEESHOP_AUTH__CLIENT_ID`

use crate::environment::{
    AuthSettings, Deployment, EnvironmentConfig, KEY_API_SERVER_URL, KEY_AUTH_AUDIENCE,
    KEY_AUTH_CALLBACK_URL, KEY_AUTH_CLIENT_ID, KEY_AUTH_DOMAIN_PREFIX,
};
use crate::profiles::profile;
use coffeeshop_common::config::{require_present, ConfigLoader};
use coffeeshop_common::ConfigurationError;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix of runtime environment overrides
pub const DEFAULT_ENV_PREFIX: &str = "COFFEESHOP_";

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "coffeeshop.toml";

/// Shape of the merged layers before validation. Everything is optional so
/// that absent keys surface as `MissingField` instead of a serde error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEnvironment {
    production: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    api_server_url: Option<String>,
    auth: RawAuth,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAuth {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    domain_prefix: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    audience: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    client_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    callback_url: Option<String>,
}

// The env provider parses `1234567890` or `true` into numbers and booleans.
// String settings take any scalar back as its text.
mod lenient_string {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(ScalarVisitor)
    }

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }
}

impl RawEnvironment {
    fn into_config(self, deployment: Deployment) -> Result<EnvironmentConfig, ConfigurationError> {
        let field = |key: &str, value: Option<String>| -> Result<String, ConfigurationError> {
            require_present(key, value.as_deref())?;
            Ok(value.unwrap_or_default())
        };

        let api_server_url = field(KEY_API_SERVER_URL, self.api_server_url)?;
        let auth = AuthSettings::new(
            field(KEY_AUTH_DOMAIN_PREFIX, self.auth.domain_prefix)?,
            field(KEY_AUTH_AUDIENCE, self.auth.audience)?,
            field(KEY_AUTH_CLIENT_ID, self.auth.client_id)?,
            field(KEY_AUTH_CALLBACK_URL, self.auth.callback_url)?,
        );

        EnvironmentConfig::new(
            self.production.unwrap_or(deployment.is_production()),
            api_server_url,
            auth,
        )
    }
}

#[derive(Debug, Clone)]
enum FileSource {
    None,
    Optional(PathBuf),
    Required(PathBuf),
}

/// Builder for loading an [`EnvironmentConfig`] from layered sources.
///
/// ```no_run
/// use coffeeshop_env::{Deployment, EnvironmentLoader};
///
/// let config = EnvironmentLoader::new(Deployment::Production)
///     .with_file("deploy/production.toml")
///     .load()?;
/// # Ok::<(), coffeeshop_common::ConfigurationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    deployment: Deployment,
    file: FileSource,
    env_prefix: Option<String>,
    compiled_defaults: bool,
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(Deployment::active())
    }
}

impl EnvironmentLoader {
    pub fn new(deployment: Deployment) -> Self {
        Self {
            deployment,
            file: FileSource::Optional(PathBuf::from(DEFAULT_CONFIG_FILE)),
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            compiled_defaults: true,
        }
    }

    /// Read this file, which must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = FileSource::Required(path.into());
        self
    }

    /// Skip the file layer entirely
    pub fn without_file(mut self) -> Self {
        self.file = FileSource::None;
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Skip the environment variable layer
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Start from nothing instead of the compiled-in record, so every value
    /// must come from the file or the environment.
    pub fn without_compiled_defaults(mut self) -> Self {
        self.compiled_defaults = false;
        self
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Assemble the provider stack without extracting it
    pub fn figment(&self) -> Result<Figment, ConfigurationError> {
        let mut figment = if self.compiled_defaults {
            Figment::from(Serialized::defaults(profile(self.deployment)))
        } else {
            Figment::new()
        };

        match &self.file {
            FileSource::None => {}
            FileSource::Optional(path) => figment = merge_file(figment, path),
            FileSource::Required(path) => {
                if !path.is_file() {
                    return Err(ConfigurationError::parse(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                figment = merge_file(figment, path);
            }
        }

        if let Some(prefix) = &self.env_prefix {
            figment = figment.merge(Env::prefixed(prefix).split("__"));
        }

        Ok(figment)
    }

    /// Merge, extract and validate
    pub fn load(&self) -> Result<EnvironmentConfig, ConfigurationError> {
        debug!(
            deployment = %self.deployment,
            file = ?self.file,
            env_prefix = ?self.env_prefix,
            compiled_defaults = self.compiled_defaults,
            "Loading environment configuration"
        );

        let raw: RawEnvironment = self
            .figment()?
            .extract()
            .map_err(|e| ConfigurationError::parse(e.to_string()))?;

        let config = raw.into_config(self.deployment)?;

        info!(
            production = config.production(),
            api_server_url = config.api_server_url(),
            "Environment configuration loaded"
        );
        Ok(config)
    }
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        figment.merge(Json::file(path))
    } else {
        figment.merge(Toml::file(path))
    }
}

impl ConfigLoader<EnvironmentConfig> for EnvironmentConfig {
    fn load(path: Option<PathBuf>) -> Result<EnvironmentConfig, ConfigurationError> {
        match path {
            Some(p) => EnvironmentLoader::default().with_file(p).load(),
            None => EnvironmentLoader::default().load(),
        }
    }

    fn load_from_file(path: &Path) -> Result<EnvironmentConfig, ConfigurationError> {
        EnvironmentLoader::default().with_file(path).load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isolated(deployment: Deployment) -> EnvironmentLoader {
        EnvironmentLoader::new(deployment).without_file().without_env()
    }

    #[test]
    fn test_compiled_defaults_only() {
        let config = isolated(Deployment::Development).load().unwrap();
        assert_eq!(&config, profile(Deployment::Development));

        let config = isolated(Deployment::Production).load().unwrap();
        assert!(config.production());
    }

    #[test]
    fn test_no_sources_reports_first_missing_field() {
        let err = isolated(Deployment::Development)
            .without_compiled_defaults()
            .load()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::missing(KEY_API_SERVER_URL));
    }

    #[test]
    fn test_missing_required_file() {
        let err = isolated(Deployment::Development)
            .with_file("/nonexistent/coffeeshop.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::ParseError { .. }));
        assert!(err.to_string().contains("/nonexistent/coffeeshop.toml"));
    }

    #[test]
    fn test_raw_production_falls_back_to_deployment() {
        let raw = RawEnvironment {
            production: None,
            api_server_url: Some("https://api.example.com".to_string()),
            auth: RawAuth {
                domain_prefix: Some("tenant".to_string()),
                audience: Some("coffee".to_string()),
                client_id: Some("abc".to_string()),
                callback_url: Some("https://shop.example.com".to_string()),
            },
        };
        let config = raw.into_config(Deployment::Production).unwrap();
        assert!(config.production());
    }

    #[test]
    fn test_scalar_values_are_taken_as_text() {
        let raw: RawEnvironment = Figment::new()
            .merge(Toml::string(
                r#"
[auth]
client_id = 1234567890
audience = true
domain_prefix = "tenant"
"#,
            ))
            .extract()
            .unwrap();

        assert_eq!(raw.auth.client_id.as_deref(), Some("1234567890"));
        assert_eq!(raw.auth.audience.as_deref(), Some("true"));
        assert_eq!(raw.auth.domain_prefix.as_deref(), Some("tenant"));
        assert_eq!(raw.auth.callback_url, None);
    }

    #[test]
    fn test_table_for_string_setting_is_rejected() {
        let result = Figment::new()
            .merge(Toml::string(r#"api_server_url = { host = "api.example.com" }"#))
            .extract::<RawEnvironment>();
        assert!(result.is_err());
    }
}
