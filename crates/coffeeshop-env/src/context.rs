//! Start-up wiring of the environment into its collaborators

use crate::api::ApiEndpoints;
use crate::auth::Auth0Endpoints;
use crate::environment::EnvironmentConfig;
use coffeeshop_common::logging::LogFormat;
use coffeeshop_common::ConfigurationError;
use std::sync::Arc;
use tracing::info;

/// The validated environment plus everything derived from it.
///
/// Built once at start-up and handed to the HTTP client and the
/// authentication layer instead of having them read a global.
#[derive(Debug, Clone)]
pub struct FrontendContext {
    config: Arc<EnvironmentConfig>,
    api: ApiEndpoints,
    auth: Auth0Endpoints,
}

impl FrontendContext {
    pub fn new(config: EnvironmentConfig) -> Result<Self, ConfigurationError> {
        Self::from_shared(Arc::new(config))
    }

    pub fn from_shared(config: Arc<EnvironmentConfig>) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let api = ApiEndpoints::from_config(&config)?;
        let auth = Auth0Endpoints::from_settings(config.auth())?;

        info!(
            deployment = %config.deployment(),
            api = %api.base(),
            auth_domain = auth.domain(),
            "Frontend environment ready"
        );

        Ok(Self { config, api, auth })
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<EnvironmentConfig> {
        Arc::clone(&self.config)
    }

    pub fn api(&self) -> &ApiEndpoints {
        &self.api
    }

    pub fn auth(&self) -> &Auth0Endpoints {
        &self.auth
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::for_production(self.config.production())
    }
}
