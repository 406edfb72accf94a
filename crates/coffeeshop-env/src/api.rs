//! Backend API addressing for the HTTP client

use crate::environment::{EnvironmentConfig, KEY_API_SERVER_URL};
use coffeeshop_common::config::require_absolute_url;
use coffeeshop_common::ConfigurationError;
use url::Url;

/// Resolves API paths against the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base: Url,
}

impl ApiEndpoints {
    pub fn from_config(config: &EnvironmentConfig) -> Result<Self, ConfigurationError> {
        Ok(Self {
            base: require_absolute_url(KEY_API_SERVER_URL, config.api_server_url())?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Append `path` to the base URL, segment by segment.
    ///
    /// Leading, trailing and repeated slashes are ignored and each segment is
    /// percent-encoded, so `"drinks/1"` and `"/drinks/1/"` resolve the same.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }
}
