//! Auth0 endpoints derived from the environment's auth settings
//!
//! Only URL derivation lives here; running the login flow and verifying
//! tokens is up to the caller.

use crate::environment::{
    AuthSettings, KEY_AUTH_AUDIENCE, KEY_AUTH_CALLBACK_URL, KEY_AUTH_CLIENT_ID,
    KEY_AUTH_DOMAIN_PREFIX,
};
use coffeeshop_common::auth_constants::{
    AUTH0_ALGORITHMS, AUTH0_AUTHORIZE_PATH, AUTH0_HOST_SUFFIX, AUTH0_JWKS_PATH,
    AUTH0_LOGOUT_PATH, AUTH0_RESPONSE_TYPE,
};
use coffeeshop_common::config::{require_absolute_url, require_host_label, require_present};
use coffeeshop_common::ConfigurationError;
use url::Url;

/// Identity provider URLs and parameters for one tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth0Endpoints {
    domain: String,
    issuer: Url,
    audience: String,
    client_id: String,
    callback: Url,
}

impl Auth0Endpoints {
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, ConfigurationError> {
        let prefix = require_present(KEY_AUTH_DOMAIN_PREFIX, Some(settings.domain_prefix()))?;
        require_host_label(KEY_AUTH_DOMAIN_PREFIX, prefix)?;

        let domain = if prefix.ends_with(AUTH0_HOST_SUFFIX) {
            prefix.to_string()
        } else {
            format!("{prefix}{AUTH0_HOST_SUFFIX}")
        };
        let issuer = require_absolute_url(KEY_AUTH_DOMAIN_PREFIX, &format!("https://{domain}/"))?;

        let audience = require_present(KEY_AUTH_AUDIENCE, Some(settings.audience()))?;
        let client_id = require_present(KEY_AUTH_CLIENT_ID, Some(settings.client_id()))?;
        let callback = require_present(KEY_AUTH_CALLBACK_URL, Some(settings.callback_url()))?;

        Ok(Self {
            domain,
            issuer,
            audience: audience.to_string(),
            client_id: client_id.to_string(),
            callback: require_absolute_url(KEY_AUTH_CALLBACK_URL, callback)?,
        })
    }

    /// Full tenant host, e.g. `dev-68yxhfrv.auth0.com`
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Expected `iss` claim of issued tokens
    pub fn issuer(&self) -> &Url {
        &self.issuer
    }

    pub fn jwks_url(&self) -> Url {
        let mut url = self.issuer.clone();
        url.set_path(AUTH0_JWKS_PATH);
        url
    }

    pub fn algorithms(&self) -> &'static [&'static str] {
        AUTH0_ALGORITHMS
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Callback URL, with its path replaced by `return_path` when given
    pub fn redirect_uri(&self, return_path: Option<&str>) -> Url {
        let mut url = self.callback.clone();
        if let Some(path) = return_path {
            url.set_path(path);
        }
        url
    }

    /// Login link for the browser (implicit grant, token response)
    pub fn authorize_url(&self, return_path: Option<&str>) -> Url {
        let mut url = self.issuer.clone();
        url.set_path(AUTH0_AUTHORIZE_PATH);
        url.query_pairs_mut()
            .append_pair("audience", &self.audience)
            .append_pair("response_type", AUTH0_RESPONSE_TYPE)
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", self.redirect_uri(return_path).as_str());
        url
    }

    /// Logout link returning the browser to the callback URL
    pub fn logout_url(&self) -> Url {
        let mut url = self.issuer.clone();
        url.set_path(AUTH0_LOGOUT_PATH);
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("returnTo", self.callback.as_str());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::DEVELOPMENT;
    use std::collections::HashMap;

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_development_tenant() {
        let auth = Auth0Endpoints::from_settings(DEVELOPMENT.auth()).unwrap();
        assert_eq!(auth.domain(), "dev-68yxhfrv.auth0.com");
        assert_eq!(auth.issuer().as_str(), "https://dev-68yxhfrv.auth0.com/");
        assert_eq!(
            auth.jwks_url().as_str(),
            "https://dev-68yxhfrv.auth0.com/.well-known/jwks.json"
        );
        assert_eq!(auth.algorithms(), &["RS256"]);
        assert_eq!(auth.audience(), "coffee_shop_full_stack");
    }

    #[test]
    fn test_full_domain_is_not_suffixed_twice() {
        let settings = AuthSettings::new(
            "tenant.eu.auth0.com",
            "coffee",
            "client",
            "https://shop.example.com",
        );
        let auth = Auth0Endpoints::from_settings(&settings).unwrap();
        assert_eq!(auth.domain(), "tenant.eu.auth0.com");
    }

    #[test]
    fn test_authorize_url() {
        let auth = Auth0Endpoints::from_settings(DEVELOPMENT.auth()).unwrap();
        let url = auth.authorize_url(Some("/tabs/user-page"));

        assert_eq!(url.host_str(), Some("dev-68yxhfrv.auth0.com"));
        assert_eq!(url.path(), "/authorize");

        let params = query(&url);
        assert_eq!(params["audience"], "coffee_shop_full_stack");
        assert_eq!(params["response_type"], "token");
        assert_eq!(params["client_id"], "pZjWJLd7oCeeyfESLBTkd3iWlr30eA3u");
        assert_eq!(params["redirect_uri"], "http://localhost:8100/tabs/user-page");
    }

    #[test]
    fn test_authorize_url_without_return_path() {
        let auth = Auth0Endpoints::from_settings(DEVELOPMENT.auth()).unwrap();
        let params = query(&auth.authorize_url(None));
        assert_eq!(params["redirect_uri"], "http://localhost:8100/");
    }

    #[test]
    fn test_logout_url() {
        let auth = Auth0Endpoints::from_settings(DEVELOPMENT.auth()).unwrap();
        let url = auth.logout_url();
        assert_eq!(url.path(), "/v2/logout");

        let params = query(&url);
        assert_eq!(params["client_id"], "pZjWJLd7oCeeyfESLBTkd3iWlr30eA3u");
        assert_eq!(params["returnTo"], "http://localhost:8100/");
    }

    #[test]
    fn test_prefix_with_scheme_rejected() {
        let settings = AuthSettings::new(
            "https://dev-68yxhfrv",
            "coffee",
            "client",
            "http://localhost:8100",
        );
        let err = Auth0Endpoints::from_settings(&settings).unwrap_err();
        assert_eq!(err.key(), Some(KEY_AUTH_DOMAIN_PREFIX));
    }
}
