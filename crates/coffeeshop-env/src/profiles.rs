//! Compiled-in environment records
//!
//! Each value can be replaced at build time through a `COFFEESHOP_BUILD_*`
//! variable (process environment or `.env`, see `build.rs`).

use crate::environment::{Deployment, EnvironmentConfig};

const fn build_override(value: Option<&'static str>, fallback: &'static str) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

const API_SERVER_URL: &str = build_override(
    option_env!("COFFEESHOP_BUILD_API_SERVER_URL"),
    "http://127.0.0.1:5000",
);

const AUTH_DOMAIN_PREFIX: &str = build_override(
    option_env!("COFFEESHOP_BUILD_AUTH_DOMAIN_PREFIX"),
    "dev-68yxhfrv",
);

const AUTH_AUDIENCE: &str = build_override(
    option_env!("COFFEESHOP_BUILD_AUTH_AUDIENCE"),
    "coffee_shop_full_stack",
);

// Public client of the implicit flow, not a secret.
const AUTH_CLIENT_ID: &str = build_override(
    option_env!("COFFEESHOP_BUILD_AUTH_CLIENT_ID"),
    "pZjWJLd7oCeeyfESLBTkd3iWlr30eA3u",
);

const AUTH_CALLBACK_URL: &str = build_override(
    option_env!("COFFEESHOP_BUILD_AUTH_CALLBACK_URL"),
    "http://localhost:8100",
);

/// Record used by development builds
pub static DEVELOPMENT: EnvironmentConfig = EnvironmentConfig::compiled(
    false,
    API_SERVER_URL,
    AUTH_DOMAIN_PREFIX,
    AUTH_AUDIENCE,
    AUTH_CLIENT_ID,
    AUTH_CALLBACK_URL,
);

/// Record used by builds with the `production` feature
pub static PRODUCTION: EnvironmentConfig = EnvironmentConfig::compiled(
    true,
    API_SERVER_URL,
    AUTH_DOMAIN_PREFIX,
    AUTH_AUDIENCE,
    AUTH_CLIENT_ID,
    AUTH_CALLBACK_URL,
);

/// The compiled-in record for a deployment
pub fn profile(deployment: Deployment) -> &'static EnvironmentConfig {
    match deployment {
        Deployment::Development => &DEVELOPMENT,
        Deployment::Production => &PRODUCTION,
    }
}

/// The active compiled-in record. Returns the same reference on every call.
pub fn get_config() -> &'static EnvironmentConfig {
    profile(Deployment::active())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_override() {
        assert_eq!(build_override(None, "a"), "a");
        assert_eq!(build_override(Some(""), "a"), "a");
        assert_eq!(build_override(Some("b"), "a"), "b");
    }

    #[test]
    fn test_profiles_only_differ_in_production_flag() {
        assert!(!DEVELOPMENT.production());
        assert!(PRODUCTION.production());
        assert_eq!(DEVELOPMENT.api_server_url(), PRODUCTION.api_server_url());
        assert_eq!(DEVELOPMENT.auth(), PRODUCTION.auth());
    }

    #[test]
    fn test_profile_lookup() {
        assert!(std::ptr::eq(profile(Deployment::Development), &DEVELOPMENT));
        assert!(std::ptr::eq(profile(Deployment::Production), &PRODUCTION));
    }

    #[test]
    fn test_compiled_profiles_are_valid() {
        DEVELOPMENT.validate().unwrap();
        PRODUCTION.validate().unwrap();
    }
}
