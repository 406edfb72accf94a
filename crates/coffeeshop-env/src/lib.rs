//! # Coffee Shop Environment
//!
//! Runtime environment of the Coffee Shop frontend: the base URL of the
//! backend API and the Auth0 settings used for login.
//!
//! ```
//! let config = coffeeshop_env::get_config();
//! assert_eq!(config.api_server_url(), "http://127.0.0.1:5000");
//! ```
//!
//! The compiled-in records are immutable statics, one per [`Deployment`].
//! Deployments that keep their values outside the binary use
//! [`EnvironmentLoader`], and [`FrontendContext`] hands the validated record
//! to the API and authentication collaborators.

pub mod api;
pub mod auth;
pub mod context;
pub mod environment;
pub mod loader;
pub mod profiles;

pub use api::ApiEndpoints;
pub use auth::Auth0Endpoints;
pub use context::FrontendContext;
pub use environment::{AuthSettings, Deployment, EnvironmentConfig};
pub use loader::{EnvironmentLoader, DEFAULT_CONFIG_FILE, DEFAULT_ENV_PREFIX};
pub use profiles::{get_config, profile, DEVELOPMENT, PRODUCTION};
