//! Auth0 conventions shared by the frontend and the API it talks to
//!
//! The tenant-specific part (domain prefix, audience, client id) lives in the
//! environment record; these are the parts every tenant has in common.

/// Host suffix appended to a tenant's domain prefix
pub const AUTH0_HOST_SUFFIX: &str = ".auth0.com";

/// Token signing algorithms accepted by the API
pub const AUTH0_ALGORITHMS: &[&str] = &["RS256"];

/// Path of the JSON Web Key Set, relative to the issuer
pub const AUTH0_JWKS_PATH: &str = "/.well-known/jwks.json";

/// Authorization endpoint path
pub const AUTH0_AUTHORIZE_PATH: &str = "/authorize";

/// Logout endpoint path
pub const AUTH0_LOGOUT_PATH: &str = "/v2/logout";

/// Response type requested by the browser login flow (implicit grant)
pub const AUTH0_RESPONSE_TYPE: &str = "token";
